//! Property-based tests for pagination and caret remapping.

use folio::{
    CursorPosition, Document, Editor, EditorConfig, FontMetrics, LayoutMetrics, MetricsProvider,
    Page,
};
use proptest::prelude::*;

const LINES_PER_PAGE: usize = 3;

/// 10 chars per line
fn provider() -> MetricsProvider {
    let metrics = LayoutMetrics {
        page_width: 100.0,
        page_height: LINES_PER_PAGE as f32 * 10.0,
        padding: 0.0,
        font_size: 10.0,
        line_height_factor: 1.0,
    };
    MetricsProvider::new(metrics, Box::new(FontMetrics::monospace(10.0))).unwrap()
}

// ============================================================================
// Strategies
// ============================================================================

/// Lowercase words with arbitrary runs of spaces and line breaks
fn loose_text() -> impl Strategy<Value = String> {
    "[a-z \n]{0,200}"
}

/// Words of up to 14 letters, some wider than a line
fn words() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,14}", 1..12)
}

fn paragraph() -> impl Strategy<Value = String> {
    words().prop_map(|words| words.join(" "))
}

/// One typed character, line breaks and spaces included
fn typed_char() -> impl Strategy<Value = char> {
    prop::sample::select(vec!['a', 'z', ' ', '\n'])
}

fn editor(text: &str) -> Editor {
    let config = EditorConfig {
        metrics: *provider().metrics(),
        spread_min_viewport: 900.0,
    };
    Editor::with_text(config, Box::new(FontMetrics::monospace(10.0)), 500.0, text).unwrap()
}

fn non_whitespace_before(text: &str, offset: usize) -> usize {
    text.chars().take(offset).filter(|c| !c.is_whitespace()).count()
}

fn page_texts(doc: &Document) -> Vec<String> {
    doc.pages().iter().map(|p| p.text()).collect()
}

// ============================================================================
// Layout Properties
// ============================================================================

proptest! {
    /// No page holds more lines than fit.
    #[test]
    fn pages_respect_capacity(text in loose_text()) {
        let doc = Document::paginate(&text, &provider());
        prop_assert!(doc.len() >= 1);
        for page in doc.pages() {
            prop_assert!(page.len() <= LINES_PER_PAGE);
        }
    }

    /// A line with more than one word fits the available width. Leading
    /// spaces kept from the source may still push a single word over.
    #[test]
    fn multi_word_lines_fit(text in loose_text()) {
        let metrics = provider();
        let doc = Document::paginate(&text, &metrics);
        for line in doc.pages().iter().flat_map(|p| p.lines()) {
            if line.text().split_whitespace().count() > 1 {
                prop_assert!(metrics.measure_width(line.text()) <= metrics.available_width(),
                    "line {:?} overflows", line.text());
            }
        }
    }

    /// Every word survives pagination whole and in order.
    #[test]
    fn words_are_never_split(paragraphs in prop::collection::vec(paragraph(), 1..6)) {
        let text = paragraphs.join("\n\n");
        let doc = Document::paginate(&text, &provider());
        let laid_out: Vec<String> = doc
            .pages()
            .iter()
            .flat_map(|p| p.lines())
            .flat_map(|l| l.text().split_whitespace().map(str::to_owned).collect::<Vec<_>>())
            .collect();
        let source: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
        prop_assert_eq!(laid_out, source);
    }

    /// Paginating the flattened document reproduces the same pages.
    #[test]
    fn pagination_is_a_fixed_point(text in loose_text()) {
        let metrics = provider();
        let doc = Document::paginate(&text, &metrics);
        let again = Document::paginate(&doc.text(), &metrics);
        prop_assert_eq!(page_texts(&doc), page_texts(&again));
    }

    /// Any run of two or more line breaks separates paragraphs the same way.
    #[test]
    fn blank_runs_fold(a in paragraph(), b in paragraph(), breaks in 2usize..9) {
        let metrics = provider();
        let folded = Document::paginate(&format!("{a}{}{b}", "\n".repeat(breaks)), &metrics);
        let single = Document::paginate(&format!("{a}\n\n{b}"), &metrics);
        prop_assert_eq!(page_texts(&folded), page_texts(&single));
    }

    /// Without an edit, every caret position maps back onto itself.
    #[test]
    fn cursor_survives_unchanged_reflow(text in loose_text()) {
        let metrics = provider();
        let doc = Document::paginate(&text, &metrics);
        let flat = doc.flatten_with::<Page>(0, &[]);
        let reflowed = Document::paginate(&flat.text, &metrics);
        for (page_index, page) in doc.pages().iter().enumerate() {
            for offset in 0..=page.char_len() {
                let position = CursorPosition::new(page_index, offset);
                let at = flat.offset_of(&position).unwrap();
                prop_assert_eq!(reflowed.position_for_offset(at), position);
            }
        }
    }

    /// Typing one character anywhere edits the text at the caret and leaves
    /// the caret right after it.
    #[test]
    fn typed_char_lands_at_caret(
        text in loose_text(),
        page_sel in any::<usize>(),
        offset_sel in any::<usize>(),
        c in typed_char(),
    ) {
        let mut editor = editor(&text);
        let before = editor.document().flatten_with::<Page>(0, &[]);
        let pages = editor.document().pages();
        let page_index = page_sel % pages.len();
        let position = CursorPosition::new(page_index, offset_sel % (pages[page_index].char_len() + 1));
        let at = before.offset_of(&position).unwrap();

        let mut expected: Vec<char> = before.text.chars().collect();
        expected.insert(at, c);
        let expected: String = expected.into_iter().collect();

        editor.restore_cursor(Some(position));
        prop_assert!(editor.type_text(&c.to_string()));

        let reflowed = Document::paginate(&expected, editor.metrics());
        prop_assert_eq!(editor.text(), reflowed.text());
        let editor_text = editor.text();
        prop_assert_eq!(
            editor_text.split_whitespace().collect::<Vec<_>>(),
            expected.split_whitespace().collect::<Vec<_>>()
        );

        let after = editor.document().flatten_with::<Page>(0, &[]);
        let caret = editor.cursor_position().unwrap();
        let caret_at = after.offset_of(&caret).unwrap();
        prop_assert_eq!(
            non_whitespace_before(&after.text, caret_at),
            non_whitespace_before(&expected, at + 1)
        );
        if !c.is_whitespace() {
            prop_assert_eq!(after.text.chars().nth(caret_at - 1), Some(c));
        }
    }
}
