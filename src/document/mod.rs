//! Document model: the ordered pages of the text being edited

mod page;

pub use page::{Line, LineBreak, LineKind, Page, PageSource, LINE_SEPARATOR, WORD_SEPARATOR};

use crate::editing::CursorPosition;
use crate::layout::{paginate, MetricsProvider};
use std::borrow::Cow;

/// Convert CRLF line endings to plain line breaks
pub fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// All pages of the document. Rebuilt wholesale on every reflow; no page
/// or line survives a reflow by identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pages: Vec<Page>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            pages: vec![Page::default()],
        }
    }
}

/// Flattened document text plus where each page begins in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatText {
    pub text: String,
    /// Char offset of each page's first character
    pub page_starts: Vec<usize>,
}

impl FlatText {
    /// Flat offset of a page position, `None` for an unknown page
    pub fn offset_of(&self, position: &CursorPosition) -> Option<usize> {
        self.page_starts
            .get(position.page_index)
            .map(|start| start + position.offset)
    }
}

impl Document {
    /// Paginate `text` into a new document
    pub fn paginate(text: &str, metrics: &MetricsProvider) -> Self {
        Self::from_pages(paginate(text, metrics))
    }

    pub fn from_pages(pages: Vec<Page>) -> Self {
        if pages.is_empty() {
            return Self::default();
        }
        Self { pages }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// The whole document as source text: soft wraps read back as spaces,
    /// hard breaks and separators as line breaks.
    pub fn text(&self) -> String {
        self.flatten_with::<Page>(0, &[]).text
    }

    /// Flatten the document with the pages starting at `first_visible`
    /// replaced by `edited` (the rendered surfaces).
    ///
    /// Every line break, inside a page or between two pages, is written as
    /// the character it stands for. A paragraph running across a page edge
    /// rejoins with a space, and a paragraph boundary at a page edge is
    /// already carried by its blank separator line. Flat offsets line up
    /// with page offsets, since every break is one character either way.
    pub fn flatten_with<S: PageSource>(&self, first_visible: usize, edited: &[S]) -> FlatText {
        let edited_range = first_visible..first_visible + edited.len();
        let count = self.pages.len().max(edited_range.end);

        let mut text = String::new();
        let mut page_starts = Vec::with_capacity(count);
        let mut offset = 0usize;
        let mut pending: Option<LineBreak> = None;

        for idx in 0..count {
            if let Some(line_break) = pending {
                text.push(line_break.as_char());
                offset += 1;
            }
            page_starts.push(offset);

            let (page_text, after) = if edited_range.contains(&idx) {
                let page = &edited[idx - first_visible];
                (page.source_text(), page.break_after())
            } else {
                match self.pages.get(idx) {
                    Some(page) => (page.source_text(), page.break_after()),
                    None => (String::new(), LineBreak::Hard),
                }
            };
            offset += page_text.chars().count();
            text.push_str(&page_text);
            pending = Some(after);
        }

        FlatText { text, page_starts }
    }

    /// Page position for an offset into the text this document was
    /// paginated from.
    ///
    /// Picks the last line starting at or before `flat` and clamps the
    /// column to that line. Whitespace is only dropped around paragraphs
    /// (folded blank lines, stray edge breaks), so a clamped offset lands at
    /// the end of the paragraph before it.
    pub fn position_for_offset(&self, flat: usize) -> CursorPosition {
        let mut found = None;

        'pages: for (page_index, page) in self.pages.iter().enumerate() {
            for (line_offset, line) in page.lines_with_offsets() {
                if line.source_start() > flat {
                    break 'pages;
                }
                found = Some((page_index, line_offset, line));
            }
        }

        match found {
            Some((page_index, line_offset, line)) => {
                let column = (flat - line.source_start()).min(line.len());
                CursorPosition::new(page_index, line_offset + column)
            }
            None => CursorPosition::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FontMetrics, LayoutMetrics};
    use crate::render::Surface;

    /// 10 chars per line, `lines` lines per page
    fn provider(lines: usize) -> MetricsProvider {
        let metrics = LayoutMetrics {
            page_width: 100.0,
            page_height: lines as f32 * 10.0,
            padding: 0.0,
            font_size: 10.0,
            line_height_factor: 1.0,
        };
        MetricsProvider::new(metrics, Box::new(FontMetrics::monospace(10.0))).unwrap()
    }

    #[test]
    fn test_default_has_one_empty_page() {
        let doc = Document::default();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.text(), "");
    }

    #[test]
    fn test_flatten_rejoins_wrapped_lines() {
        let doc = Document::paginate("aaaa bbbb cccc dddd eeee", &provider(2));
        // ["aaaa bbbb", "cccc dddd"], ["eeee", ""]
        let flat = doc.flatten_with::<Page>(0, &[]);
        assert_eq!(flat.text, "aaaa bbbb cccc dddd eeee\n");
        assert_eq!(flat.page_starts, vec![0, 20]);
    }

    #[test]
    fn test_flatten_keeps_hard_breaks() {
        let doc = Document::paginate("ab\ncd\n\nef", &provider(4));
        assert_eq!(doc.pages()[0].text(), "ab\ncd\n\nef");
        assert_eq!(doc.text(), "ab\ncd\n\nef\n");
    }

    #[test]
    fn test_flatten_substitutes_edited_pages() {
        let doc = Document::paginate("aaaa bbbb cccc dddd eeee", &provider(2));
        let mut edited = Surface::from_page(1, &doc.pages()[1]);
        edited.set_text("eeeeX\n");
        let flat = doc.flatten_with(1, &[edited]);
        assert_eq!(flat.text, "aaaa bbbb cccc dddd eeeeX\n");
    }

    #[test]
    fn test_flatten_is_a_fixed_point() {
        let text = "one two three four five six\n\n\n\nseven eight nine ten eleven";
        let metrics = provider(3);
        let doc = Document::paginate(text, &metrics);
        let again = Document::paginate(&doc.text(), &metrics);
        assert_eq!(doc.pages().len(), again.pages().len());
        for (a, b) in doc.pages().iter().zip(again.pages()) {
            assert_eq!(a.text(), b.text());
        }
    }

    #[test]
    fn test_position_for_offset_identity() {
        let metrics = provider(2);
        let doc = Document::paginate("aaaa bbbb cccc dddd\n\neeee", &metrics);
        let flat = doc.flatten_with::<Page>(0, &[]);
        let reflowed = Document::paginate(&flat.text, &metrics);
        for (page_index, page) in doc.pages().iter().enumerate() {
            for offset in 0..=page.char_len() {
                let pos = CursorPosition::new(page_index, offset);
                let at = flat.offset_of(&pos).unwrap();
                assert_eq!(reflowed.position_for_offset(at), pos);
            }
        }
    }

    #[test]
    fn test_position_follows_text_to_next_page() {
        let metrics = provider(2);
        // "cccc dddd" grows past the line width and pushes "dddd" onward
        let doc = Document::paginate("aaaa bbbb ccccXX dddd", &metrics);
        // "aaaa bbbb", "ccccXX" | "dddd", ""
        assert_eq!(doc.position_for_offset(17), CursorPosition::new(1, 0));
        assert_eq!(doc.position_for_offset(18), CursorPosition::new(1, 1));
    }

    #[test]
    fn test_offset_in_dropped_whitespace() {
        let metrics = provider(4);
        let doc = Document::paginate("ab\n\n\n\n\n\ncd", &metrics);
        // "ab", "", "cd", ""
        assert_eq!(doc.position_for_offset(4), CursorPosition::new(0, 3));
        assert_eq!(doc.position_for_offset(8), CursorPosition::new(0, 4));
    }

    #[test]
    fn test_offset_before_first_line() {
        let metrics = provider(4);
        let doc = Document::paginate("\n\n\nab", &metrics);
        assert_eq!(doc.position_for_offset(1), CursorPosition::new(0, 0));
    }

    #[test]
    fn test_leading_spaces_belong_to_the_line() {
        let metrics = provider(4);
        let doc = Document::paginate("   ab", &metrics);
        assert_eq!(doc.pages()[0].lines()[0].text(), "   ab");
        assert_eq!(doc.position_for_offset(1), CursorPosition::new(0, 1));
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(normalize_line_breaks("a\r\n\r\nb"), "a\n\nb");
        assert!(matches!(normalize_line_breaks("a\nb"), Cow::Borrowed(_)));
    }
}
