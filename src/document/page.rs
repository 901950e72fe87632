//! Pages and the lines they hold

/// Separator placed between a page's lines in its displayed text
pub const LINE_SEPARATOR: char = '\n';

/// Separator between words, and the character a soft wrap stands for
pub const WORD_SEPARATOR: char = ' ';

/// How a line ends in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBreak {
    /// Wrapped because the next word did not fit; stands for one space
    Soft,
    /// An actual line break in the text
    #[default]
    Hard,
}

impl LineBreak {
    /// Character the break occupies in the source text
    pub fn as_char(self) -> char {
        match self {
            LineBreak::Soft => WORD_SEPARATOR,
            LineBreak::Hard => LINE_SEPARATOR,
        }
    }
}

/// Something that can be written back into source text: a stored page or
/// an edited surface showing one.
pub trait PageSource {
    /// Source text with soft wraps as spaces and hard breaks as line breaks
    fn source_text(&self) -> String;

    /// Break between this page and the next one
    fn break_after(&self) -> LineBreak;
}

/// What a line represents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Wrapped words of a paragraph
    Text,
    /// The blank line folded in after a paragraph
    Separator,
}

/// A single wrapped line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    /// Char offset of the first character in the paginated source text
    source_start: usize,
    /// Length in chars
    len: usize,
    kind: LineKind,
    end: LineBreak,
}

impl Line {
    pub fn text_line(text: String, source_start: usize, end: LineBreak) -> Self {
        let len = text.chars().count();
        Self {
            text,
            source_start,
            len,
            kind: LineKind::Text,
            end,
        }
    }

    pub fn separator(source_start: usize) -> Self {
        Self {
            text: String::new(),
            source_start,
            len: 0,
            kind: LineKind::Separator,
            end: LineBreak::Hard,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// How the line ends
    pub fn end(&self) -> LineBreak {
        self.end
    }

    pub fn is_separator(&self) -> bool {
        self.kind == LineKind::Separator
    }

    pub fn source_start(&self) -> usize {
        self.source_start
    }

    /// Char offset just past the line in the source text
    pub fn source_end(&self) -> usize {
        self.source_start + self.len
    }

    /// Length in chars
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A capacity-bounded group of lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    lines: Vec<Line>,
}

impl Page {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Displayed text: the lines joined by the line separator
    pub fn text(&self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|l| l.text.len() + 1).sum());
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                text.push(LINE_SEPARATOR);
            }
            text.push_str(&line.text);
        }
        text
    }

    /// Length of [`Page::text`] in chars
    pub fn char_len(&self) -> usize {
        let content: usize = self.lines.iter().map(Line::len).sum();
        content + self.lines.len().saturating_sub(1)
    }

    /// Lines paired with their char offset inside the page text
    pub fn lines_with_offsets(&self) -> impl Iterator<Item = (usize, &Line)> {
        self.lines.iter().scan(0usize, |offset, line| {
            let start = *offset;
            *offset += line.len + 1;
            Some((start, line))
        })
    }
}

impl PageSource for Page {
    fn source_text(&self) -> String {
        let mut text = String::with_capacity(self.lines.iter().map(|l| l.text.len() + 1).sum());
        for (idx, line) in self.lines.iter().enumerate() {
            if idx > 0 {
                text.push(self.lines[idx - 1].end.as_char());
            }
            text.push_str(&line.text);
        }
        text
    }

    fn break_after(&self) -> LineBreak {
        self.lines.last().map_or(LineBreak::Hard, Line::end)
    }
}
