//! Pagination: text into fixed-capacity pages

use crate::document::{Line, Page};
use crate::layout::line_break::LineBreaker;
use crate::layout::metrics::MetricsProvider;

/// Separator between paragraphs in source text
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Split `text` into pages of at most `max_lines_per_page` lines.
///
/// Deterministic for a given text and metric set. An empty document yields
/// a single empty page.
pub fn paginate(text: &str, metrics: &MetricsProvider) -> Vec<Page> {
    let mut paginator = Paginator::new(metrics.max_lines_per_page());
    let breaker = LineBreaker::new();

    let mut para_start = 0usize;
    for raw in text.split(PARAGRAPH_SEPARATOR) {
        let raw_len = raw.chars().count();

        // Odd runs of blank lines leave stray breaks at paragraph edges
        let leading = raw.chars().take_while(|&c| c == '\n').count();
        let body = raw.trim_matches('\n');

        if !body.trim().is_empty() {
            let lines = breaker.break_paragraph(body, para_start + leading, metrics);
            let para_end = lines.last().map_or(para_start + leading, Line::source_end);
            for line in lines {
                paginator.push_line(line);
            }
            paginator.push_line(Line::separator(para_end + 1));
        }

        para_start += raw_len + PARAGRAPH_SEPARATOR.len();
    }

    paginator.finish()
}

/// Accumulates lines into pages
struct Paginator {
    max_lines: usize,
    pages: Vec<Page>,
    current: Vec<Line>,
}

impl Paginator {
    fn new(max_lines: usize) -> Self {
        Self {
            max_lines: max_lines.max(1),
            pages: Vec::new(),
            current: Vec::new(),
        }
    }

    fn push_line(&mut self, line: Line) {
        if self.current.len() >= self.max_lines {
            log::trace!("page {} full", self.pages.len());
            self.pages.push(Page::new(std::mem::take(&mut self.current)));
        }
        self.current.push(line);
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(Page::new(self.current));
        }
        self.pages
    }
}
