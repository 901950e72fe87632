//! Greedy word wrapping against measured widths

use crate::document::{Line, LineBreak, LINE_SEPARATOR, WORD_SEPARATOR};
use crate::layout::metrics::MetricsProvider;

/// Line breaker
#[derive(Debug, Default)]
pub struct LineBreaker;

impl LineBreaker {
    pub fn new() -> Self {
        Self
    }

    /// Wrap one paragraph into lines no wider than the available width.
    ///
    /// A line break inside the paragraph is kept as a hard break. Between
    /// them words are separated by single spaces, and each wrap consumes
    /// exactly one space; any further spaces stay on the next line. A word
    /// wider than the page still gets a line of its own and is never split.
    /// `source_start` is the char offset of the paragraph in the text being
    /// paginated.
    pub fn break_paragraph(
        &self,
        paragraph: &str,
        source_start: usize,
        metrics: &MetricsProvider,
    ) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut hard_start = source_start;
        for hard_line in paragraph.split(LINE_SEPARATOR) {
            self.wrap(hard_line, hard_start, metrics, &mut lines);
            hard_start += hard_line.chars().count() + 1;
        }
        lines
    }

    fn wrap(
        &self,
        text: &str,
        source_start: usize,
        metrics: &MetricsProvider,
        lines: &mut Vec<Line>,
    ) {
        let max_width = metrics.available_width();

        let mut current: Option<String> = None;
        let mut line_start = source_start;
        let mut word_start = source_start;

        for word in text.split(WORD_SEPARATOR) {
            match current.as_mut() {
                None => {
                    current = Some(word.to_owned());
                    line_start = word_start;
                }
                Some(line) => {
                    let fitted_len = line.len();
                    line.push(WORD_SEPARATOR);
                    line.push_str(word);

                    if fitted_len > 0 && metrics.measure_width(line) > max_width {
                        line.truncate(fitted_len);
                        let done = std::mem::replace(line, word.to_owned());
                        lines.push(Line::text_line(done, line_start, LineBreak::Soft));
                        line_start = word_start;
                    }
                }
            }
            word_start += word.chars().count() + 1;
        }

        if let Some(line) = current {
            lines.push(Line::text_line(line, line_start, LineBreak::Hard));
        }
    }
}
