//! Editable surfaces: one per rendered page

use crate::document::{
    normalize_line_breaks, Line, LineBreak, Page, PageSource, LINE_SEPARATOR,
};
use smallvec::SmallVec;

/// Selection anchor inside the rendered surfaces.
///
/// `offset` counts chars inside the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    /// Index among the rendered surfaces (left to right)
    pub surface: usize,
    /// Text segment within the surface
    pub segment: usize,
    pub offset: usize,
}

/// An editable region showing one page as ordered text segments.
///
/// Segments are what a UI toolkit exposes as text runs. Concatenated in
/// order they give the page text; every segment but the last ends with the
/// line separator. Each segment also remembers how its line ends in the
/// source text, the last one standing for the edge to the next page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    page_index: usize,
    segments: SmallVec<[String; 8]>,
    breaks: SmallVec<[LineBreak; 8]>,
}

impl Surface {
    /// Surface with a single empty segment, so an empty page still takes a caret
    pub fn empty(page_index: usize) -> Self {
        let mut segments = SmallVec::new();
        segments.push(String::new());
        let mut breaks = SmallVec::new();
        breaks.push(LineBreak::Hard);
        Self {
            page_index,
            segments,
            breaks,
        }
    }

    pub fn from_page(page_index: usize, page: &Page) -> Self {
        if page.is_empty() {
            return Self::empty(page_index);
        }
        let last = page.len() - 1;
        let segments = page
            .lines()
            .iter()
            .enumerate()
            .map(|(idx, line)| {
                let mut segment = line.text().to_owned();
                if idx < last {
                    segment.push(LINE_SEPARATOR);
                }
                segment
            })
            .collect();
        let breaks = page.lines().iter().map(Line::end).collect();
        Self {
            page_index,
            segments,
            breaks,
        }
    }

    /// Absolute index of the page this surface was rendered from
    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// How each segment's line ends
    pub fn breaks(&self) -> &[LineBreak] {
        &self.breaks
    }

    /// Replace the content, one segment per line.
    ///
    /// Line breaks in the unchanged head and tail of the text keep their
    /// kind; any line break inside the changed span was typed and is hard.
    pub fn set_text(&mut self, text: &str) {
        let text = normalize_line_breaks(text);
        let old: Vec<char> = self.text().chars().collect();
        let new: Vec<char> = text.chars().collect();
        let old_breaks = self.break_offsets();
        let after = self.break_after();

        let prefix = old.iter().zip(&new).take_while(|(a, b)| a == b).count();
        let max_suffix = old.len().min(new.len()) - prefix;
        let suffix = old
            .iter()
            .rev()
            .zip(new.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        let kind_at = |pos: usize| {
            let old_pos = if pos < prefix {
                Some(pos)
            } else if pos >= new.len() - suffix {
                Some(old.len() - (new.len() - pos))
            } else {
                None
            };
            old_pos
                .and_then(|at| old_breaks.iter().find(|(o, _)| *o == at))
                .map_or(LineBreak::Hard, |(_, kind)| *kind)
        };

        self.segments.clear();
        self.breaks.clear();
        let mut pos = 0;
        for segment in text.split_inclusive(LINE_SEPARATOR) {
            let len = segment.chars().count();
            if segment.ends_with(LINE_SEPARATOR) {
                self.breaks.push(kind_at(pos + len - 1));
            } else {
                self.breaks.push(after);
            }
            self.segments.push(segment.to_owned());
            pos += len;
        }
        if self.segments.is_empty() || text.ends_with(LINE_SEPARATOR) {
            self.segments.push(String::new());
            self.breaks.push(after);
        }
    }

    /// Char offsets of the line separators in [`Surface::text`], with their kind
    fn break_offsets(&self) -> Vec<(usize, LineBreak)> {
        let mut offsets = Vec::with_capacity(self.segments.len());
        let mut pos = 0;
        for (segment, kind) in self.segments.iter().zip(&self.breaks) {
            pos += segment.chars().count();
            if segment.ends_with(LINE_SEPARATOR) {
                offsets.push((pos - 1, *kind));
            }
        }
        offsets
    }

    pub fn text(&self) -> String {
        self.segments.concat()
    }

    pub fn char_len(&self) -> usize {
        self.segments.iter().map(|s| s.chars().count()).sum()
    }

    /// Offset from the start of the surface to (`segment`, `offset`),
    /// summing every segment before it in order.
    pub fn offset_of(&self, segment: usize, offset: usize) -> Option<usize> {
        let target = self.segments.get(segment)?;
        if offset > target.chars().count() {
            return None;
        }
        let before: usize = self.segments[..segment]
            .iter()
            .map(|s| s.chars().count())
            .sum();
        Some(before + offset)
    }

    /// Segment and intra-segment offset for a surface offset: the first
    /// segment whose cumulative text reaches `offset`. A line separator
    /// ends its segment, so the offset just past it is the start of the
    /// next segment.
    pub fn locate(&self, offset: usize) -> Option<(usize, usize)> {
        let mut walked = 0;
        for (idx, segment) in self.segments.iter().enumerate() {
            let len = segment.chars().count();
            let content = len - usize::from(segment.ends_with(LINE_SEPARATOR));
            if walked + content >= offset {
                return Some((idx, offset - walked));
            }
            walked += len;
        }
        None
    }

    /// Insert `text` at the caret and move the caret past it.
    ///
    /// Line breaks in `text` split the segment; they are hard breaks.
    pub fn insert_text(&mut self, caret: &mut Caret, text: &str) -> bool {
        let text = normalize_line_breaks(text);
        let Some(segment) = self.segments.get(caret.segment) else {
            return false;
        };
        let len = segment.chars().count();
        let content_len = segment.trim_end_matches(LINE_SEPARATOR).chars().count();
        if caret.offset > len {
            return false;
        }
        if caret.offset > content_len {
            // past the separator: the start of the next line
            if caret.segment + 1 >= self.segments.len() {
                return false;
            }
            caret.segment += 1;
            caret.offset = 0;
        }

        let idx = caret.segment;
        let mut content = std::mem::take(&mut self.segments[idx]);
        let terminated = content.ends_with(LINE_SEPARATOR);
        if terminated {
            content.pop();
        }
        let at = byte_index(&content, caret.offset).unwrap_or(content.len());
        content.insert_str(at, &text);

        let mut pieces: Vec<String> = content.split(LINE_SEPARATOR).map(str::to_owned).collect();
        let count = pieces.len();
        if terminated {
            if let Some(last) = pieces.last_mut() {
                last.push(LINE_SEPARATOR);
            }
        }
        for piece in pieces.iter_mut().take(count - 1) {
            piece.push(LINE_SEPARATOR);
        }

        let kind = self.breaks[idx];
        self.segments.remove(idx);
        self.breaks.remove(idx);
        for (n, piece) in pieces.into_iter().enumerate() {
            self.segments.insert(idx + n, piece);
            let piece_kind = if n + 1 == count { kind } else { LineBreak::Hard };
            self.breaks.insert(idx + n, piece_kind);
        }

        caret.segment = idx + count - 1;
        caret.offset = match text.rfind(LINE_SEPARATOR) {
            Some(pos) => text[pos + 1..].chars().count(),
            None => caret.offset + text.chars().count(),
        };
        true
    }

    /// Remove the character before the caret. At the start of a segment
    /// this removes the line break before it and joins the two lines.
    pub fn delete_backward(&mut self, caret: &mut Caret) -> bool {
        let Some(segment) = self.segments.get(caret.segment) else {
            return false;
        };
        let len = segment.chars().count();
        let content_len = segment.trim_end_matches(LINE_SEPARATOR).chars().count();
        if caret.offset > len {
            return false;
        }

        if caret.offset > content_len {
            // right after the separator
            if caret.segment + 1 >= self.segments.len() {
                return false;
            }
            self.join_with_next(caret.segment);
            caret.offset = content_len;
            return true;
        }
        if caret.offset == 0 {
            if caret.segment == 0 {
                return false;
            }
            let prev = caret.segment - 1;
            let prev_len = self.segments[prev].chars().count() - 1;
            self.join_with_next(prev);
            caret.segment = prev;
            caret.offset = prev_len;
            return true;
        }

        let text = &mut self.segments[caret.segment];
        let (Some(start), Some(end)) = (
            byte_index(text, caret.offset - 1),
            byte_index(text, caret.offset),
        ) else {
            return false;
        };
        text.replace_range(start..end, "");
        caret.offset -= 1;
        true
    }

    /// Drop the separator ending segment `idx` and merge the next segment in
    fn join_with_next(&mut self, idx: usize) {
        let next = self.segments.remove(idx + 1);
        self.breaks.remove(idx);
        let segment = &mut self.segments[idx];
        segment.pop();
        segment.push_str(&next);
    }
}

impl PageSource for Surface {
    fn source_text(&self) -> String {
        let mut text = String::with_capacity(self.segments.iter().map(String::len).sum());
        for (segment, kind) in self.segments.iter().zip(&self.breaks) {
            match segment.strip_suffix(LINE_SEPARATOR) {
                Some(content) => {
                    text.push_str(content);
                    text.push(kind.as_char());
                }
                None => text.push_str(segment),
            }
        }
        text
    }

    fn break_after(&self) -> LineBreak {
        self.breaks.last().copied().unwrap_or_default()
    }
}

/// Byte index of the char at `offset`, or the end when `offset` equals the length
fn byte_index(text: &str, offset: usize) -> Option<usize> {
    text.char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(text.len()))
        .nth(offset)
}
