//! Which pages are on screen

use std::str::FromStr;

/// Navigation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(Direction::Next),
            "prev" => Ok(Direction::Prev),
            other => Err(format!("unknown direction `{other}`")),
        }
    }
}

/// Current viewing offset into the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub first_visible: usize,
    /// 1 or 2
    pub pages_per_view: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            first_visible: 0,
            pages_per_view: 1,
        }
    }
}

/// Two pages when the viewport is strictly wider than `threshold`
pub fn pages_per_view_for(viewport_width: f32, threshold: f32) -> usize {
    if viewport_width > threshold {
        2
    } else {
        1
    }
}

impl ViewState {
    /// First page of the spread containing `page`
    pub fn spread_start(&self, page: usize) -> usize {
        let step = self.pages_per_view.max(1);
        page / step * step
    }

    /// Move by one spread. Returns whether the view changed.
    pub fn navigate(&mut self, direction: Direction, page_count: usize) -> bool {
        let step = self.pages_per_view.max(1);
        let target = match direction {
            Direction::Next if self.first_visible + step < page_count => {
                self.first_visible + step
            }
            Direction::Next => self.first_visible,
            Direction::Prev => self.first_visible.saturating_sub(step),
        };
        let changed = target != self.first_visible;
        self.first_visible = target;
        changed
    }

    /// Pull the view back inside a document of `page_count` pages
    pub fn clamp(&mut self, page_count: usize) {
        if page_count == 0 {
            self.first_visible = 0;
        } else if self.first_visible >= page_count {
            self.first_visible = self.spread_start(page_count - 1);
        }
    }

    /// Absolute indices of the pages to render
    pub fn visible_range(&self, page_count: usize) -> std::ops::Range<usize> {
        let start = self.first_visible.min(page_count);
        let end = (self.first_visible + self.pages_per_view).min(page_count);
        start..end
    }

    /// `first[-second] / total`, 1-based
    pub fn indicator(&self, page_count: usize) -> String {
        let rendered = self.visible_range(page_count).len();
        match rendered {
            0 => format!("0 / {page_count}"),
            1 => format!("{} / {}", self.first_visible + 1, page_count),
            _ => format!(
                "{}-{} / {}",
                self.first_visible + 1,
                self.first_visible + rendered,
                page_count
            ),
        }
    }
}
