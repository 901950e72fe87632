//! Caret capture and restoration across a reflow

use crate::render::{Caret, Surface, ViewState};
use serde::{Deserialize, Serialize};

/// Caret location as (absolute page index, char offset into the page text)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorPosition {
    pub page_index: usize,
    pub offset: usize,
}

impl CursorPosition {
    pub fn new(page_index: usize, offset: usize) -> Self {
        Self { page_index, offset }
    }
}

/// Maps the caret between rendered surfaces and [`CursorPosition`]s
#[derive(Debug, Default)]
pub struct CursorTracker;

impl CursorTracker {
    /// Read the caret as a page position.
    ///
    /// Returns `None` when there is no caret or it is not anchored in one of
    /// the rendered surfaces.
    pub fn save(
        surfaces: &[Surface],
        caret: Option<&Caret>,
        view: &ViewState,
    ) -> Option<CursorPosition> {
        let caret = caret?;
        let surface = surfaces.get(caret.surface)?;
        let offset = surface.offset_of(caret.segment, caret.offset)?;
        Some(CursorPosition::new(
            view.first_visible + caret.surface,
            offset,
        ))
    }

    /// First visible page that brings `position` into view, or `None` if
    /// the page is already rendered.
    pub fn navigation_for(
        position: &CursorPosition,
        view: &ViewState,
        rendered: usize,
    ) -> Option<usize> {
        let visible = view.first_visible..view.first_visible + rendered;
        if visible.contains(&position.page_index) {
            None
        } else {
            Some(view.spread_start(position.page_index))
        }
    }

    /// Locate the caret for `position` among the rendered surfaces.
    ///
    /// Walks the target surface's segments in order and stops in the first
    /// one whose cumulative length reaches the offset. `None` if the page is
    /// not rendered or the offset is past its text.
    pub fn place(
        position: &CursorPosition,
        surfaces: &[Surface],
        view: &ViewState,
    ) -> Option<Caret> {
        let relative = position.page_index.checked_sub(view.first_visible)?;
        let surface = surfaces.get(relative)?;
        let (segment, offset) = surface.locate(position.offset)?;
        Some(Caret {
            surface: relative,
            segment,
            offset,
        })
    }
}
