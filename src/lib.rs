//! Folio: a paginated plain-text editing core
//!
//! This crate lays flat text out into fixed-size pages and keeps them
//! editable:
//! - Greedy word wrap against measured glyph widths, with hard page capacity
//! - One or two pages rendered as editable surfaces depending on viewport width
//! - A full reflow on every edit that keeps the caret at the same place in
//!   the text, even when that text moves to another page

pub mod config;
pub mod document;
pub mod editing;
pub mod error;
pub mod layout;
pub mod render;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmReader;

// Re-export primary types
pub use config::EditorConfig;
pub use document::{
    normalize_line_breaks, Document, FlatText, Line, LineBreak, LineKind, Page, PageSource,
};
pub use editing::{CursorPosition, CursorTracker};
pub use error::{Error, Result};
pub use layout::{FontMetrics, LayoutMetrics, MetricsProvider, TextMeasure};
pub use render::{Caret, Direction, Renderer, Surface, SurfacePatch, ViewState};

use render::{pages_per_view_for, SurfaceDiff};
use serde::Serialize;

/// Reflow controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReflowPhase {
    #[default]
    Idle,
    Reflowing,
}

/// Notifications for the surrounding shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EditorEvent {
    /// A reflow finished; `text` is the document as it now stands
    #[serde(rename_all = "camelCase")]
    DocumentChanged { page_count: usize, text: String },
    /// The visible spread moved
    #[serde(rename_all = "camelCase")]
    Navigated {
        first_visible: usize,
        pages_per_view: usize,
    },
}

/// The editing session: owns the document, the view and the rendered
/// surfaces, and runs the reflow cycle on every edit.
pub struct Editor {
    config: EditorConfig,
    metrics: MetricsProvider,
    document: Document,
    view: ViewState,
    viewport_width: f32,
    surfaces: Vec<Surface>,
    caret: Option<Caret>,
    focused: Option<usize>,
    phase: ReflowPhase,
    diff: SurfaceDiff,
    patches: Vec<SurfacePatch>,
    events: Vec<EditorEvent>,
}

impl Editor {
    /// Create an editor showing an empty document.
    ///
    /// Fails only on invalid layout metrics.
    pub fn new(
        config: EditorConfig,
        measure: Box<dyn TextMeasure>,
        viewport_width: f32,
    ) -> Result<Self> {
        let metrics = MetricsProvider::new(config.metrics, measure)?;
        let mut editor = Self {
            config,
            metrics,
            document: Document::default(),
            view: ViewState::default(),
            viewport_width,
            surfaces: Vec::new(),
            caret: None,
            focused: None,
            phase: ReflowPhase::Idle,
            diff: SurfaceDiff::new(),
            patches: Vec::new(),
            events: Vec::new(),
        };
        editor.render();
        Ok(editor)
    }

    /// Create an editor with initial text content
    pub fn with_text(
        config: EditorConfig,
        measure: Box<dyn TextMeasure>,
        viewport_width: f32,
        text: &str,
    ) -> Result<Self> {
        let mut editor = Self::new(config, measure, viewport_width)?;
        editor.load(text);
        Ok(editor)
    }

    /// Initial load: paginate source text directly and show the first page
    pub fn load(&mut self, text: &str) {
        let text = normalize_line_breaks(text);
        self.document = Document::paginate(&text, &self.metrics);
        self.view.first_visible = 0;
        self.diff.reset();
        self.render();
        log::debug!("loaded {} pages", self.document.len());
    }

    /// Run a full reflow after the rendered surfaces were edited.
    ///
    /// Saves the caret, flattens the document with the edited surfaces in
    /// place, repaginates from scratch, redraws and puts the caret back at
    /// the same place in the text.
    pub fn on_input(&mut self) {
        if self.phase == ReflowPhase::Reflowing {
            log::warn!("edit during reflow ignored");
            return;
        }
        self.phase = ReflowPhase::Reflowing;

        let saved = CursorTracker::save(&self.surfaces, self.caret.as_ref(), &self.view);
        let flat = self.document.flatten_with(self.view.first_visible, &self.surfaces);
        let caret_offset = saved.and_then(|pos| flat.offset_of(&pos));

        self.document = Document::paginate(&flat.text, &self.metrics);
        let target = caret_offset.map(|offset| self.document.position_for_offset(offset));
        log::debug!(
            "reflow: {} pages, caret {:?} -> {:?}",
            self.document.len(),
            saved,
            target
        );

        self.render();
        self.restore_cursor(target);

        self.events.push(EditorEvent::DocumentChanged {
            page_count: self.document.len(),
            text: self.document.text(),
        });
        self.phase = ReflowPhase::Idle;
    }

    /// Put the caret at `position`, bringing its page into view first.
    ///
    /// Positions outside the document or past the page text are dropped
    /// without a caret.
    pub fn restore_cursor(&mut self, position: Option<CursorPosition>) {
        let Some(position) = position else {
            return;
        };
        if position.page_index >= self.document.len() {
            log::warn!("cursor page {} out of range", position.page_index);
            return;
        }

        if let Some(first_visible) =
            CursorTracker::navigation_for(&position, &self.view, self.surfaces.len())
        {
            self.view.first_visible = first_visible;
            self.render();
            self.push_navigated();
        }

        match CursorTracker::place(&position, &self.surfaces, &self.view) {
            Some(caret) => {
                self.focused = Some(caret.surface);
                self.caret = Some(caret);
            }
            None => log::warn!("no caret target for {:?}", position),
        }
    }

    /// Move one spread forward or back. Does not repaginate.
    pub fn navigate(&mut self, direction: Direction) {
        let changed = self.view.navigate(direction, self.document.len());
        self.render();
        if changed {
            self.push_navigated();
        }
    }

    /// Track a new viewport width, switching between one and two pages
    pub fn set_viewport_width(&mut self, width: f32) {
        let saved = self.cursor_position();
        self.viewport_width = width;
        self.render();
        self.restore_cursor(saved);
    }

    /// Type `text` at the caret and reflow. Returns false without a caret.
    pub fn type_text(&mut self, text: &str) -> bool {
        let Some(mut caret) = self.caret else {
            return false;
        };
        let Some(surface) = self.surfaces.get_mut(caret.surface) else {
            return false;
        };
        if !surface.insert_text(&mut caret, text) {
            return false;
        }
        self.caret = Some(caret);
        self.on_input();
        true
    }

    /// Delete the character before the caret and reflow
    pub fn backspace(&mut self) -> bool {
        let Some(mut caret) = self.caret else {
            return false;
        };
        let Some(surface) = self.surfaces.get_mut(caret.surface) else {
            return false;
        };
        if !surface.delete_backward(&mut caret) {
            return false;
        }
        self.caret = Some(caret);
        self.on_input();
        true
    }

    /// Set the selection anchor, as a click in a surface would
    pub fn set_caret(&mut self, caret: Option<Caret>) {
        self.focused = caret.map(|c| c.surface);
        self.caret = caret;
    }

    /// Current caret as a page position
    pub fn cursor_position(&self) -> Option<CursorPosition> {
        CursorTracker::save(&self.surfaces, self.caret.as_ref(), &self.view)
    }

    fn render(&mut self) {
        self.view.pages_per_view =
            pages_per_view_for(self.viewport_width, self.config.spread_min_viewport);
        self.view.clamp(self.document.len());
        self.surfaces = Renderer::render(&self.document, &self.view);
        // The old surfaces are gone and the caret with them
        self.caret = None;
        self.focused = None;
        let patches = self.diff.compute(&self.surfaces);
        self.patches.extend(patches);
    }

    fn push_navigated(&mut self) {
        self.events.push(EditorEvent::Navigated {
            first_visible: self.view.first_visible,
            pages_per_view: self.view.pages_per_view,
        });
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn metrics(&self) -> &MetricsProvider {
        &self.metrics
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// For shells that edit the surfaces directly and then call [`Editor::on_input`]
    pub fn surfaces_mut(&mut self) -> &mut [Surface] {
        &mut self.surfaces
    }

    pub fn caret(&self) -> Option<&Caret> {
        self.caret.as_ref()
    }

    /// Surface holding input focus
    pub fn focused_surface(&self) -> Option<usize> {
        self.focused
    }

    pub fn phase(&self) -> ReflowPhase {
        self.phase
    }

    pub fn page_count(&self) -> usize {
        self.document.len()
    }

    /// Get document text
    pub fn text(&self) -> String {
        self.document.text()
    }

    /// `first[-second] / total`
    pub fn page_indicator(&self) -> String {
        self.view.indicator(self.document.len())
    }

    /// Take queued events
    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        std::mem::take(&mut self.events)
    }

    /// Take surface patches produced since the last call
    pub fn take_patches(&mut self) -> Vec<SurfacePatch> {
        std::mem::take(&mut self.patches)
    }
}
