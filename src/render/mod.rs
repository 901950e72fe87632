//! Render output: editable surfaces, view state and the diff protocol

mod diff;
mod surface;
mod view;

pub use diff::{SurfaceDiff, SurfacePatch};
pub use surface::{Caret, Surface};
pub use view::{pages_per_view_for, Direction, ViewState};

use crate::document::Document;

/// Projects the visible pages of a document into surfaces
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    /// One surface per visible page, starting at the first visible page:
    /// `min(pages_per_view, remaining pages)` of them.
    pub fn render(document: &Document, view: &ViewState) -> Vec<Surface> {
        view.visible_range(document.len())
            .filter_map(|idx| document.page(idx).map(|page| Surface::from_page(idx, page)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FontMetrics, LayoutMetrics, MetricsProvider};

    fn document(text: &str) -> Document {
        let metrics = LayoutMetrics {
            page_width: 100.0,
            page_height: 20.0,
            padding: 0.0,
            font_size: 10.0,
            line_height_factor: 1.0,
        };
        let provider =
            MetricsProvider::new(metrics, Box::new(FontMetrics::monospace(10.0))).unwrap();
        Document::paginate(text, &provider)
    }

    #[test]
    fn test_two_page_spread() {
        let doc = document("aaaa bbbb cccc dddd eeee ffff gggg");
        assert_eq!(doc.len(), 3);
        let surfaces = Renderer::render(
            &doc,
            &ViewState {
                first_visible: 0,
                pages_per_view: 2,
            },
        );
        assert_eq!(surfaces.len(), 2);
        assert_eq!(surfaces[0].text(), "aaaa bbbb\ncccc dddd");
        assert_eq!(surfaces[1].page_index(), 1);
    }

    #[test]
    fn test_last_spread_may_be_short() {
        let doc = document("aaaa bbbb cccc dddd eeee ffff gggg");
        let surfaces = Renderer::render(
            &doc,
            &ViewState {
                first_visible: 2,
                pages_per_view: 2,
            },
        );
        assert_eq!(surfaces.len(), 1);
        assert_eq!(surfaces[0].text(), "");
    }

    #[test]
    fn test_empty_document_renders_one_surface() {
        let doc = document("");
        let surfaces = Renderer::render(&doc, &ViewState::default());
        assert_eq!(surfaces.len(), 1);
        assert_eq!(surfaces[0].char_len(), 0);
    }
}
