//! WASM bindings for a browser shell

use crate::{Caret, Direction, Editor, EditorConfig, FontMetrics, TextMeasure};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Measures text through a JavaScript callback, e.g. a canvas `measureText`
struct JsMeasure {
    callback: js_sys::Function,
}

impl TextMeasure for JsMeasure {
    fn measure(&self, text: &str) -> Option<f32> {
        self.callback
            .call1(&JsValue::NULL, &JsValue::from_str(text))
            .ok()?
            .as_f64()
            .map(|width| width as f32)
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// WASM-exposed reader wrapper
#[wasm_bindgen]
pub struct WasmReader {
    editor: Editor,
}

#[wasm_bindgen]
impl WasmReader {
    /// Create a reader measuring text with `measure(text) -> width`
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: &str,
        source: &str,
        measure: js_sys::Function,
        viewport_width: f32,
    ) -> Result<WasmReader, JsValue> {
        let config = EditorConfig::from_json(config_json).map_err(to_js)?;
        let measure = Box::new(JsMeasure { callback: measure });
        let editor = Editor::with_text(config, measure, viewport_width, source).map_err(to_js)?;
        Ok(Self { editor })
    }

    /// Create a reader with fixed-advance metrics
    #[wasm_bindgen(js_name = withMonospace)]
    pub fn with_monospace(
        config_json: &str,
        source: &str,
        advance: f32,
        viewport_width: f32,
    ) -> Result<WasmReader, JsValue> {
        let config = EditorConfig::from_json(config_json).map_err(to_js)?;
        let measure = Box::new(FontMetrics::monospace(advance));
        let editor = Editor::with_text(config, measure, viewport_width, source).map_err(to_js)?;
        Ok(Self { editor })
    }

    /// Current surfaces, indicator and caret as JSON
    pub fn render(&self) -> String {
        serde_json::to_string(&RenderData::from_editor(&self.editor)).unwrap_or_default()
    }

    /// Report an edit: `texts` holds the text of every surface, left to
    /// right; the caret is given as a UTF-16 offset into surface `surface`.
    pub fn input(
        &mut self,
        texts: js_sys::Array,
        surface: Option<u32>,
        utf16_offset: Option<u32>,
    ) -> String {
        let texts: Vec<String> = texts
            .iter()
            .map(|value| value.as_string().unwrap_or_default())
            .collect();
        if texts.len() != self.editor.surfaces().len() {
            log::warn!(
                "input for {} surfaces, {} rendered",
                texts.len(),
                self.editor.surfaces().len()
            );
        }
        for (target, text) in self.editor.surfaces_mut().iter_mut().zip(&texts) {
            target.set_text(text);
        }

        let caret = match (surface, utf16_offset) {
            (Some(slot), Some(offset)) => {
                let slot = slot as usize;
                texts.get(slot).and_then(|text| {
                    let chars = crlf_adjusted(text, utf16_to_char_offset(text, offset as usize));
                    let (segment, offset) = self.editor.surfaces().get(slot)?.locate(chars)?;
                    Some(Caret {
                        surface: slot,
                        segment,
                        offset,
                    })
                })
            }
            _ => None,
        };
        self.editor.set_caret(caret);
        self.editor.on_input();
        self.render()
    }

    /// Move one spread: "next" or "prev"
    pub fn navigate(&mut self, direction: &str) -> Result<String, JsValue> {
        let direction: Direction = direction.parse().map_err(to_js)?;
        self.editor.navigate(direction);
        Ok(self.render())
    }

    #[wasm_bindgen(js_name = setViewportWidth)]
    pub fn set_viewport_width(&mut self, width: f32) -> String {
        self.editor.set_viewport_width(width);
        self.render()
    }

    /// Get full document text
    pub fn text(&self) -> String {
        self.editor.text()
    }

    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.editor.page_count()
    }

    /// Surface patches since the last call, as JSON
    #[wasm_bindgen(js_name = takePatches)]
    pub fn take_patches(&mut self) -> String {
        serde_json::to_string(&self.editor.take_patches()).unwrap_or_default()
    }

    /// Queued events ("documentChanged", "navigated"), as JSON
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> String {
        serde_json::to_string(&self.editor.drain_events()).unwrap_or_default()
    }
}

/// Serializable render data for JS
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderData {
    pub page_indicator: String,
    pub page_count: usize,
    pub first_visible: usize,
    pub surfaces: Vec<SurfaceRenderData>,
    pub caret: Option<CaretRenderData>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceRenderData {
    pub page_index: usize,
    pub text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaretRenderData {
    pub surface: usize,
    /// UTF-16 offset into the surface text
    pub offset: usize,
}

impl RenderData {
    fn from_editor(editor: &Editor) -> Self {
        let surfaces: Vec<SurfaceRenderData> = editor
            .surfaces()
            .iter()
            .map(|s| SurfaceRenderData {
                page_index: s.page_index(),
                text: s.text(),
            })
            .collect();

        let caret = editor.caret().and_then(|caret| {
            let surface = editor.surfaces().get(caret.surface)?;
            let chars = surface.offset_of(caret.segment, caret.offset)?;
            Some(CaretRenderData {
                surface: caret.surface,
                offset: char_to_utf16_offset(&surface.text(), chars),
            })
        });

        Self {
            page_indicator: editor.page_indicator(),
            page_count: editor.page_count(),
            first_visible: editor.view().first_visible,
            surfaces,
            caret,
        }
    }
}

/// Char offset for a UTF-16 offset, rounding up out of a surrogate pair
pub fn utf16_to_char_offset(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (idx, c) in text.chars().enumerate() {
        if units >= utf16_offset {
            return idx;
        }
        units += c.len_utf16();
    }
    text.chars().count()
}

/// UTF-16 offset for a char offset
pub fn char_to_utf16_offset(text: &str, char_offset: usize) -> usize {
    text.chars().take(char_offset).map(char::len_utf16).sum()
}

/// Char offset into `text` once its CRLF pairs are folded to `\n`
fn crlf_adjusted(text: &str, char_offset: usize) -> usize {
    let pairs = text
        .chars()
        .take(char_offset)
        .zip(text.chars().skip(1))
        .filter(|&(c, next)| c == '\r' && next == '\n')
        .count();
    char_offset - pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crlf_adjusted_offset() {
        assert_eq!(crlf_adjusted("ab\r\ncd", 5), 4);
        assert_eq!(crlf_adjusted("ab\r\ncd", 3), 2);
        assert_eq!(crlf_adjusted("ab\r\ncd", 2), 2);
        assert_eq!(crlf_adjusted("a\rb", 3), 3);
    }

    #[test]
    fn test_utf16_ascii() {
        assert_eq!(utf16_to_char_offset("hello", 3), 3);
        assert_eq!(char_to_utf16_offset("hello", 3), 3);
    }

    #[test]
    fn test_utf16_surrogate_pairs() {
        let text = "a😀b";
        assert_eq!(char_to_utf16_offset(text, 2), 3);
        assert_eq!(utf16_to_char_offset(text, 3), 2);
        // inside the pair
        assert_eq!(utf16_to_char_offset(text, 2), 2);
    }

    #[test]
    fn test_utf16_past_end() {
        assert_eq!(utf16_to_char_offset("ab", 10), 2);
    }

    #[test]
    fn test_render_data_json() {
        let editor = Editor::with_text(
            EditorConfig::default(),
            Box::new(FontMetrics::monospace(8.0)),
            400.0,
            "hello world",
        )
        .unwrap();
        let json = serde_json::to_value(RenderData::from_editor(&editor)).unwrap();
        assert_eq!(json["pageIndicator"], "1 / 1");
        assert_eq!(json["surfaces"][0]["text"], "hello world\n");
        assert!(json["caret"].is_null());
    }
}
