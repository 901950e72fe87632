//! Text measurement backends

use unicode_segmentation::UnicodeSegmentation;

/// Measures the rendered width of a string in logical pixels.
///
/// Returning `None` means the backend could not produce a width; callers
/// treat that as zero so a word is always placed rather than dropped.
pub trait TextMeasure {
    fn measure(&self, text: &str) -> Option<f32>;
}

impl<F> TextMeasure for F
where
    F: Fn(&str) -> Option<f32>,
{
    fn measure(&self, text: &str) -> Option<f32> {
        self(text)
    }
}

/// Table-driven advance widths for a single font
#[derive(Debug, Clone)]
pub struct FontMetrics {
    /// Width of ASCII characters (0-127)
    pub char_widths: Vec<f32>,
    /// Default width for non-ASCII characters
    pub default_width: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::for_font_size(16.0)
    }
}

impl FontMetrics {
    pub fn new(char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            char_widths,
            default_width,
        }
    }

    /// Every character advances by the same amount
    pub fn monospace(advance: f32) -> Self {
        Self {
            char_widths: vec![advance; 128],
            default_width: advance,
        }
    }

    /// Approximate proportional serif widths scaled to a pixel font size
    pub fn for_font_size(font_size: f32) -> Self {
        let char_widths = (0u8..128)
            .map(|b| font_size * em_width(b as char))
            .collect();

        Self {
            char_widths,
            default_width: font_size * 0.5,
        }
    }

    /// Get width of a character
    pub fn width(&self, c: char) -> f32 {
        if c.is_ascii() {
            if let Some(w) = self.char_widths.get(c as usize) {
                return *w;
            }
        }
        self.default_width
    }

    /// Width of one grapheme cluster. Combining marks ride on the base character.
    fn cluster_width(&self, grapheme: &str) -> f32 {
        match grapheme.chars().next() {
            Some('\t') => self.default_width * 4.0,
            Some(c) if c.is_control() => 0.0,
            Some(c) => self.width(c),
            None => 0.0,
        }
    }
}

impl TextMeasure for FontMetrics {
    fn measure(&self, text: &str) -> Option<f32> {
        Some(text.graphemes(true).map(|g| self.cluster_width(g)).sum())
    }
}

fn em_width(c: char) -> f32 {
    match c {
        ' ' => 0.25,
        'i' | 'j' | 'l' | 'I' | '.' | ',' | ';' | ':' | '!' | '\'' | '|' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' => 0.35,
        'm' | 'w' => 0.75,
        'M' | 'W' => 0.9,
        'A'..='Z' => 0.65,
        c if c.is_control() => 0.0,
        _ => 0.5,
    }
}
