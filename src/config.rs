//! Session configuration loaded from JSON

use crate::error::Result;
use crate::layout::LayoutMetrics;
use serde::{Deserialize, Serialize};

/// Viewport width above which two pages are shown side by side
pub const DEFAULT_SPREAD_MIN_VIEWPORT: f32 = 900.0;

/// Runtime configuration for an editing session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Page geometry and font
    pub metrics: LayoutMetrics,
    /// Viewports strictly wider than this render a two-page spread
    pub spread_min_viewport: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            metrics: LayoutMetrics::default(),
            spread_min_viewport: DEFAULT_SPREAD_MIN_VIEWPORT,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing keys fall back to defaults.
    ///
    /// The metrics are validated here too, so a bad configuration is
    /// reported before any text is paginated.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.metrics.derive()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_partial_metrics() {
        let config =
            EditorConfig::from_json(r#"{"metrics": {"pageWidth": 500, "padding": 20}, "spreadMinViewport": 1200}"#)
                .unwrap();
        assert_eq!(config.metrics.page_width, 500.0);
        assert_eq!(config.metrics.padding, 20.0);
        assert_eq!(config.metrics.font_size, LayoutMetrics::default().font_size);
        assert_eq!(config.spread_min_viewport, 1200.0);
    }

    #[test]
    fn test_malformed_json() {
        let err = EditorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_invalid_metrics_rejected() {
        let err = EditorConfig::from_json(r#"{"metrics": {"pageWidth": 80, "padding": 40}}"#)
            .unwrap_err();
        assert!(matches!(err, Error::NoAvailableWidth { .. }));
    }
}
