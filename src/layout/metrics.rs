//! Page geometry and the metrics provider used by the paginator

use crate::error::{Error, Result};
use crate::layout::font::TextMeasure;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layout constants supplied by the visual configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutMetrics {
    pub page_width: f32,
    pub page_height: f32,
    pub padding: f32,
    pub font_size: f32,
    pub line_height_factor: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            page_width: 400.0,
            page_height: 600.0,
            padding: 40.0,
            font_size: 16.0,
            line_height_factor: 1.5,
        }
    }
}

/// Quantities derived from [`LayoutMetrics`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedMetrics {
    pub line_height: f32,
    pub available_width: f32,
    pub available_height: f32,
    pub max_lines_per_page: usize,
}

impl LayoutMetrics {
    /// Validate the configuration and compute the usable page area.
    ///
    /// Fails when no line could ever be placed on a page.
    pub fn derive(&self) -> Result<DerivedMetrics> {
        positive("pageWidth", self.page_width)?;
        positive("pageHeight", self.page_height)?;
        positive("fontSize", self.font_size)?;
        positive("lineHeightFactor", self.line_height_factor)?;
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(Error::InvalidMetric {
                name: "padding",
                value: self.padding,
            });
        }

        let line_height = self.font_size * self.line_height_factor;

        let available_width = self.page_width - self.padding * 2.0;
        if available_width <= 0.0 {
            return Err(Error::NoAvailableWidth {
                page_width: self.page_width,
                padding: self.padding,
            });
        }

        let available_height = self.page_height - self.padding * 2.0;
        if available_height <= 0.0 {
            return Err(Error::NoAvailableHeight {
                page_height: self.page_height,
                padding: self.padding,
            });
        }

        let max_lines_per_page = (available_height / line_height).floor() as usize;
        if max_lines_per_page == 0 {
            return Err(Error::NoLinesPerPage {
                available_height,
                line_height,
            });
        }

        Ok(DerivedMetrics {
            line_height,
            available_width,
            available_height,
            max_lines_per_page,
        })
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidMetric { name, value })
    }
}

/// Derived layout constants plus the width measurement consistent with
/// the rendering font. Read-only for the lifetime of a session.
pub struct MetricsProvider {
    metrics: LayoutMetrics,
    derived: DerivedMetrics,
    measure: Box<dyn TextMeasure>,
}

impl MetricsProvider {
    pub fn new(metrics: LayoutMetrics, measure: Box<dyn TextMeasure>) -> Result<Self> {
        let derived = metrics.derive()?;
        log::debug!(
            "layout metrics: width {} height {} lines/page {}",
            derived.available_width,
            derived.available_height,
            derived.max_lines_per_page
        );
        Ok(Self {
            metrics,
            derived,
            measure,
        })
    }

    pub fn metrics(&self) -> &LayoutMetrics {
        &self.metrics
    }

    pub fn derived(&self) -> &DerivedMetrics {
        &self.derived
    }

    pub fn available_width(&self) -> f32 {
        self.derived.available_width
    }

    pub fn max_lines_per_page(&self) -> usize {
        self.derived.max_lines_per_page
    }

    /// Measured width of `text`. A backend miss counts as zero width.
    pub fn measure_width(&self, text: &str) -> f32 {
        match self.measure.measure(text) {
            Some(width) if width.is_finite() => width,
            _ => {
                log::warn!("text measurement failed for {:?}; using width 0", text);
                0.0
            }
        }
    }
}

impl fmt::Debug for MetricsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricsProvider")
            .field("metrics", &self.metrics)
            .field("derived", &self.derived)
            .finish_non_exhaustive()
    }
}
