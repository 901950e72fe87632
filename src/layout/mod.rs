//! Layout: metrics, measurement, line breaking and pagination

pub mod font;
mod line_break;
mod metrics;
mod pagination;

pub use font::{FontMetrics, TextMeasure};
pub use line_break::LineBreaker;
pub use metrics::{DerivedMetrics, LayoutMetrics, MetricsProvider};
pub use pagination::{paginate, PARAGRAPH_SEPARATOR};
