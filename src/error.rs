//! Error types for configuration and session startup

use thiserror::Error;

/// Errors surfaced while building a pagination session.
///
/// Only configuration problems are fatal. Everything that happens after
/// startup (measurement misses, cursor misses) degrades instead of failing.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid layout metric `{name}`: {value}")]
    InvalidMetric { name: &'static str, value: f32 },

    #[error("available width must be positive (page width {page_width}, padding {padding})")]
    NoAvailableWidth { page_width: f32, padding: f32 },

    #[error("available height must be positive (page height {page_height}, padding {padding})")]
    NoAvailableHeight { page_height: f32, padding: f32 },

    #[error("a page of height {available_height} cannot hold a line of height {line_height}")]
    NoLinesPerPage {
        available_height: f32,
        line_height: f32,
    },

    #[error("config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Crate result alias
pub type Result<T> = std::result::Result<T, Error>;
