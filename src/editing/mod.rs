//! Editing model: caret tracking across reflows

mod cursor;

pub use cursor::{CursorPosition, CursorTracker};
