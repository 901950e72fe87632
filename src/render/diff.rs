//! Surface diff protocol: tells a shell which regions actually changed

use crate::render::Surface;
use rustc_hash::FxHasher;
use serde::Serialize;
use std::hash::{Hash, Hasher};

/// A single patch operation for the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SurfacePatch {
    /// Region `slot` now shows different content
    #[serde(rename_all = "camelCase")]
    Replace {
        slot: usize,
        page_index: usize,
        text: String,
    },
    /// A new region appears at `slot`
    #[serde(rename_all = "camelCase")]
    Insert {
        slot: usize,
        page_index: usize,
        text: String,
    },
    /// Region `slot` goes away
    Remove { slot: usize },
}

/// Remembers what was last rendered in each slot
#[derive(Debug, Default)]
pub struct SurfaceDiff {
    previous: Vec<(usize, u64)>,
}

impl SurfaceDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `current` against the previous render and remember it
    pub fn compute(&mut self, current: &[Surface]) -> Vec<SurfacePatch> {
        let mut patches = Vec::new();
        let next: Vec<(usize, u64)> = current
            .iter()
            .map(|s| (s.page_index(), content_hash(s)))
            .collect();

        for (slot, surface) in current.iter().enumerate() {
            match self.previous.get(slot) {
                Some(prev) if *prev == next[slot] => {}
                Some(_) => patches.push(SurfacePatch::Replace {
                    slot,
                    page_index: surface.page_index(),
                    text: surface.text(),
                }),
                None => patches.push(SurfacePatch::Insert {
                    slot,
                    page_index: surface.page_index(),
                    text: surface.text(),
                }),
            }
        }

        for slot in (current.len()..self.previous.len()).rev() {
            patches.push(SurfacePatch::Remove { slot });
        }

        self.previous = next;
        patches
    }

    /// Forget the previous render so the next one is sent in full
    pub fn reset(&mut self) {
        self.previous.clear();
    }
}

fn content_hash(surface: &Surface) -> u64 {
    let mut hasher = FxHasher::default();
    for segment in surface.segments() {
        segment.hash(&mut hasher);
    }
    hasher.finish()
}
