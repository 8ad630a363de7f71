use std::ops::Range;

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: i64 = 3;
pub const DEFAULT_OFFSET: i64 = 0;

/// A limit/offset window over an ordered collection.
///
/// Values are kept as requested (possibly negative); [`Page::window`] clamps
/// them against the collection length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Page {
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Index range selected from a collection of `len` items.
    ///
    /// Negative values clamp to zero; an offset at or past `len` yields an
    /// empty range.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = clamp_to(self.offset, len);
        let take = clamp_to(self.limit, len);
        let end = start.saturating_add(take).min(len);
        start..end
    }
}

fn clamp_to(value: i64, len: usize) -> usize {
    usize::try_from(value.max(0)).map_or(len, |v| v.min(len))
}
