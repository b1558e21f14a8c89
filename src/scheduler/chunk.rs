//! Chunk semantics and partitioning policies.
//!
//! A chunk is a half-open range of dataset indices assigned as one unit of
//! work. Chunks issued over one run are pairwise disjoint and their union is
//! exactly `[0, n)`; the dynamic emitter enforces this with a single cursor,
//! the static partitioner by construction.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Half-open range of dataset indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// First index covered.
    pub begin: usize,
    /// One past the last index covered.
    pub end: usize,
}

impl Chunk {
    /// Number of indices covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Whether the chunk covers nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// The chunk as a standard range.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.begin..self.end
    }
}

/// Chunk size for the dynamic emitter: half of a naive equal split.
///
/// Halving leaves headroom for rebalancing: a fast worker drains its chunk
/// early and requests more, so uneven per-record cost evens out across the
/// pool. Clamped to at least 1 so the cursor always advances; with the
/// unclamped `n / (2 * workers)` the emitter would hand out empty chunks
/// forever whenever `n < 2 * workers`.
pub fn dynamic_chunk_size(n: usize, workers: usize) -> usize {
    assert!(workers > 0, "workers must be > 0");
    (n / (2 * workers)).max(1)
}

/// Partition `[0, n)` into exactly `workers` contiguous chunks of `n /
/// workers` indices, the last absorbing the `n % workers` remainder.
///
/// No feedback, no rebalancing: each worker processes its fixed range once.
/// When `workers > n` the trailing chunks are empty.
pub fn static_partition(n: usize, workers: usize) -> Vec<Chunk> {
    assert!(workers > 0, "workers must be > 0");
    let base = n / workers;
    let mut chunks = Vec::with_capacity(workers);
    let mut begin = 0;
    for w in 0..workers {
        let end = if w == workers - 1 { n } else { begin + base };
        chunks.push(Chunk { begin, end });
        begin = end;
    }
    chunks
}
