//! Per-worker run counters and their aggregated snapshot.
//!
//! Workers keep plain local counters (no atomics; each worker owns its own
//! struct) and hand them back when joined. The driver aggregates them into a
//! [`MetricsSnapshot`] for the end-of-run stats line.

use serde::Serialize;

/// Counters owned by one worker for one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct WorkerMetrics {
    /// Chunks this worker processed.
    pub chunks: u64,
    /// Records this worker assessed.
    pub records: u64,
}

impl WorkerMetrics {
    /// Account for one processed chunk of `len` records.
    #[inline]
    pub fn record_chunk(&mut self, len: usize) {
        self.chunks += 1;
        self.records += len as u64;
    }
}

/// Aggregated view over all workers of one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    /// Workers that participated (1 for the sequential mode).
    pub workers: usize,
    /// Total chunks issued and processed.
    pub chunks: u64,
    /// Total records assessed.
    pub records: u64,
}

impl MetricsSnapshot {
    /// Sum per-worker counters into one snapshot.
    pub fn aggregate(per_worker: &[WorkerMetrics]) -> Self {
        let mut snap = Self {
            workers: per_worker.len(),
            ..Self::default()
        };
        for m in per_worker {
            snap.chunks += m.chunks;
            snap.records += m.records;
        }
        snap
    }
}
