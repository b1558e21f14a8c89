//! Run modes and work distribution for whole-dataset assessment.
//!
//! # Modes
//!
//! - **Sequential**: plain loop on the calling thread; the correctness
//!   baseline for the parallel modes.
//! - **Static**: one fixed contiguous range per worker, no feedback. Cheap,
//!   but skewed per-record cost leaves workers idle.
//! - **Dynamic**: emitter + feedback queue handing out half-size chunks on
//!   demand ([`dynamic`]); adapts to heterogeneous record cost.
//!
//! All modes share the same per-range kernel
//! ([`assess_range`](crate::risk::assess_range)), so the risk vector they
//! produce is bit-for-bit identical regardless of mode, worker count, or
//! scheduling order.

pub mod chunk;
pub mod dynamic;
pub mod metrics;

pub use chunk::{dynamic_chunk_size, static_partition, Chunk};
pub use dynamic::assess_dynamic;
pub use metrics::{MetricsSnapshot, WorkerMetrics};

use crate::dataset::Record;
use crate::risk::{assess_range, RiskParams};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;
use std::thread;

/// Which execution strategy a run uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunMode {
    /// Everything on the calling thread.
    Sequential,
    /// Fixed equal partition, one range per worker.
    Static { workers: usize },
    /// Emitter-driven chunking with a feedback queue.
    Dynamic { workers: usize },
}

impl RunMode {
    /// Short label for the stats line.
    pub fn label(&self) -> &'static str {
        match self {
            RunMode::Sequential => "sequential",
            RunMode::Static { .. } => "static",
            RunMode::Dynamic { .. } => "dynamic",
        }
    }
}

/// Configuration for one whole-dataset run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub mode: RunMode,
    pub params: RiskParams,
}

impl RunConfig {
    /// Validate against the dataset's feature arity.
    ///
    /// Must pass before any worker is spawned; every error here is a
    /// configuration error the caller reports and exits on.
    pub fn validate(&self, feature_count: usize) -> Result<(), ConfigError> {
        if let RunMode::Static { workers: 0 } | RunMode::Dynamic { workers: 0 } = self.mode {
            return Err(ConfigError::ZeroWorkers);
        }
        if self.params.h > feature_count {
            return Err(ConfigError::BackgroundExceedsFeatures {
                h: self.params.h,
                features: feature_count,
            });
        }
        if !(self.params.eps >= 0.0) {
            return Err(ConfigError::EpsilonOutOfRange {
                eps: self.params.eps,
            });
        }
        Ok(())
    }
}

/// Configuration errors, all fatal before the run starts.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// A parallel mode was requested with zero workers.
    ZeroWorkers,
    /// Background knowledge size exceeds the dataset's feature count; the
    /// size-`h` mask universe would be empty.
    BackgroundExceedsFeatures { h: usize, features: usize },
    /// Epsilon is negative or NaN.
    EpsilonOutOfRange { eps: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroWorkers => write!(f, "parallel mode requires at least one worker"),
            ConfigError::BackgroundExceedsFeatures { h, features } => write!(
                f,
                "background knowledge size {} exceeds feature count {}",
                h, features
            ),
            ConfigError::EpsilonOutOfRange { eps } => {
                write!(f, "epsilon must be a non-negative number, got {}", eps)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Assess every record of `dataset` into `risks` under `config`.
///
/// The risk vector must be pre-allocated to the dataset length; the caller
/// keeps ownership and hands slices out only for the duration of the run.
/// Returns the aggregated run counters.
///
/// # Panics
///
/// Panics on a length mismatch, an invalid configuration (callers validate
/// with [`RunConfig::validate`] first), or a worker panic.
pub fn assess_dataset(dataset: &[Record], config: &RunConfig, risks: &mut [f32]) -> MetricsSnapshot {
    assert_eq!(dataset.len(), risks.len(), "risk vector length mismatch");
    assert!(
        dataset.is_empty() || config.params.h <= dataset[0].features.len(),
        "unvalidated configuration"
    );

    let per_worker = match config.mode {
        RunMode::Sequential => {
            let mut metrics = WorkerMetrics::default();
            assess_range(dataset, 0..dataset.len(), config.params, risks);
            metrics.record_chunk(dataset.len());
            vec![metrics]
        }
        RunMode::Static { workers } => assess_static(dataset, config.params, workers, risks),
        RunMode::Dynamic { workers } => assess_dynamic(dataset, config.params, workers, risks),
    };
    MetricsSnapshot::aggregate(&per_worker)
}

/// Static mode: partition once, spawn one worker per fixed range, join.
///
/// Ranges are handed out as exclusive sub-slices of the risk vector, same
/// ownership story as the dynamic mode but with no queues at all.
fn assess_static(
    dataset: &[Record],
    params: RiskParams,
    workers: usize,
    risks: &mut [f32],
) -> Vec<WorkerMetrics> {
    let chunks = static_partition(dataset.len(), workers);
    let mut rest = risks;

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(chunks.len());
        for &chunk in &chunks {
            let (out, tail) = mem::take(&mut rest).split_at_mut(chunk.len());
            rest = tail;
            handles.push(scope.spawn(move || {
                assess_range(dataset, chunk.range(), params, out);
                let mut metrics = WorkerMetrics::default();
                metrics.record_chunk(chunk.len());
                metrics
            }));
        }
        handles
            .into_iter()
            .map(|handle| handle.join().expect("risk worker panicked"))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record {
                id: format!("r{}", i),
                features: vec![(i % 5) as f32, (i / 5) as f32],
            })
            .collect()
    }

    #[test]
    fn validate_accepts_defaults() {
        let config = RunConfig {
            mode: RunMode::Dynamic { workers: 4 },
            params: RiskParams { h: 2, eps: 0.3 },
        };
        assert!(config.validate(2).is_ok());
    }

    #[test]
    fn validate_rejects_h_above_feature_count() {
        let config = RunConfig {
            mode: RunMode::Sequential,
            params: RiskParams { h: 3, eps: 0.3 },
        };
        assert_eq!(
            config.validate(2),
            Err(ConfigError::BackgroundExceedsFeatures { h: 3, features: 2 })
        );
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let config = RunConfig {
            mode: RunMode::Static { workers: 0 },
            params: RiskParams::default(),
        };
        assert_eq!(config.validate(4), Err(ConfigError::ZeroWorkers));
    }

    #[test]
    fn validate_rejects_nan_epsilon() {
        let config = RunConfig {
            mode: RunMode::Sequential,
            params: RiskParams {
                h: 1,
                eps: f32::NAN,
            },
        };
        assert!(matches!(
            config.validate(4),
            Err(ConfigError::EpsilonOutOfRange { .. })
        ));
    }

    #[test]
    fn all_modes_agree_bit_for_bit() {
        let dataset = dataset(30);
        let params = RiskParams { h: 1, eps: 0.25 };

        let mut baseline = vec![0.0f32; dataset.len()];
        assess_dataset(
            &dataset,
            &RunConfig {
                mode: RunMode::Sequential,
                params,
            },
            &mut baseline,
        );

        for workers in [1, 2, 7] {
            for mode in [RunMode::Static { workers }, RunMode::Dynamic { workers }] {
                let mut risks = vec![f32::NAN; dataset.len()];
                assess_dataset(&dataset, &RunConfig { mode, params }, &mut risks);
                assert_eq!(risks, baseline, "mode={:?}", mode);
            }
        }
    }

    #[test]
    fn static_mode_counts_one_chunk_per_worker() {
        let dataset = dataset(10);
        let params = RiskParams { h: 1, eps: 0.0 };
        let mut risks = vec![0.0f32; 10];
        let snap = assess_dataset(
            &dataset,
            &RunConfig {
                mode: RunMode::Static { workers: 3 },
                params,
            },
            &mut risks,
        );
        assert_eq!(snap.workers, 3);
        assert_eq!(snap.chunks, 3);
        assert_eq!(snap.records, 10);
    }

    #[test]
    fn sequential_snapshot_is_single_worker() {
        let dataset = dataset(4);
        let mut risks = vec![0.0f32; 4];
        let snap = assess_dataset(
            &dataset,
            &RunConfig {
                mode: RunMode::Sequential,
                params: RiskParams { h: 1, eps: 0.3 },
            },
            &mut risks,
        );
        assert_eq!(snap.workers, 1);
        assert_eq!(snap.chunks, 1);
        assert_eq!(snap.records, 4);
    }
}
