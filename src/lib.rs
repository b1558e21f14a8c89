//! Re-identification risk scanner for tabular datasets.
//!
//! ## Scope
//! For every record in a dataset, this crate estimates the probability that an
//! adversary who knows `h` feature columns (with relative tolerance `eps`)
//! could uniquely single the record out. Risk is the inverse of the smallest
//! match count observed over all size-`h` feature subsets, with an early exit
//! at `1.0` when any subset isolates the record.
//!
//! ## Key invariants
//! - The dataset is immutable for the whole run and shared by all workers
//!   without copying.
//! - Every risk slot is written exactly once. Disjointness is enforced by the
//!   type system: the emitter splits the risk vector into exclusive
//!   `&mut [f32]` grants, one per chunk, off a single cursor.
//! - Chunks handed out over one run are pairwise disjoint and cover `[0, n)`
//!   exactly once, so the parallel modes are bit-for-bit equal to the
//!   sequential baseline.
//! - Shutdown travels in-band: each worker receives exactly one
//!   `Task::EndOfWork` through its chunk queue.
//!
//! ## Run flow
//! `CSV -> Vec<Record> -> (sequential | static | dynamic) -> Vec<f32> -> sink`
//!
//! ## Notable entry points
//! - [`assess_risk`]: single-record risk score.
//! - [`assess_dataset`]: whole-dataset run under a [`RunConfig`].
//! - [`read_records`] / [`write_risk`]: CSV boundary.
//! - [`cli::run`]: shared driver for the binary variants.

pub mod cli;
pub mod dataset;
pub mod output;
pub mod risk;
pub mod scheduler;
pub mod stdx;
pub mod util;

pub use dataset::{read_records, write_risk, DatasetError, ParsePolicy, Record};
pub use output::{FileSink, OutputSink, StdoutSink, VecSink};
pub use risk::{assess_risk, RiskParams};
pub use scheduler::{
    assess_dataset, ConfigError, MetricsSnapshot, RunConfig, RunMode, WorkerMetrics,
};
