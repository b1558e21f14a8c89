//! Combinatorial re-identification risk core.
//!
//! Pure computation: no I/O, no threads. The scheduler drives
//! [`assess_range`](assess::assess_range) over disjoint index ranges; each
//! record's assessment reads the whole dataset but writes only its own slot,
//! which is what makes the parallel modes trivially equivalent to the
//! sequential baseline.

pub mod assess;
pub mod combinations;

pub use assess::{assess_range, assess_risk, count_matches, matches};
pub use combinations::Combinations;

use serde::{Deserialize, Serialize};

/// Parameters of one risk assessment run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskParams {
    /// Background knowledge size: number of feature columns the adversary is
    /// assumed to know.
    pub h: usize,
    /// Relative tolerance applied when comparing feature values. The band is
    /// centered on the candidate record's value, so matching is asymmetric.
    pub eps: f32,
}

impl Default for RiskParams {
    fn default() -> Self {
        Self { h: 1, eps: 0.3 }
    }
}
