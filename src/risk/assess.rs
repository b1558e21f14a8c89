//! Per-record risk scoring.
//!
//! # Algorithm
//!
//! For a record `u` and background knowledge size `h`, every size-`h` subset
//! of the feature columns is enumerated. Under each subset mask the number of
//! dataset records matching `u` (including `u` itself) is counted. A count of
//! exactly 1 means that subset isolates `u`: risk is 1.0 and enumeration
//! stops early. Otherwise risk is `1 / min_count` over all `C(F, h)` masks.
//!
//! Cost per record is `O(C(F, h) * n)`; the whole-dataset cost is
//! `O(n^2 * C(F, h))`, compute-bound and embarrassingly parallel across
//! records.
//!
//! # Matching asymmetry
//!
//! The tolerance band is centered on the candidate record `v`:
//! `v[j] - v[j]*eps <= u[j] <= v[j] + v[j]*eps`. `matches(u, v)` is therefore
//! not `matches(v, u)`. The asymmetry affects reported risk and is preserved
//! deliberately; do not "fix" it to a symmetric band.

use super::combinations::Combinations;
use super::RiskParams;
use crate::dataset::Record;
use std::ops::Range;

/// Does `u` fall inside `v`'s tolerance band on every masked feature?
///
/// Note the band is relative to `v`'s magnitude: a negative `v[j]` with
/// `eps > 0` produces an inverted (empty) band, in which case nothing
/// matches on that feature, not even `v` itself.
#[inline]
pub fn matches(u: &Record, v: &Record, eps: f32, mask: &[bool]) -> bool {
    debug_assert_eq!(u.features.len(), mask.len());
    debug_assert_eq!(v.features.len(), mask.len());
    for (j, &selected) in mask.iter().enumerate() {
        if !selected {
            continue;
        }
        let center = v.features[j];
        let lo = center - center * eps;
        let hi = center + center * eps;
        if u.features[j] < lo || u.features[j] > hi {
            return false;
        }
    }
    true
}

/// Count dataset records matching `u` under one combination mask.
///
/// `u` is itself part of the dataset, so for `eps >= 0` and non-negative
/// features the count is at least 1.
pub fn count_matches(u: &Record, dataset: &[Record], eps: f32, mask: &[bool]) -> usize {
    dataset.iter().filter(|v| matches(u, v, eps, mask)).count()
}

/// Risk score for one record: `1 / min_count` over all size-`h` masks, with
/// an early exit at 1.0 when some mask yields a unique match.
///
/// # Preconditions
///
/// `params.h <= record.features.len()`; the boundary rejects anything else as
/// a configuration error before workers are spawned.
pub fn assess_risk(record: &Record, dataset: &[Record], params: RiskParams) -> f32 {
    debug_assert!(params.h <= record.features.len());

    let mut min_matches = usize::MAX;
    let mut comb = Combinations::new(record.features.len(), params.h);
    loop {
        let count = count_matches(record, dataset, params.eps, comb.mask());
        if count == 1 {
            return 1.0;
        }
        min_matches = min_matches.min(count);
        if !comb.advance() {
            break;
        }
    }
    1.0 / min_matches as f32
}

/// Assess every record in `range`, writing into the caller's exclusive
/// output slice. This is the unit of work shared by all run modes.
pub fn assess_range(dataset: &[Record], range: Range<usize>, params: RiskParams, out: &mut [f32]) {
    debug_assert_eq!(out.len(), range.len());
    for (slot, i) in out.iter_mut().zip(range) {
        *slot = assess_risk(&dataset[i], dataset, params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, features: &[f32]) -> Record {
        Record {
            id: id.to_string(),
            features: features.to_vec(),
        }
    }

    #[test]
    fn identical_records_share_risk_one_third() {
        // 3 identical records, h=1: every mask matches all 3.
        let dataset = vec![
            record("a", &[1.0, 2.0]),
            record("b", &[1.0, 2.0]),
            record("c", &[1.0, 2.0]),
        ];
        let params = RiskParams { h: 1, eps: 0.3 };
        for r in &dataset {
            let risk = assess_risk(r, &dataset, params);
            assert!((risk - 1.0 / 3.0).abs() < f32::EPSILON);
        }
    }

    #[test]
    fn unique_feature_value_gives_risk_one() {
        // "c" is unique on the second feature with eps=0.
        let dataset = vec![
            record("a", &[1.0, 5.0]),
            record("b", &[1.0, 5.0]),
            record("c", &[1.0, 9.0]),
        ];
        let params = RiskParams { h: 1, eps: 0.0 };
        assert_eq!(assess_risk(&dataset[2], &dataset, params), 1.0);
        // The other two are indistinguishable from each other on every
        // single feature: min match count 2.
        assert_eq!(assess_risk(&dataset[0], &dataset, params), 0.5);
        assert_eq!(assess_risk(&dataset[1], &dataset, params), 0.5);
    }

    #[test]
    fn matching_band_is_asymmetric() {
        let u = record("u", &[5.0]);
        let w = record("w", &[4.0]);
        let mask = [true];
        // Band around w with eps=0.2 is [3.2, 4.8]: excludes 5.0.
        assert!(!matches(&u, &w, 0.2, &mask));
        // Band around u with eps=0.2 is [4.0, 6.0]: includes 4.0.
        assert!(matches(&w, &u, 0.2, &mask));
    }

    #[test]
    fn eps_zero_requires_exact_equality() {
        let u = record("u", &[1.0, 2.0]);
        let v = record("v", &[1.0, 2.0000005]);
        assert!(matches(&u, &v, 0.0, &[true, false]));
        assert!(!matches(&u, &v, 0.0, &[true, true]));
    }

    #[test]
    fn h_zero_matches_everything() {
        // One empty mask: every record matches every other, risk = 1/n.
        let dataset = vec![
            record("a", &[1.0]),
            record("b", &[100.0]),
            record("c", &[-7.0]),
            record("d", &[0.5]),
        ];
        let params = RiskParams { h: 0, eps: 0.0 };
        for r in &dataset {
            assert_eq!(assess_risk(r, &dataset, params), 0.25);
        }
    }

    #[test]
    fn h_equals_feature_count_uses_all_features() {
        let dataset = vec![
            record("a", &[1.0, 2.0, 3.0]),
            record("b", &[1.0, 2.0, 4.0]),
        ];
        let params = RiskParams { h: 3, eps: 0.0 };
        assert_eq!(assess_risk(&dataset[0], &dataset, params), 1.0);
        assert_eq!(assess_risk(&dataset[1], &dataset, params), 1.0);
    }

    #[test]
    fn assess_range_matches_per_record_calls() {
        let dataset: Vec<Record> = (0..6)
            .map(|i| record(&format!("r{}", i), &[i as f32, (i % 3) as f32]))
            .collect();
        let params = RiskParams { h: 1, eps: 0.1 };

        let mut out = vec![0.0f32; 4];
        assess_range(&dataset, 1..5, params, &mut out);

        for (k, i) in (1..5).enumerate() {
            assert_eq!(out[k], assess_risk(&dataset[i], &dataset, params));
        }
    }
}
