//! Property tests for the risk kernel.
//!
//! Risks come from match counts over subset masks, so every value must be a
//! reciprocal of an integer in `1..=n`, and structural facts about the
//! dataset (duplicates, uniqueness) must show up in the scores.

use proptest::prelude::*;

use reid_scan::risk::{assess_risk, RiskParams};
use reid_scan::Record;

fn dataset_strategy(max_records: usize, features: usize) -> impl Strategy<Value = Vec<Record>> {
    // Small integer-valued features so duplicate rows actually occur.
    let row = prop::collection::vec(0u8..8, features).prop_map(|vals| {
        vals.into_iter().map(f32::from).collect::<Vec<f32>>()
    });
    prop::collection::vec(row, 1..=max_records).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, features)| Record {
                id: format!("r{}", i),
                features,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn risk_is_a_reciprocal_count(dataset in dataset_strategy(12, 3), h in 1usize..=3, eps in 0.0f32..1.0) {
        let params = RiskParams { h, eps };
        let n = dataset.len();
        for record in &dataset {
            let risk = assess_risk(record, &dataset, params);
            prop_assert!(risk > 0.0 && risk <= 1.0, "risk {} out of range", risk);
            let count = (1.0 / risk).round() as usize;
            prop_assert!(count >= 1 && count <= n, "implied count {} outside 1..={}", count, n);
            prop_assert!((1.0 / count as f32 - risk).abs() < 1e-6);
        }
    }

    #[test]
    fn duplicated_record_never_scores_one(dataset in dataset_strategy(8, 3), h in 1usize..=3) {
        // Clone the first row; with at least two identical rows no subset of
        // features can single either copy out.
        let mut dataset = dataset;
        let mut dup = dataset[0].clone();
        dup.id = "dup".to_owned();
        dataset.push(dup);

        let params = RiskParams { h, eps: 0.0 };
        let risk = assess_risk(&dataset[0], &dataset, params);
        prop_assert!(risk <= 0.5, "duplicated record scored {}", risk);
    }

    #[test]
    fn shrinking_h_never_raises_risk(dataset in dataset_strategy(10, 4), eps in 0.0f32..0.5) {
        // A smaller background means coarser subsets and never fewer matches,
        // so risk is monotone non-decreasing in h.
        for record in &dataset {
            let mut prev = 0.0f32;
            for h in 1..=4 {
                let risk = assess_risk(record, &dataset, RiskParams { h, eps });
                prop_assert!(risk >= prev, "risk dropped from {} to {} at h={}", prev, risk, h);
                prev = risk;
            }
        }
    }

    #[test]
    fn widening_eps_never_raises_risk(dataset in dataset_strategy(10, 3), h in 1usize..=3) {
        // A wider tolerance band can only admit more matches per mask.
        for record in &dataset {
            let tight = assess_risk(record, &dataset, RiskParams { h, eps: 0.0 });
            let loose = assess_risk(record, &dataset, RiskParams { h, eps: 0.5 });
            prop_assert!(loose <= tight, "eps widening raised risk {} -> {}", tight, loose);
        }
    }
}
