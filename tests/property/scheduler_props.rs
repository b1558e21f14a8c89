//! Property tests for the scheduling modes.
//!
//! Parallel execution must be invisible in the output: any worker count and
//! either scheduler must reproduce the sequential risk vector exactly, and
//! the metrics must account for every record exactly once.

use proptest::prelude::*;

use reid_scan::scheduler::{assess_dataset, RunConfig, RunMode};
use reid_scan::{Record, RiskParams};

fn dataset_strategy() -> impl Strategy<Value = Vec<Record>> {
    let row = prop::collection::vec(0u8..6, 3)
        .prop_map(|vals| vals.into_iter().map(f32::from).collect::<Vec<f32>>());
    prop::collection::vec(row, 0..40).prop_map(|rows| {
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
    // Threaded cases; keep the case count moderate.
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn parallel_modes_match_sequential(dataset in dataset_strategy(), workers in 1usize..6, h in 1usize..=3) {
        let params = RiskParams { h, eps: 0.3 };
        let config = |mode| RunConfig { mode, params };

        let mut baseline = vec![f32::NAN; dataset.len()];
        assess_dataset(&dataset, &config(RunMode::Sequential), &mut baseline);

        let mut static_risks = vec![f32::NAN; dataset.len()];
        assess_dataset(&dataset, &config(RunMode::Static { workers }), &mut static_risks);
        prop_assert_eq!(&static_risks, &baseline);

        let mut dynamic_risks = vec![f32::NAN; dataset.len()];
        assess_dataset(&dataset, &config(RunMode::Dynamic { workers }), &mut dynamic_risks);
        prop_assert_eq!(&dynamic_risks, &baseline);
    }

    #[test]
    fn dynamic_metrics_account_for_every_record(dataset in dataset_strategy(), workers in 1usize..6) {
        let config = RunConfig {
            mode: RunMode::Dynamic { workers },
            params: RiskParams { h: 1, eps: 0.3 },
        };
        let mut risks = vec![0.0f32; dataset.len()];
        let snapshot = assess_dataset(&dataset, &config, &mut risks);

        prop_assert_eq!(snapshot.workers, workers);
        prop_assert_eq!(snapshot.records, dataset.len() as u64);
        if dataset.is_empty() {
            prop_assert_eq!(snapshot.chunks, 0);
        } else {
            prop_assert!(snapshot.chunks >= 1);
        }
    }
}
