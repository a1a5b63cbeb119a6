use clusterfit::{
    aggregate, column_bounds, Cell, Dataset, Matcher, Record, TableSchema, TargetVector,
};
use proptest::prelude::*;

fn schema() -> TableSchema {
    TableSchema::new("cluster", vec!["score"], vec!["x", "y"])
}

fn dataset_from(rows: &[(i64, f64, f64, f64)]) -> Dataset {
    let records: Vec<Record> = rows
        .iter()
        .map(|&(cluster, score, x, y)| {
            Record::from([
                ("cluster".to_string(), Cell::from(cluster)),
                ("score".to_string(), Cell::Number(score)),
                ("x".to_string(), Cell::Number(x)),
                ("y".to_string(), Cell::Number(y)),
            ])
        })
        .collect();
    Dataset::load(schema(), &records).unwrap()
}

proptest! {
    #[test]
    fn prop_bounds_map_own_extremes_to_zero_and_one(
        rows in prop::collection::vec((0i64..4, -100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0), 2..40)
    ) {
        let ds = dataset_from(&rows);
        let bounds = column_bounds(&ds, &["x".to_string()]).unwrap();
        let b = &bounds["x"];

        if !b.is_degenerate() {
            prop_assert_eq!(b.normalize(b.min()).unwrap(), 0.0);
            prop_assert_eq!(b.normalize(b.max()).unwrap(), 1.0);
            for v in ds.column_values("x").unwrap() {
                let n = b.normalize(v).unwrap();
                prop_assert!((0.0..=1.0).contains(&n));
            }
        }
    }

    #[test]
    fn prop_weighted_cluster_means_reconstruct_overall_mean(
        rows in prop::collection::vec((0i64..5, -1000.0f64..1000.0, -10.0f64..10.0, -10.0f64..10.0), 1..60)
    ) {
        let ds = dataset_from(&rows);
        let profiles = aggregate(&ds, &["score".to_string()]).unwrap();

        let total_rows: usize = profiles.values().map(|p| p.row_count).sum();
        prop_assert_eq!(total_rows, ds.len());

        let reconstructed: f64 = profiles
            .values()
            .map(|p| p.mean("score").unwrap() * p.row_count as f64)
            .sum::<f64>() / ds.len() as f64;
        let overall = ds.column_mean("score").unwrap();
        prop_assert!((reconstructed - overall).abs() < 1e-9 * overall.abs().max(1.0));
    }

    #[test]
    fn prop_matching_is_idempotent_and_minimal(
        rows in prop::collection::vec((0i64..4, -10.0f64..10.0, -50.0f64..50.0, -50.0f64..50.0), 1..40),
        probe_x in -60.0f64..60.0,
        probe_y in -60.0f64..60.0,
    ) {
        let ds = dataset_from(&rows);
        let matcher = Matcher::new(["x", "y"]);

        // Same dataset, same target, same answer.
        let target = TargetVector::from_pairs([("x", probe_x), ("y", probe_y)]);
        let first = matcher.find_best_cluster(&ds, &target).unwrap();
        let second = matcher.find_best_cluster(&ds, &target).unwrap();
        prop_assert_eq!(&first, &second);

        // The winning distance is actually minimal over all rows.
        for row in ds.rows() {
            let dx = row.value("x").unwrap() - probe_x;
            let dy = row.value("y").unwrap() - probe_y;
            prop_assert!(dx * dx + dy * dy >= first.distance);
        }

        // A target equal to an existing row matches at distance zero.
        let (_, _, x, y) = rows[0];
        let exact = TargetVector::from_pairs([("x", x), ("y", y)]);
        let hit = matcher.find_best_cluster(&ds, &exact).unwrap();
        prop_assert_eq!(hit.distance, 0.0);
    }
}
