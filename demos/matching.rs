//! Load a small design-space table, summarize its clusters, and match a
//! user-style parameter vector to its nearest cluster.

use clusterfit::{Cell, ClusterId, Record, Session, TableSchema, TargetVector};

fn main() -> clusterfit::Result<()> {
    // Indicators: thermal comfort (UTCI), global warming potential,
    // life-cycle cost. Parameters: tree cover and PV roof coverage, in %.
    let schema = TableSchema::new(
        "cluster",
        vec!["utci", "gwp", "lcc"],
        vec!["trees", "pv_roof"],
    );

    let variants = [
        // cluster, utci, gwp, lcc, trees, pv_roof
        (0, 28.1, 410.0, 1.9, 5.0, 10.0),
        (0, 27.8, 395.0, 2.0, 8.0, 15.0),
        (1, 25.9, 370.0, 2.6, 35.0, 30.0),
        (1, 26.2, 355.0, 2.5, 30.0, 40.0),
        (2, 24.7, 330.0, 3.4, 55.0, 70.0),
        (2, 24.9, 340.0, 3.2, 60.0, 65.0),
    ];
    let records: Vec<Record> = variants
        .iter()
        .map(|&(cluster, utci, gwp, lcc, trees, pv_roof)| {
            Record::from([
                ("cluster".to_string(), Cell::from(cluster)),
                ("utci".to_string(), Cell::Number(utci)),
                ("gwp".to_string(), Cell::Number(gwp)),
                ("lcc".to_string(), Cell::Number(lcc)),
                ("trees".to_string(), Cell::Number(trees)),
                ("pv_roof".to_string(), Cell::Number(pv_roof)),
            ])
        })
        .collect();

    let session = Session::load(schema, &records)?;

    println!("=== Normalized cluster profiles (0 = best observed, 1 = worst) ===");
    for (cluster, columns) in session.normalized_profiles(0.0)? {
        print!("  cluster {cluster}:");
        for name in ["utci", "gwp", "lcc"] {
            print!("  {name} {:.2}", columns[name]);
        }
        println!();
    }

    println!("\n=== Parameter spread within cluster 2 ===");
    for name in ["trees", "pv_roof"] {
        let spread = session.cluster_spread(&ClusterId::Num(2), name)?;
        println!(
            "  {name}: median {:.2} (min {:.2}, max {:.2})",
            spread.median, spread.min, spread.max
        );
    }

    // Suggested defaults are the column means, like a pre-filled form.
    let dataset = session.dataset();
    let mut target = TargetVector::new();
    for p in &dataset.schema().parameter_columns {
        target.set(p.clone(), dataset.column_mean(p)?);
    }
    // The user nudges the design toward heavy greening.
    target.set("trees", 50.0);

    let result = session.matcher().find_best_cluster(dataset, &target)?;
    println!(
        "\nBest matching cluster for {:.0}% trees, {:.1}% PV roof: cluster {} \
         (row {}, squared distance {:.1})",
        target.get("trees").unwrap_or_default(),
        target.get("pv_roof").unwrap_or_default(),
        result.cluster,
        result.row_index,
        result.distance
    );

    Ok(())
}
