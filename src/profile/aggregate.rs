//! Per-cluster mean vectors over a chosen column set.

use crate::error::{Error, Result};
use crate::table::{ClusterId, Dataset};
use std::collections::BTreeMap;

/// The arithmetic mean of each value column over one cluster's rows.
///
/// Profiles are derived, read-only views: when the underlying dataset is
/// replaced, profiles are rebuilt from scratch, never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterProfile {
    /// The cluster this profile summarizes.
    pub cluster: ClusterId,
    /// How many rows carry this cluster's tag.
    pub row_count: usize,
    /// Column name to mean value, ordered by column name.
    pub means: BTreeMap<String, f64>,
}

impl ClusterProfile {
    /// The mean of one column, or `None` if the column was not aggregated.
    pub fn mean(&self, column: &str) -> Option<f64> {
        self.means.get(column).copied()
    }
}

/// Group rows by cluster id and average each of `value_columns`.
///
/// The output maps cluster id to profile, ordered by cluster id, so
/// iteration (and everything rendered from it) is deterministic. Every id
/// in the result comes from the dataset itself, which is why a zero-row
/// cluster cannot normally occur; if it ever did, it would surface as
/// [`Error::EmptyCluster`] rather than a division by zero.
pub fn aggregate(
    dataset: &Dataset,
    value_columns: &[String],
) -> Result<BTreeMap<ClusterId, ClusterProfile>> {
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let cols: Vec<usize> = value_columns
        .iter()
        .map(|c| dataset.column_index(c))
        .collect::<Result<_>>()?;

    // Accumulate sums and counts per cluster, then divide.
    let mut sums: BTreeMap<ClusterId, (usize, Vec<f64>)> = BTreeMap::new();
    for row in dataset.rows() {
        let entry = sums
            .entry(row.cluster().clone())
            .or_insert_with(|| (0, vec![0.0; cols.len()]));
        entry.0 += 1;
        for (acc, &col) in entry.1.iter_mut().zip(&cols) {
            *acc += dataset.value_at(row.index(), col);
        }
    }

    let mut out = BTreeMap::new();
    for (cluster, (count, totals)) in sums {
        if count == 0 {
            return Err(Error::EmptyCluster { cluster });
        }
        let means = value_columns
            .iter()
            .zip(totals)
            .map(|(name, sum)| (name.clone(), sum / count as f64))
            .collect();
        out.insert(
            cluster.clone(),
            ClusterProfile {
                cluster,
                row_count: count,
                means,
            },
        );
    }
    Ok(out)
}
