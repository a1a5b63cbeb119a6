//! Presentation-facing numeric series.
//!
//! The dashboards this crate serves draw two kinds of summary: a bar chart
//! of normalized per-cluster indicator means (how each cluster ranks on
//! comfort, environmental impact, and cost), and box plots of normalized
//! parameter distributions within a selected cluster, with the median
//! marked. This module produces the numbers for both; rendering stays with
//! the presentation collaborator.

use super::aggregate::ClusterProfile;
use super::bounds::ColumnBounds;
use crate::error::{Error, Result};
use crate::table::{ClusterId, Dataset};
use std::collections::BTreeMap;

/// Push each cluster mean through its column's full-dataset bounds.
///
/// Returns `cluster id → (column → normalized mean)`, both levels ordered.
/// Means are averages of in-range values, so every output lands in
/// `[0, 1]`.
///
/// `degenerate_fill` is the explicit display policy for constant columns:
/// a column with `min == max` carries no discriminative signal, so its
/// entry takes the fill value (typically `0.0`) instead of failing the
/// whole chart. Callers that would rather fail can use
/// [`ColumnBounds::normalize`] directly.
pub fn normalized_profiles(
    profiles: &BTreeMap<ClusterId, ClusterProfile>,
    bounds: &BTreeMap<String, ColumnBounds>,
    degenerate_fill: f64,
) -> Result<BTreeMap<ClusterId, BTreeMap<String, f64>>> {
    let mut out = BTreeMap::new();
    for (cluster, profile) in profiles {
        let mut scaled = BTreeMap::new();
        for (column, &mean) in &profile.means {
            let b = bounds.get(column).ok_or_else(|| Error::UnknownColumn {
                column: column.clone(),
            })?;
            let value = if b.is_degenerate() {
                degenerate_fill
            } else {
                b.normalize(mean)?
            };
            scaled.insert(column.clone(), value);
        }
        out.insert(cluster.clone(), scaled);
    }
    Ok(out)
}

/// The normalized values of one column restricted to one cluster's rows,
/// in load order.
///
/// This is the raw input of a per-cluster box plot. The column is the one
/// the bounds were observed on; a cluster id not present in the dataset
/// fails with [`Error::EmptyCluster`], and a degenerate column with
/// [`Error::DegenerateColumn`].
pub fn cluster_series(
    dataset: &Dataset,
    cluster: &ClusterId,
    bounds: &ColumnBounds,
) -> Result<Vec<f64>> {
    let col = dataset.column_index(bounds.column())?;

    let mut raw = Vec::new();
    for row in dataset.rows() {
        if row.cluster() == cluster {
            raw.push(dataset.value_at(row.index(), col));
        }
    }
    if raw.is_empty() {
        return Err(Error::EmptyCluster {
            cluster: cluster.clone(),
        });
    }

    raw.into_iter().map(|v| bounds.normalize(v)).collect()
}

/// Five-number summary of a value series: min, quartiles, max.
///
/// Quartiles use linear interpolation between order statistics, matching
/// what the plotting stacks these numbers feed into compute themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spread {
    /// Smallest value.
    pub min: f64,
    /// First quartile.
    pub q1: f64,
    /// Median.
    pub median: f64,
    /// Third quartile.
    pub q3: f64,
    /// Largest value.
    pub max: f64,
}

impl Spread {
    /// Summarize a non-empty series.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Linear-interpolation quantile of an ascending-sorted non-empty slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (h - lo as f64)
}
