//! Per-column min-max bounds and the [0, 1] rescaling built on them.

use crate::error::{Error, Result};
use crate::table::Dataset;
use std::collections::BTreeMap;

/// Observed `(min, max)` of one column over a full dataset.
///
/// Bounds are a property of the dataset, computed once and reused: every
/// consumer that rescales a value for this column must key it to the same
/// bounds, or cross-chart comparisons silently stop meaning anything.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnBounds {
    column: String,
    min: f64,
    max: f64,
}

impl ColumnBounds {
    /// The column these bounds were observed on.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// The observed minimum.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The observed maximum.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `max - min`.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether every observed value was identical (`min == max`).
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Min-max rescale `value` against these bounds.
    ///
    /// Values drawn from the column itself land in `[0, 1]`, with the
    /// observed min mapping to exactly `0.0` and the max to exactly `1.0`.
    /// The output is deliberately NOT clamped: a probe value outside the
    /// observed range maps outside `[0, 1]`, preserving true distances for
    /// the matcher's normalized mode.
    ///
    /// A degenerate column (`min == max`) has no defined rescaling and
    /// fails with [`Error::DegenerateColumn`]; whether to substitute a
    /// neutral display value is the caller's policy (see
    /// [`normalized_profiles`](crate::profile::normalized_profiles)).
    pub fn normalize(&self, value: f64) -> Result<f64> {
        if self.is_degenerate() {
            return Err(Error::DegenerateColumn {
                column: self.column.clone(),
                value: self.min,
            });
        }
        Ok((value - self.min) / (self.max - self.min))
    }
}

/// Compute `(min, max)` for each of `columns` in a single pass per column.
///
/// The result maps column name to bounds, ordered by name. Fails with
/// [`Error::EmptyDataset`] when there are no rows to observe and
/// [`Error::UnknownColumn`] when a name is outside the dataset's schema.
/// Degenerate (constant) columns are reported as valid bounds here; the
/// failure is deferred to [`ColumnBounds::normalize`], where it is
/// attributable to a concrete rescale request.
pub fn column_bounds(
    dataset: &Dataset,
    columns: &[String],
) -> Result<BTreeMap<String, ColumnBounds>> {
    if dataset.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let mut out = BTreeMap::new();
    for column in columns {
        let mut values = dataset.column_values(column)?;
        // Non-emptiness was checked above, so the first value exists.
        let first = values.next().ok_or(Error::EmptyDataset)?;
        let mut min = first;
        let mut max = first;
        for v in values {
            if v < min {
                min = v;
            }
            if v > max {
                max = v;
            }
        }
        out.insert(
            column.clone(),
            ColumnBounds {
                column: column.clone(),
                min,
                max,
            },
        );
    }
    Ok(out)
}
