//! Validated, immutable scenario tables.
//!
//! A design-space exploration run produces a table of scenario rows: one
//! row per simulated design variant, scored on outcome indicators (comfort,
//! environmental impact, cost) and described by its design parameters, with
//! a precomputed cluster tag on every row. This module loads such a table
//! into a [`Dataset`], the single source of truth every other component
//! reads from.
//!
//! ## Loading contract
//!
//! [`Dataset::load`] is all-or-nothing. The caller enumerates the required
//! columns in a [`TableSchema`]; every required column must be present and
//! finite-numeric in every record, and every row must carry a usable
//! cluster tag. The first violation aborts the whole load: no partially
//! valid dataset is ever constructed, and rows are never dropped or
//! coerced. This front-loads the failures that would otherwise surface as
//! key errors deep inside a chart callback.
//!
//! Once loaded, a [`Dataset`] is immutable: there are no mutating
//! accessors, so sharing it read-only across threads needs no locking.
//! Replacing the data means loading a new `Dataset` (see
//! [`Session`](crate::session::Session)).

mod cell;

pub use cell::{Cell, ClusterId, Record};

use crate::error::{Error, Result};
use std::collections::{BTreeSet, HashMap};

/// The caller-enumerated required columns of a scenario table.
///
/// Indicators are outcome metrics (what a variant achieves); parameters are
/// design inputs (what a variant is). Both sets must be fully numeric in
/// every row. The cluster column carries the precomputed grouping tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    /// Column holding the cluster tag of each row.
    pub cluster_column: String,
    /// Outcome metric columns, e.g. thermal comfort, GWP, life-cycle cost.
    pub indicator_columns: Vec<String>,
    /// Design input columns, e.g. tree cover share, PV roof coverage.
    pub parameter_columns: Vec<String>,
}

impl TableSchema {
    /// Create a schema from the cluster column and the two column sets.
    pub fn new<S: Into<String>>(
        cluster_column: S,
        indicator_columns: impl IntoIterator<Item = S>,
        parameter_columns: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            cluster_column: cluster_column.into(),
            indicator_columns: indicator_columns.into_iter().map(Into::into).collect(),
            parameter_columns: parameter_columns.into_iter().map(Into::into).collect(),
        }
    }

    /// All required numeric columns: indicators first, then parameters,
    /// each in declaration order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = &str> {
        self.indicator_columns
            .iter()
            .chain(self.parameter_columns.iter())
            .map(String::as_str)
    }
}

/// An immutable table of scenario rows sharing one schema.
///
/// Storage is row-major over the schema's numeric columns, with the
/// cluster tag held separately per row. Row order is load order and is
/// observable: the matcher's tie-break is defined in terms of it.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: TableSchema,
    columns: Vec<String>,
    index: HashMap<String, usize>,
    data: Vec<Vec<f64>>,
    clusters: Vec<ClusterId>,
    cluster_ids: Vec<ClusterId>,
}

impl Dataset {
    /// Validate `records` against `schema` and construct a dataset.
    ///
    /// Fails on the first violation without constructing anything:
    ///
    /// - [`Error::DuplicateColumn`]: a column name appears twice in the
    ///   schema, or a numeric column shadows the cluster column.
    /// - [`Error::MissingColumn`]: a required column is absent from a
    ///   record.
    /// - [`Error::NonNumericCell`]: a required cell is text or blank.
    /// - [`Error::NonFiniteCell`]: a required cell is NaN or infinite.
    /// - [`Error::InvalidClusterCell`]: a cluster tag is not usable as an
    ///   identifier.
    ///
    /// An empty record set is accepted; emptiness is reported by the
    /// operations that cannot proceed without rows.
    pub fn load(schema: TableSchema, records: &[Record]) -> Result<Self> {
        let mut index = HashMap::new();
        let mut columns = Vec::new();
        for name in schema.numeric_columns() {
            if name == schema.cluster_column || index.insert(name.to_string(), columns.len()).is_some()
            {
                return Err(Error::DuplicateColumn {
                    column: name.to_string(),
                });
            }
            columns.push(name.to_string());
        }

        let mut data = Vec::with_capacity(records.len());
        let mut clusters = Vec::with_capacity(records.len());
        for (row, record) in records.iter().enumerate() {
            let mut values = Vec::with_capacity(columns.len());
            for column in &columns {
                let cell = record.get(column).ok_or_else(|| Error::MissingColumn {
                    column: column.clone(),
                    row,
                })?;
                match cell {
                    Cell::Number(n) if n.is_finite() => values.push(*n),
                    Cell::Number(_) => {
                        return Err(Error::NonFiniteCell {
                            column: column.clone(),
                            row,
                        })
                    }
                    Cell::Text(_) | Cell::Empty => {
                        return Err(Error::NonNumericCell {
                            column: column.clone(),
                            row,
                        })
                    }
                }
            }

            let tag = record
                .get(&schema.cluster_column)
                .ok_or_else(|| Error::MissingColumn {
                    column: schema.cluster_column.clone(),
                    row,
                })?;
            let cluster = ClusterId::from_cell(tag).ok_or_else(|| Error::InvalidClusterCell {
                column: schema.cluster_column.clone(),
                row,
            })?;

            data.push(values);
            clusters.push(cluster);
        }

        let cluster_ids: Vec<ClusterId> = clusters
            .iter()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        tracing::debug!(
            rows = data.len(),
            columns = columns.len(),
            clusters = cluster_ids.len(),
            "dataset loaded"
        );

        Ok(Self {
            schema,
            columns,
            index,
            data,
            clusters,
            cluster_ids,
        })
    }

    /// The schema this dataset was validated against.
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the rows in load order.
    ///
    /// The iterator borrows the dataset; calling `rows()` again restarts
    /// from the first row.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        (0..self.data.len()).map(move |i| Row {
            dataset: self,
            row: i,
        })
    }

    /// Iterate over one column's values in load order.
    pub fn column_values(&self, column: &str) -> Result<impl Iterator<Item = f64> + '_> {
        let col = self.column_index(column)?;
        Ok(self.data.iter().map(move |row| row[col]))
    }

    /// The numeric column names, indicators first, in schema order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The distinct cluster ids present, sorted by their natural order.
    pub fn cluster_ids(&self) -> &[ClusterId] {
        &self.cluster_ids
    }

    /// Arithmetic mean of one column over all rows.
    ///
    /// Useful as a suggested default when pre-filling a target input form.
    pub fn column_mean(&self, column: &str) -> Result<f64> {
        let col = self.column_index(column)?;
        if self.data.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let sum: f64 = self.data.iter().map(|row| row[col]).sum();
        Ok(sum / self.data.len() as f64)
    }

    pub(crate) fn column_index(&self, column: &str) -> Result<usize> {
        self.index
            .get(column)
            .copied()
            .ok_or_else(|| Error::UnknownColumn {
                column: column.to_string(),
            })
    }

    pub(crate) fn value_at(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub(crate) fn cluster_at(&self, row: usize) -> &ClusterId {
        &self.clusters[row]
    }
}

/// A borrowed view of one dataset row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    dataset: &'a Dataset,
    row: usize,
}

impl<'a> Row<'a> {
    /// The value of one column, or `None` for a column outside the schema.
    pub fn value(&self, column: &str) -> Option<f64> {
        self.dataset
            .index
            .get(column)
            .map(|&col| self.dataset.data[self.row][col])
    }

    /// The values of several columns, in the given order.
    pub fn values(&self, columns: &[String]) -> Result<Vec<f64>> {
        columns
            .iter()
            .map(|c| {
                self.value(c).ok_or_else(|| Error::UnknownColumn {
                    column: c.clone(),
                })
            })
            .collect()
    }

    /// The row's cluster tag.
    pub fn cluster(&self) -> &ClusterId {
        &self.dataset.clusters[self.row]
    }

    /// Position of this row in load order.
    pub fn index(&self) -> usize {
        self.row
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Build a record from `(column, cell)` pairs.
    pub fn record<const N: usize>(pairs: [(&str, Cell); N]) -> Record {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    /// A small two-indicator, two-parameter schema used across tests.
    pub fn small_schema() -> TableSchema {
        TableSchema::new("cluster", vec!["comfort", "cost"], vec!["a", "b"])
    }

    /// Four rows, two clusters, the parameter geometry used by the matcher
    /// tests: (0,0) and (2,0) in cluster 0, (4,4) and (6,4) in cluster 1.
    pub fn small_dataset() -> Dataset {
        let records = vec![
            record([
                ("cluster", Cell::Number(0.0)),
                ("comfort", Cell::Number(1.0)),
                ("cost", Cell::Number(10.0)),
                ("a", Cell::Number(0.0)),
                ("b", Cell::Number(0.0)),
            ]),
            record([
                ("cluster", Cell::Number(0.0)),
                ("comfort", Cell::Number(2.0)),
                ("cost", Cell::Number(20.0)),
                ("a", Cell::Number(2.0)),
                ("b", Cell::Number(0.0)),
            ]),
            record([
                ("cluster", Cell::Number(1.0)),
                ("comfort", Cell::Number(3.0)),
                ("cost", Cell::Number(30.0)),
                ("a", Cell::Number(4.0)),
                ("b", Cell::Number(4.0)),
            ]),
            record([
                ("cluster", Cell::Number(1.0)),
                ("comfort", Cell::Number(4.0)),
                ("cost", Cell::Number(40.0)),
                ("a", Cell::Number(6.0)),
                ("b", Cell::Number(4.0)),
            ]),
        ];
        Dataset::load(small_schema(), &records).unwrap()
    }
}
