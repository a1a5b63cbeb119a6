//! Nearest-cluster matching.
//!
//! # The Algorithm
//!
//! Given a user-supplied target vector over the matching parameter set,
//! scan every dataset row and score it by squared Euclidean distance:
//!
//! ```text
//! d(r) = Σ_p (r[p] - target[p])²
//! ```
//!
//! The row minimizing `d` wins, and its cluster tag is the answer. The
//! contract is "find the minimizer", not "scan linearly": at this dataset
//! scale (hundreds to low thousands of simulated variants) a linear scan
//! is the right tool, but a spatial index could replace it as long as the
//! tie-break and failure semantics below are preserved.
//!
//! ## Distance space
//!
//! By default distances are computed on RAW parameter values. That is a
//! deliberate, documented sharp edge: a parameter spanning hundreds of
//! meters will dominate one spanning a unitless 0–1 range. Callers who
//! want every parameter weighted by its observed spread opt in to
//! [`DistanceSpace::Normalized`], which min-max rescales both row and
//! target values by the same full-dataset bounds before differencing.
//! Target values are rescaled unclamped, so an out-of-range probe keeps
//! its true distance.
//!
//! ## Determinism
//!
//! Ties are real: simulated design spaces contain duplicate and symmetric
//! variants. When several rows achieve the identical minimum distance, the
//! FIRST one in load order wins, every time.
//!
//! ## Failure policy
//!
//! All input validation happens before any row is scored: a target missing
//! a parameter or carrying a non-finite value, an unknown parameter
//! column, or an empty dataset each fail the call up front with a typed
//! error. The matcher never guesses a default and never does partial
//! work. Non-finite dataset values cannot reach this point; loading
//! rejects them.

use crate::error::{Error, Result};
use crate::profile::column_bounds;
use crate::table::{ClusterId, Dataset, TableSchema};
use std::collections::BTreeMap;

/// A user-supplied value per matching parameter.
///
/// Built by the presentation collaborator from form input. The matcher
/// checks completeness itself; missing parameters are reported, never
/// defaulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetVector {
    values: BTreeMap<String, f64>,
}

impl TargetVector {
    /// An empty target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a target from `(parameter, value)` pairs.
    pub fn from_pairs<S: Into<String>>(pairs: impl IntoIterator<Item = (S, f64)>) -> Self {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Set one parameter's value, replacing any previous entry.
    pub fn set(&mut self, parameter: impl Into<String>, value: f64) {
        self.values.insert(parameter.into(), value);
    }

    /// The value for one parameter, if present.
    pub fn get(&self, parameter: &str) -> Option<f64> {
        self.values.get(parameter).copied()
    }

    /// Number of parameters with a value.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no parameter has a value yet.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Which space distances are computed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DistanceSpace {
    /// Squared Euclidean distance over raw parameter values (the
    /// definitive default; wide-range parameters dominate).
    #[default]
    Raw,
    /// Both row and target values are min-max rescaled by the same
    /// full-dataset bounds first. Fails on a degenerate parameter column,
    /// which would contribute no signal either way.
    Normalized,
}

/// The outcome of a nearest-cluster query.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    /// Cluster tag of the nearest row.
    pub cluster: ClusterId,
    /// The winning squared distance, in the configured [`DistanceSpace`].
    pub distance: f64,
    /// Load-order index of the nearest row, for diagnostics.
    pub row_index: usize,
}

/// Nearest-cluster matcher over a fixed parameter set.
#[derive(Debug, Clone)]
pub struct Matcher {
    parameters: Vec<String>,
    space: DistanceSpace,
}

impl Matcher {
    /// Create a matcher over the given parameter columns.
    pub fn new<S: Into<String>>(parameters: impl IntoIterator<Item = S>) -> Self {
        Self {
            parameters: parameters.into_iter().map(Into::into).collect(),
            space: DistanceSpace::Raw,
        }
    }

    /// Create a matcher over a schema's full parameter set.
    pub fn for_schema(schema: &TableSchema) -> Self {
        Self::new(schema.parameter_columns.iter().cloned())
    }

    /// Select the distance space.
    pub fn with_space(mut self, space: DistanceSpace) -> Self {
        self.space = space;
        self
    }

    /// The matching parameter set.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Find the dataset row nearest to `target` and return its cluster.
    ///
    /// Validation order: configuration ([`Error::NoParameters`],
    /// [`Error::UnknownColumn`]), then target completeness and finiteness
    /// ([`Error::IncompleteTarget`], [`Error::NonFiniteTarget`]), then
    /// data availability ([`Error::EmptyDataset`],
    /// [`Error::DegenerateColumn`] in normalized mode). No row is scored
    /// until all checks pass.
    pub fn find_best_cluster(&self, dataset: &Dataset, target: &TargetVector) -> Result<MatchResult> {
        if self.parameters.is_empty() {
            return Err(Error::NoParameters);
        }

        let cols: Vec<usize> = self
            .parameters
            .iter()
            .map(|p| dataset.column_index(p))
            .collect::<Result<_>>()?;

        let mut wanted = Vec::with_capacity(self.parameters.len());
        for parameter in &self.parameters {
            let value = target
                .get(parameter)
                .ok_or_else(|| Error::IncompleteTarget {
                    column: parameter.clone(),
                })?;
            if !value.is_finite() {
                return Err(Error::NonFiniteTarget {
                    column: parameter.clone(),
                    value,
                });
            }
            wanted.push(value);
        }

        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }

        // Per-column affine maps into the scoring space: identity for raw
        // distances, (v - min) / span for normalized ones.
        let (offsets, spans) = match self.space {
            DistanceSpace::Raw => (vec![0.0; cols.len()], vec![1.0; cols.len()]),
            DistanceSpace::Normalized => {
                let bounds = column_bounds(dataset, &self.parameters)?;
                let mut offsets = Vec::with_capacity(cols.len());
                let mut spans = Vec::with_capacity(cols.len());
                for parameter in &self.parameters {
                    let b = &bounds[parameter];
                    if b.is_degenerate() {
                        return Err(Error::DegenerateColumn {
                            column: parameter.clone(),
                            value: b.min(),
                        });
                    }
                    offsets.push(b.min());
                    spans.push(b.span());
                }
                (offsets, spans)
            }
        };

        let scaled_target: Vec<f64> = wanted
            .iter()
            .zip(offsets.iter().zip(&spans))
            .map(|(&v, (off, span))| (v - off) / span)
            .collect();

        let mut best: Option<(usize, f64)> = None;
        for row in 0..dataset.len() {
            let mut d = 0.0;
            for (i, &col) in cols.iter().enumerate() {
                let v = (dataset.value_at(row, col) - offsets[i]) / spans[i];
                let diff = v - scaled_target[i];
                d += diff * diff;
            }
            // Strict `<` keeps the first row achieving the minimum.
            if best.map_or(true, |(_, b)| d < b) {
                best = Some((row, d));
            }
        }

        // Emptiness was rejected above, so a winner exists.
        let (row_index, distance) = best.ok_or(Error::EmptyDataset)?;
        let cluster = dataset.cluster_at(row_index).clone();

        tracing::debug!(
            %cluster,
            distance,
            row_index,
            space = ?self.space,
            "nearest cluster found"
        );

        Ok(MatchResult {
            cluster,
            distance,
            row_index,
        })
    }
}
