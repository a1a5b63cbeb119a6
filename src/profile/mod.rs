//! Derived, read-only summaries of a loaded dataset.
//!
//! Everything in this module is a pure function of a [`Dataset`]: computed
//! on demand, safe to memoize, and invalidated only by replacing the
//! dataset wholesale (see [`Session`](crate::session::Session)).
//!
//! ## Normalization
//!
//! Indicators live on wildly different scales: a comfort index, a global
//! warming potential in kg CO₂e, a life-cycle cost in euros. To compare
//! clusters across indicators, each column is min-max rescaled by its own
//! observed bounds:
//!
//! ```text
//! n(v) = (v - min) / (max - min)
//! ```
//!
//! The column's own min maps to exactly 0 and its max to exactly 1.
//! Outputs are never clamped, and a constant column (no span to divide by)
//! is an explicit error rather than a silent NaN.
//!
//! ## Aggregation
//!
//! Rows are grouped by their precomputed cluster tag and each value column
//! is averaged per group, yielding one [`ClusterProfile`] per cluster in a
//! deterministic (sorted) order.
//!
//! ## Summaries
//!
//! [`normalized_profiles`], [`cluster_series`], and [`Spread`] turn the
//! two primitives above into the series the dashboards actually draw:
//! normalized indicator bars per cluster and box-plot distributions per
//! cluster and parameter.
//!
//! [`Dataset`]: crate::table::Dataset

mod aggregate;
mod bounds;
mod summary;

pub use aggregate::{aggregate, ClusterProfile};
pub use bounds::{column_bounds, ColumnBounds};
pub use summary::{cluster_series, normalized_profiles, Spread};
