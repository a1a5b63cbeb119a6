//! Dataset summarization and nearest-cluster matching.
//!
//! `clusterfit` is the computational core behind design-space exploration
//! dashboards. A precomputed table of simulated design variants (each row
//! scored on comfort, environmental, and cost indicators and tagged with a
//! cluster) is loaded once, summarized per cluster, and queried with
//! user-entered parameter vectors to find the cluster that best matches a
//! desired design.
//!
//! The public API is four pieces:
//! - [`table`]: schema-validated, immutable [`Dataset`] loading
//! - [`profile`]: min-max bounds, per-cluster means, and the normalized
//!   series charts are drawn from
//! - [`matcher`]: squared-Euclidean nearest-row search returning a cluster
//! - [`session`]: one-stop lifecycle type with memoized derived views and
//!   copy-on-write reload
//!
//! Rendering, file ingestion, and UI wiring are collaborators on the other
//! side of the boundary: this crate consumes raw records and numbers and
//! produces numbers and a cluster id.
//!
//! ## Usage
//!
//! ```rust
//! use clusterfit::{Cell, ClusterId, Record, Session, TableSchema, TargetVector};
//!
//! let schema = TableSchema::new("cluster", vec!["comfort"], vec!["trees", "pv"]);
//! let rows = [
//!     (0, 1.2, 10.0, 20.0),
//!     (0, 1.4, 15.0, 25.0),
//!     (1, 3.4, 60.0, 80.0),
//! ];
//! let records: Vec<Record> = rows
//!     .iter()
//!     .map(|&(cluster, comfort, trees, pv)| {
//!         Record::from([
//!             ("cluster".to_string(), Cell::from(cluster)),
//!             ("comfort".to_string(), Cell::Number(comfort)),
//!             ("trees".to_string(), Cell::Number(trees)),
//!             ("pv".to_string(), Cell::Number(pv)),
//!         ])
//!     })
//!     .collect();
//!
//! let session = Session::load(schema, &records)?;
//!
//! // Which cluster best matches a design with ~12% trees, ~22% PV?
//! let target = TargetVector::from_pairs([("trees", 12.0), ("pv", 22.0)]);
//! let result = session.matcher().find_best_cluster(session.dataset(), &target)?;
//! assert_eq!(result.cluster, ClusterId::Num(0));
//!
//! // Normalized indicator means per cluster, for the comparison chart.
//! let bars = session.normalized_profiles(0.0)?;
//! assert!(bars[&ClusterId::Num(0)]["comfort"] < bars[&ClusterId::Num(1)]["comfort"]);
//! # Ok::<(), clusterfit::Error>(())
//! ```
//!
//! [`Dataset`]: table::Dataset

#![forbid(unsafe_code)]

pub mod error;
pub mod matcher;
pub mod profile;
pub mod session;
pub mod table;

pub use error::{Error, Result};
pub use matcher::{DistanceSpace, MatchResult, Matcher, TargetVector};
pub use profile::{
    aggregate, cluster_series, column_bounds, normalized_profiles, ClusterProfile, ColumnBounds,
    Spread,
};
pub use session::Session;
pub use table::{Cell, ClusterId, Dataset, Record, Row, TableSchema};
