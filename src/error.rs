use crate::table::ClusterId;
use thiserror::Error;

/// Errors returned by dataset loading, summarization, and matching.
///
/// Messages are written so a caller can surface them verbatim: they
/// distinguish bad user input (re-prompt) from a data problem (fix the
/// source table) from an empty table (nothing to match against).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A required column is absent from a record.
    #[error("data problem: required column {column:?} is missing in row {row}")]
    MissingColumn {
        /// Column name.
        column: String,
        /// Zero-based row index where the absence was detected.
        row: usize,
    },

    /// The same column name appears twice in the schema.
    #[error("data problem: column {column:?} is listed more than once in the schema")]
    DuplicateColumn {
        /// Column name.
        column: String,
    },

    /// A required cell holds text or nothing where a number is needed.
    #[error("data problem: column {column:?} has a non-numeric value in row {row}")]
    NonNumericCell {
        /// Column name.
        column: String,
        /// Zero-based row index.
        row: usize,
    },

    /// A required cell holds NaN or an infinity.
    #[error("data problem: column {column:?} has a non-finite value in row {row}")]
    NonFiniteCell {
        /// Column name.
        column: String,
        /// Zero-based row index.
        row: usize,
    },

    /// The cluster tag of a row is not a usable identifier.
    #[error("data problem: cluster column {column:?} has an unusable tag in row {row}")]
    InvalidClusterCell {
        /// Cluster column name.
        column: String,
        /// Zero-based row index.
        row: usize,
    },

    /// A query referenced a column outside the dataset's schema.
    #[error("unknown column {column:?}: not part of the loaded schema")]
    UnknownColumn {
        /// Column name.
        column: String,
    },

    /// Every row holds the same value, so min-max scaling is undefined.
    #[error(
        "data problem: column {column:?} is constant at {value} and carries no \
         discriminative signal"
    )]
    DegenerateColumn {
        /// Column name.
        column: String,
        /// The single value the column takes.
        value: f64,
    },

    /// The dataset holds no rows.
    #[error("no data: the dataset is empty")]
    EmptyDataset,

    /// A cluster id resolved to zero rows.
    #[error("no data: cluster {cluster} has no rows")]
    EmptyCluster {
        /// The offending cluster id.
        cluster: ClusterId,
    },

    /// The target vector lacks a required parameter.
    #[error("incomplete input: no value supplied for parameter {column:?}")]
    IncompleteTarget {
        /// Parameter name the target is missing.
        column: String,
    },

    /// A target entry is NaN or infinite.
    #[error("invalid input: parameter {column:?} is {value}, which is not a finite number")]
    NonFiniteTarget {
        /// Parameter name.
        column: String,
        /// The offending value.
        value: f64,
    },

    /// The matcher was configured with an empty parameter set.
    #[error("invalid configuration: the matching parameter set is empty")]
    NoParameters,
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
