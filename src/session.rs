//! Session lifecycle: one immutable dataset plus its derived caches.
//!
//! A dashboard session loads its table once at startup and treats it as
//! read-only from then on. [`Session`] makes that lifecycle explicit: it
//! owns the dataset behind an `Arc`, computes the derived views (column
//! bounds, cluster profiles) eagerly at construction, and never mutates
//! either afterwards, so it is freely shareable across concurrent callers
//! without locking.
//!
//! Reload is copy-on-write: [`Session::reload`] validates the new records
//! into a completely new `Session`, and the caller swaps the reference.
//! Callers still holding the old `Arc` keep a consistent snapshot; there
//! is no partial cache invalidation to get wrong.

use crate::error::{Error, Result};
use crate::matcher::Matcher;
use crate::profile::{
    aggregate, cluster_series, column_bounds, normalized_profiles, ClusterProfile, ColumnBounds,
    Spread,
};
use crate::table::{ClusterId, Dataset, Record, TableSchema};
use std::collections::BTreeMap;
use std::sync::Arc;

/// An immutable dataset with its memoized derived views.
#[derive(Debug, Clone)]
pub struct Session {
    dataset: Arc<Dataset>,
    bounds: BTreeMap<String, ColumnBounds>,
    profiles: BTreeMap<ClusterId, ClusterProfile>,
}

impl Session {
    /// Wrap a loaded dataset and build the derived caches.
    ///
    /// Bounds cover every numeric column; profiles average every numeric
    /// column per cluster. A session over zero rows cannot serve any
    /// chart or match, so an empty dataset is rejected here with
    /// [`Error::EmptyDataset`].
    pub fn new(dataset: Dataset) -> Result<Self> {
        let numeric: Vec<String> = dataset
            .schema()
            .numeric_columns()
            .map(str::to_string)
            .collect();
        let bounds = column_bounds(&dataset, &numeric)?;
        let profiles = aggregate(&dataset, &numeric)?;
        Ok(Self {
            dataset: Arc::new(dataset),
            bounds,
            profiles,
        })
    }

    /// Validate `records` against `schema` and open a session over them.
    pub fn load(schema: TableSchema, records: &[Record]) -> Result<Self> {
        Self::new(Dataset::load(schema, records)?)
    }

    /// Build a replacement session from new records, keeping this
    /// session's schema.
    ///
    /// Nothing in `self` changes; on success the caller swaps to the
    /// returned session, and in-flight readers of the old dataset keep
    /// their snapshot.
    pub fn reload(&self, records: &[Record]) -> Result<Self> {
        Self::load(self.dataset.schema().clone(), records)
    }

    /// The shared dataset.
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Observed bounds of every numeric column.
    pub fn bounds(&self) -> &BTreeMap<String, ColumnBounds> {
        &self.bounds
    }

    /// Bounds of one column.
    pub fn bounds_for(&self, column: &str) -> Result<&ColumnBounds> {
        self.bounds.get(column).ok_or_else(|| Error::UnknownColumn {
            column: column.to_string(),
        })
    }

    /// Per-cluster mean of every numeric column, ordered by cluster id.
    pub fn profiles(&self) -> &BTreeMap<ClusterId, ClusterProfile> {
        &self.profiles
    }

    /// Per-cluster means rescaled into `[0, 1]` by the full-dataset
    /// bounds; constant columns take `degenerate_fill`.
    pub fn normalized_profiles(
        &self,
        degenerate_fill: f64,
    ) -> Result<BTreeMap<ClusterId, BTreeMap<String, f64>>> {
        normalized_profiles(&self.profiles, &self.bounds, degenerate_fill)
    }

    /// Normalized values of one column over one cluster's rows.
    pub fn cluster_series(&self, cluster: &ClusterId, column: &str) -> Result<Vec<f64>> {
        cluster_series(&self.dataset, cluster, self.bounds_for(column)?)
    }

    /// Five-number summary of one column over one cluster's rows.
    pub fn cluster_spread(&self, cluster: &ClusterId, column: &str) -> Result<Spread> {
        Spread::from_values(&self.cluster_series(cluster, column)?)
    }

    /// A matcher over this session's full parameter set.
    pub fn matcher(&self) -> Matcher {
        Matcher::for_schema(self.dataset.schema())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_support::{record, small_schema};
    use crate::table::Cell;

    fn small_records() -> Vec<Record> {
        let mut records = Vec::new();
        for (cluster, comfort, cost, a, b) in [
            (0.0, 1.0, 10.0, 0.0, 0.0),
            (0.0, 2.0, 20.0, 2.0, 0.0),
            (1.0, 3.0, 30.0, 4.0, 4.0),
            (1.0, 4.0, 40.0, 6.0, 4.0),
        ] {
            records.push(record([
                ("cluster", Cell::Number(cluster)),
                ("comfort", Cell::Number(comfort)),
                ("cost", Cell::Number(cost)),
                ("a", Cell::Number(a)),
                ("b", Cell::Number(b)),
            ]));
        }
        records
    }

    #[test]
    fn session_builds_caches_eagerly() {
        let session = Session::load(small_schema(), &small_records()).unwrap();
        assert_eq!(session.bounds().len(), 4);
        assert_eq!(session.profiles().len(), 2);
        assert_eq!(session.bounds_for("cost").unwrap().max(), 40.0);

        let scaled = session.normalized_profiles(0.0).unwrap();
        assert!((scaled[&ClusterId::Num(1)]["cost"] - (35.0 - 10.0) / 30.0).abs() < 1e-12);
    }

    #[test]
    fn session_matcher_uses_schema_parameters() {
        let session = Session::load(small_schema(), &small_records()).unwrap();
        let matcher = session.matcher();
        assert_eq!(matcher.parameters(), &["a".to_string(), "b".to_string()]);

        let mut target = crate::matcher::TargetVector::new();
        target.set("a", 1.0);
        target.set("b", 0.0);
        let result = matcher
            .find_best_cluster(session.dataset(), &target)
            .unwrap();
        assert_eq!(result.cluster, ClusterId::Num(0));
    }

    #[test]
    fn session_cluster_spread_summarizes_box_plot_input() {
        let session = Session::load(small_schema(), &small_records()).unwrap();
        let series = session.cluster_series(&ClusterId::Num(0), "a").unwrap();
        assert_eq!(series, vec![0.0, 2.0 / 6.0]);

        let spread = session.cluster_spread(&ClusterId::Num(0), "a").unwrap();
        assert_eq!(spread.min, 0.0);
        assert_eq!(spread.max, 2.0 / 6.0);
        assert_eq!(spread.median, 1.0 / 6.0);
    }

    #[test]
    fn reload_is_copy_on_write() {
        let session = Session::load(small_schema(), &small_records()).unwrap();
        let old_dataset = Arc::clone(session.dataset());

        let mut records = small_records();
        records.truncate(2);
        let next = session.reload(&records).unwrap();

        // The old snapshot is untouched and still fully readable.
        assert_eq!(old_dataset.len(), 4);
        assert_eq!(session.dataset().len(), 4);
        assert_eq!(session.profiles().len(), 2);

        // The replacement has its own data and caches.
        assert_eq!(next.dataset().len(), 2);
        assert_eq!(next.profiles().len(), 1);
    }

    #[test]
    fn reload_failure_leaves_nothing_half_built() {
        let session = Session::load(small_schema(), &small_records()).unwrap();
        let err = session.reload(&[]).unwrap_err();
        assert_eq!(err, Error::EmptyDataset);

        let mut records = small_records();
        records[1].insert("a".into(), Cell::Text("oops".into()));
        assert!(session.reload(&records).is_err());

        // The original session is unaffected either way.
        assert_eq!(session.dataset().len(), 4);
    }
}
