use std::collections::BTreeSet;

use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// SellerRecord – one row of the clustering output
// ---------------------------------------------------------------------------

/// A single seller observation at one reference date.
#[derive(Debug, Clone)]
pub struct SellerRecord {
    pub seller_id: String,
    /// Reference date. `None` when the source cell could not be parsed;
    /// such rows are kept but never appear in a date-filtered view.
    pub date: Option<NaiveDate>,
    /// Cluster label assigned by the upstream model.
    pub cluster: u32,
    /// Proportion-feature values, position-aligned with
    /// [`ClusterDataset::feature_names`]. NaN marks a missing cell.
    pub features: Vec<f64>,
}

// ---------------------------------------------------------------------------
// ClusterDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed date and cluster indices.
#[derive(Debug, Clone)]
pub struct ClusterDataset {
    /// All seller observations (rows).
    pub records: Vec<SellerRecord>,
    /// Feature column names, in source-file order.
    pub feature_names: Vec<String>,
    /// Sorted unique reference dates (rows with unparsable dates excluded).
    pub dates: Vec<NaiveDate>,
    /// Sorted unique cluster labels across the whole dataset.
    pub clusters: Vec<u32>,
}

impl ClusterDataset {
    /// Build the date and cluster indices from the loaded records.
    pub fn from_records(records: Vec<SellerRecord>, feature_names: Vec<String>) -> Self {
        let mut dates: BTreeSet<NaiveDate> = BTreeSet::new();
        let mut clusters: BTreeSet<u32> = BTreeSet::new();

        for rec in &records {
            if let Some(d) = rec.date {
                dates.insert(d);
            }
            clusters.insert(rec.cluster);
        }

        ClusterDataset {
            records,
            feature_names,
            dates: dates.into_iter().collect(),
            clusters: clusters.into_iter().collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of proportion-feature columns.
    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    /// Most recent reference date, if any row had a valid one.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }
}

/// Display form of a cluster label, as used for legends and orderings.
pub fn cluster_label(cluster: u32) -> String {
    cluster.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, date: Option<NaiveDate>, cluster: u32) -> SellerRecord {
        SellerRecord {
            seller_id: id.to_string(),
            date,
            cluster,
            features: vec![0.5, 0.5],
        }
    }

    #[test]
    fn indices_are_sorted_and_deduplicated() {
        let d1 = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let ds = ClusterDataset::from_records(
            vec![
                rec("a", Some(d1), 2),
                rec("b", Some(d2), 0),
                rec("c", Some(d1), 0),
                rec("d", None, 1),
            ],
            vec!["f1".into(), "f2".into()],
        );

        assert_eq!(ds.dates, vec![d2, d1]);
        assert_eq!(ds.clusters, vec![0, 1, 2]);
        assert_eq!(ds.latest_date(), Some(d1));
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn dataset_without_valid_dates_has_no_latest() {
        let ds = ClusterDataset::from_records(vec![rec("a", None, 0)], vec!["f1".into()]);
        assert!(ds.latest_date().is_none());
        assert!(ds.dates.is_empty());
    }
}
