use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::model::ClusterDataset;

// ---------------------------------------------------------------------------
// DateView – the dataset narrowed to one reference date
// ---------------------------------------------------------------------------

/// Indices of the rows matching a single selected date, grouped by cluster.
///
/// The dataset carries one row per seller per date, so `row_count()` equals
/// the distinct-seller count for the date.
#[derive(Debug, Clone)]
pub struct DateView {
    pub date: NaiveDate,
    /// Row indices into [`ClusterDataset::records`], in file order.
    pub indices: Vec<usize>,
    /// Cluster → row indices, keyed in ascending (numeric) cluster order.
    pub by_cluster: BTreeMap<u32, Vec<usize>>,
}

impl DateView {
    /// Build the view for `date`. Rows with unparsable dates never match.
    pub fn build(dataset: &ClusterDataset, date: NaiveDate) -> Self {
        let mut indices = Vec::new();
        let mut by_cluster: BTreeMap<u32, Vec<usize>> = BTreeMap::new();

        for (i, rec) in dataset.records.iter().enumerate() {
            if rec.date == Some(date) {
                indices.push(i);
                by_cluster.entry(rec.cluster).or_default().push(i);
            }
        }

        DateView {
            date,
            indices,
            by_cluster,
        }
    }

    /// Number of rows (= distinct sellers) in the view.
    pub fn row_count(&self) -> usize {
        self.indices.len()
    }

    /// Feature matrix of the view, row-aligned with `indices`.
    /// NaN cells are passed through untouched.
    pub fn feature_matrix(&self, dataset: &ClusterDataset) -> Vec<Vec<f64>> {
        self.indices
            .iter()
            .map(|&i| dataset.records[i].features.clone())
            .collect()
    }

    /// Cluster label of each view row, aligned with `indices`.
    pub fn cluster_targets(&self, dataset: &ClusterDataset) -> Vec<u32> {
        self.indices
            .iter()
            .map(|&i| dataset.records[i].cluster)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SellerRecord;

    fn dataset() -> ClusterDataset {
        let d1 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let mk = |id: &str, date, cluster| SellerRecord {
            seller_id: id.to_string(),
            date,
            cluster,
            features: vec![0.1, 0.9],
        };
        ClusterDataset::from_records(
            vec![
                mk("a", Some(d1), 1),
                mk("b", Some(d1), 0),
                mk("c", Some(d2), 0),
                mk("d", None, 0),
            ],
            vec!["f1".into(), "f2".into()],
        )
    }

    #[test]
    fn view_matches_distinct_sellers_for_date() {
        let ds = dataset();
        for &date in &ds.dates {
            let view = DateView::build(&ds, date);
            let distinct = ds
                .records
                .iter()
                .filter(|r| r.date == Some(date))
                .count();
            assert_eq!(view.row_count(), distinct);
        }
    }

    #[test]
    fn clusters_are_ordered_numerically() {
        let ds = dataset();
        let view = DateView::build(&ds, ds.dates[0]);
        let clusters: Vec<u32> = view.by_cluster.keys().copied().collect();
        assert_eq!(clusters, vec![0, 1]);
        assert_eq!(view.by_cluster[&0], vec![1]);
        assert_eq!(view.by_cluster[&1], vec![0]);
    }

    #[test]
    fn dateless_rows_never_match() {
        let ds = dataset();
        for &date in &ds.dates {
            let view = DateView::build(&ds, date);
            assert!(view.indices.iter().all(|&i| ds.records[i].date.is_some()));
        }
    }
}
