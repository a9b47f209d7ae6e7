use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::data::filter::DateView;
use crate::data::model::ClusterDataset;

// ---------------------------------------------------------------------------
// Trend: distinct sellers per (date, cluster) over the whole dataset
// ---------------------------------------------------------------------------

/// One line of the trend chart: a cluster's seller count over time.
#[derive(Debug, Clone)]
pub struct ClusterTrend {
    pub cluster: u32,
    /// (date, distinct-seller count), ascending by date.
    pub points: Vec<(NaiveDate, usize)>,
}

/// Count distinct sellers per (date, cluster) across the unfiltered dataset,
/// one series per cluster, clusters ordered numerically. Rows without a
/// valid date are skipped; a seller appearing twice on one date (which the
/// upstream export should not produce) is counted once.
pub fn trend_series(dataset: &ClusterDataset) -> Vec<ClusterTrend> {
    let mut sellers: BTreeMap<(u32, NaiveDate), BTreeSet<&str>> = BTreeMap::new();
    for rec in &dataset.records {
        if let Some(date) = rec.date {
            sellers
                .entry((rec.cluster, date))
                .or_default()
                .insert(rec.seller_id.as_str());
        }
    }

    dataset
        .clusters
        .iter()
        .map(|&cluster| ClusterTrend {
            cluster,
            points: dataset
                .dates
                .iter()
                .filter_map(|&date| {
                    sellers.get(&(cluster, date)).map(|ids| (date, ids.len()))
                })
                .collect(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Distribution: sellers per cluster on the selected date
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct ClusterCount {
    pub cluster: u32,
    pub sellers: usize,
}

/// Sellers per cluster within the filtered view, ascending by cluster id.
/// The counts sum to the view's row count.
pub fn distribution_counts(view: &DateView) -> Vec<ClusterCount> {
    view.by_cluster
        .iter()
        .map(|(&cluster, rows)| ClusterCount {
            cluster,
            sellers: rows.len(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Per-cluster feature means (heatmap + summary table)
// ---------------------------------------------------------------------------

/// Per-cluster mean of a chosen set of features: the heatmap's matrix.
#[derive(Debug, Clone)]
pub struct MeanMatrix {
    /// Clusters present in the view, ascending.
    pub clusters: Vec<u32>,
    /// Feature column names, in the order they were requested.
    pub features: Vec<String>,
    /// `values[c][f]` = mean of feature `f` over cluster `c`'s rows,
    /// with missing cells counted as zero.
    pub values: Vec<Vec<f64>>,
}

impl MeanMatrix {
    /// Global min and max cell, used to scale the heatmap colors.
    /// `None` for an empty matrix.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut it = self.values.iter().flatten().copied();
        let first = it.next()?;
        let (mut lo, mut hi) = (first, first);
        for v in it {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        Some((lo, hi))
    }

    /// Index of the cluster holding the maximum of feature column `f`,
    /// used to highlight the summary table.
    pub fn max_row_for(&self, f: usize) -> Option<usize> {
        (0..self.clusters.len()).max_by(|&a, &b| self.values[a][f].total_cmp(&self.values[b][f]))
    }
}

/// Mean of the given feature columns per cluster in the view.
/// `feature_indices` refers to columns of [`ClusterDataset::feature_names`].
pub fn cluster_means(
    dataset: &ClusterDataset,
    view: &DateView,
    feature_indices: &[usize],
) -> MeanMatrix {
    let features = feature_indices
        .iter()
        .map(|&f| dataset.feature_names[f].clone())
        .collect();

    let mut clusters = Vec::new();
    let mut values = Vec::new();
    for (&cluster, rows) in &view.by_cluster {
        clusters.push(cluster);
        let row_means = feature_indices
            .iter()
            .map(|&f| {
                let sum: f64 = rows
                    .iter()
                    .map(|&r| {
                        let v = dataset.records[r].features[f];
                        if v.is_finite() { v } else { 0.0 }
                    })
                    .sum();
                sum / rows.len() as f64
            })
            .collect();
        values.push(row_means);
    }

    MeanMatrix {
        clusters,
        features,
        values,
    }
}
