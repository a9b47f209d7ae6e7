/// Analysis layer: pure transforms from the filtered view to chart data.
///
/// Every function here is deterministic and side-effect free so the charts
/// can be tested without a UI.
pub mod pca;
pub mod scaling;
pub mod summary;
pub mod tree;

use crate::data::filter::DateView;
use crate::data::model::ClusterDataset;

use self::pca::Projection;
use self::summary::{ClusterCount, MeanMatrix};

/// Bounds on the heatmap's top-k feature slider.
pub const MIN_TOP_FEATURES: usize = 3;
pub const MAX_TOP_FEATURES: usize = 20;

/// Everything the date-scoped charts need, computed in one pass over the
/// filtered view: distribution counts, the 2-D projection, the importance
/// ranking, and the per-cluster mean matrix.
#[derive(Debug, Clone)]
pub struct DateAnalytics {
    pub view: DateView,
    pub distribution: Vec<ClusterCount>,
    pub projection: Projection,
    /// (feature column index, importance score), descending by score.
    pub ranked_features: Vec<(usize, f64)>,
    pub means: MeanMatrix,
}

impl DateAnalytics {
    /// Run the full render-pass computation for one selected date.
    ///
    /// `top_k` is clamped to the available feature count; the mean matrix
    /// always has exactly `min(top_k, feature_count)` columns.
    pub fn compute(dataset: &ClusterDataset, view: DateView, top_k: usize) -> Self {
        let distribution = summary::distribution_counts(&view);

        let x = view.feature_matrix(dataset);
        let mut matrix = scaling::matrix_from_rows(&x, dataset.feature_count());
        scaling::standardize(&mut matrix);
        let projection = pca::project_2d(&matrix);

        let x_filled: Vec<Vec<f64>> = x
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&v| if v.is_finite() { v } else { 0.0 })
                    .collect()
            })
            .collect();
        let y = view.cluster_targets(dataset);
        let fitted = tree::DecisionTree::fit(&x_filled, &y);
        let ranked_features =
            tree::top_features(&fitted.feature_importances(), top_k.min(dataset.feature_count()));

        let top_indices: Vec<usize> = ranked_features.iter().map(|&(i, _)| i).collect();
        let means = summary::cluster_means(dataset, &view, &top_indices);

        DateAnalytics {
            view,
            distribution,
            projection,
            ranked_features,
            means,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::SellerRecord;
    use chrono::NaiveDate;

    fn dataset() -> ClusterDataset {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let mut records = Vec::new();
        for i in 0..12 {
            let cluster = (i % 3) as u32;
            let base = cluster as f64 * 0.3;
            records.push(SellerRecord {
                seller_id: format!("s{i}"),
                date: Some(date),
                cluster,
                features: vec![base + 0.05, 0.9 - base, 0.5, 0.2],
            });
        }
        ClusterDataset::from_records(
            records,
            vec![
                "recbruta_food_prop".into(),
                "recbruta_tech_prop".into(),
                "recbruta_home_prop".into(),
                "recbruta_auto_prop".into(),
            ],
        )
    }

    #[test]
    fn full_pass_is_shape_consistent() {
        let ds = dataset();
        let view = DateView::build(&ds, ds.dates[0]);
        let analytics = DateAnalytics::compute(&ds, view, 3);

        let rows = analytics.view.row_count();
        assert_eq!(rows, 12);
        assert_eq!(analytics.projection.scores.len(), rows);
        let bar_total: usize = analytics.distribution.iter().map(|c| c.sellers).sum();
        assert_eq!(bar_total, rows);
        assert_eq!(analytics.ranked_features.len(), 3);
        assert_eq!(analytics.means.features.len(), 3);
        assert_eq!(analytics.means.clusters, vec![0, 1, 2]);
    }

    #[test]
    fn top_k_clamps_to_feature_count() {
        let ds = dataset();
        let view = DateView::build(&ds, ds.dates[0]);
        let analytics = DateAnalytics::compute(&ds, view, 20);
        assert_eq!(analytics.ranked_features.len(), 4);
    }

    #[test]
    fn identical_inputs_give_identical_chart_data() {
        let ds = dataset();
        let a = DateAnalytics::compute(&ds, DateView::build(&ds, ds.dates[0]), 4);
        let b = DateAnalytics::compute(&ds, DateView::build(&ds, ds.dates[0]), 4);
        assert_eq!(a.projection.scores, b.projection.scores);
        assert_eq!(a.ranked_features, b.ranked_features);
        assert_eq!(a.means.values, b.means.values);
    }
}
