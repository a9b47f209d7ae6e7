use chrono::{Datelike, NaiveDate};
use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::analysis::DateAnalytics;
use crate::color::{cluster_color, viridis};
use crate::data::model::cluster_label;
use crate::state::AppState;

/// Shorten a `recbruta_<category>_prop` column name to its category part
/// for axis ticks and table headers.
pub fn display_feature_name(name: &str) -> &str {
    name.strip_prefix("recbruta_")
        .and_then(|n| n.strip_suffix("_prop"))
        .unwrap_or(name)
}

fn date_to_x(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn x_to_date(x: f64) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

// ---------------------------------------------------------------------------
// 1. Trend – distinct sellers per cluster over time
// ---------------------------------------------------------------------------

/// Multi-series line chart of seller counts per cluster across all dates.
pub fn trend_chart(ui: &mut Ui, state: &AppState) {
    ui.heading("Sellers per cluster over time");

    if state.trend.is_empty() {
        ui.label("No trend data.");
        return;
    }

    Plot::new("trend_chart")
        .legend(Legend::default())
        .height(260.0)
        .y_axis_label("# sellers")
        .x_axis_formatter(|mark, _range| {
            x_to_date(mark.value).map(|d| d.to_string()).unwrap_or_default()
        })
        .label_formatter(|name, point| {
            let date = x_to_date(point.x).map(|d| d.to_string()).unwrap_or_default();
            if name.is_empty() {
                format!("{date}\n{:.0} sellers", point.y)
            } else {
                format!("cluster {name}\n{date}\n{:.0} sellers", point.y)
            }
        })
        .show(ui, |plot_ui| {
            for series in &state.trend {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|&(date, n)| [date_to_x(date), n as f64])
                    .collect();
                plot_ui.line(
                    Line::new(points)
                        .name(cluster_label(series.cluster))
                        .color(cluster_color(series.cluster))
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// 2. Distribution – sellers per cluster on the selected date
// ---------------------------------------------------------------------------

/// Bar chart of the cluster distribution in the filtered view, with the
/// count written above each bar.
pub fn distribution_chart(ui: &mut Ui, analytics: &DateAnalytics) {
    ui.heading(format!("Cluster distribution on {}", analytics.view.date));

    let counts = &analytics.distribution;
    if counts.is_empty() {
        ui.label("No sellers on this date.");
        return;
    }
    let max_count = counts.iter().map(|c| c.sellers).max().unwrap_or(0) as f64;

    Plot::new("distribution_chart")
        .height(260.0)
        .y_axis_label("# sellers")
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_formatter({
            let labels: Vec<String> = counts
                .iter()
                .map(|c| cluster_label(c.cluster))
                .collect();
            move |mark, _range| {
                let i = mark.value.round() as i64;
                if (mark.value - i as f64).abs() < 1e-6 && i >= 0 {
                    labels.get(i as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            }
        })
        .show(ui, |plot_ui| {
            for (i, count) in counts.iter().enumerate() {
                let bar = Bar::new(i as f64, count.sellers as f64)
                    .width(0.6)
                    .fill(cluster_color(count.cluster));
                plot_ui.bar_chart(
                    BarChart::new(vec![bar]).name(cluster_label(count.cluster)),
                );
                plot_ui.text(Text::new(
                    PlotPoint::new(i as f64, count.sellers as f64 + max_count * 0.03),
                    RichText::new(count.sellers.to_string()).strong(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// 3. Projection – 2-D PCA scatter colored by cluster
// ---------------------------------------------------------------------------

/// Scatter plot of the standardized features projected onto the two leading
/// principal components, one point per seller.
pub fn projection_chart(ui: &mut Ui, analytics: &DateAnalytics) {
    let ratio = analytics.projection.explained_variance_ratio;
    ui.heading("Seller distribution (PCA)");
    ui.label(format!(
        "Explained variance: PC1 {:.1}%, PC2 {:.1}%",
        ratio[0] * 100.0,
        ratio[1] * 100.0
    ));

    Plot::new("projection_chart")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("PC1")
        .y_axis_label("PC2")
        .data_aspect(1.0)
        .show(ui, |plot_ui| {
            // The view's scores are row-aligned with its indices, so group
            // them by cluster through the view's per-cluster row lists.
            for (&cluster, rows) in &analytics.view.by_cluster {
                let points: PlotPoints = rows
                    .iter()
                    .filter_map(|r| {
                        // `indices` is ascending by construction.
                        let pos = analytics.view.indices.binary_search(r).ok()?;
                        let s = analytics.projection.scores[pos];
                        Some([s[0], s[1]])
                    })
                    .collect();
                plot_ui.points(
                    Points::new(points)
                        .name(cluster_label(cluster))
                        .color(cluster_color(cluster))
                        .radius(2.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// 4. Importance heatmap – per-cluster means of the top-k features
// ---------------------------------------------------------------------------

/// Color-scaled matrix (features × clusters) of the per-cluster means for
/// the top-importance features, viridis-colored over the value range.
pub fn importance_heatmap(ui: &mut Ui, analytics: &DateAnalytics) {
    let means = &analytics.means;
    ui.heading(format!(
        "Mean of the {} most important features per cluster",
        means.features.len()
    ));

    // The mean-matrix columns are in ranking order, so pair them with the
    // importance scores for the expandable ranking list.
    ui.collapsing("Importance ranking", |ui| {
        for (rank, ((_, score), name)) in analytics
            .ranked_features
            .iter()
            .zip(&means.features)
            .enumerate()
        {
            ui.label(format!(
                "{}. {} ({:.3})",
                rank + 1,
                display_feature_name(name),
                score
            ));
        }
    });

    let Some((lo, hi)) = means.value_range() else {
        ui.label("No data to rank.");
        return;
    };
    let span = (hi - lo).max(f64::EPSILON);

    let cluster_labels: Vec<String> = means.clusters.iter().map(|&c| cluster_label(c)).collect();
    let feature_labels: Vec<String> = means
        .features
        .iter()
        .map(|f| display_feature_name(f).to_string())
        .collect();

    let hover_means = means.clone();
    Plot::new("importance_heatmap")
        .height(30.0 * feature_labels.len() as f32 + 60.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .x_axis_formatter({
            let labels = cluster_labels.clone();
            move |mark, _range| centered_tick(&labels, mark.value)
        })
        .y_axis_formatter({
            let labels = feature_labels.clone();
            move |mark, _range| centered_tick(&labels, mark.value)
        })
        .label_formatter(move |_name, point| {
            let c = point.x.floor() as isize;
            let f = point.y.floor() as isize;
            if c < 0 || f < 0 {
                return String::new();
            }
            let (c, f) = (c as usize, f as usize);
            match hover_means.values.get(c).and_then(|row| row.get(f)) {
                Some(v) => format!(
                    "cluster {} · {}\nmean {:.3}",
                    hover_means
                        .clusters
                        .get(c)
                        .map(|&cl| cluster_label(cl))
                        .unwrap_or_default(),
                    hover_means
                        .features
                        .get(f)
                        .map(|n| display_feature_name(n))
                        .unwrap_or(""),
                    v
                ),
                None => String::new(),
            }
        })
        .show(ui, |plot_ui| {
            for (c, row) in means.values.iter().enumerate() {
                for (f, &value) in row.iter().enumerate() {
                    let t = (value - lo) / span;
                    let cell = Polygon::new(PlotPoints::from(vec![
                        [c as f64, f as f64],
                        [c as f64 + 1.0, f as f64],
                        [c as f64 + 1.0, f as f64 + 1.0],
                        [c as f64, f as f64 + 1.0],
                    ]))
                    .fill_color(viridis(t))
                    .stroke(Stroke::new(0.5, Color32::from_gray(40)));
                    plot_ui.polygon(cell);
                }
            }
        });
}

/// Tick label centered in a unit cell: only the `i + 0.5` gridline of each
/// cell gets its label.
fn centered_tick(labels: &[String], value: f64) -> String {
    let centered = value - 0.5;
    let i = centered.round();
    if (centered - i).abs() < 0.25 && i >= 0.0 {
        labels.get(i as usize).cloned().unwrap_or_default()
    } else {
        String::new()
    }
}
