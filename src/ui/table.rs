use eframe::egui::{Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::summary::MeanMatrix;
use crate::data::model::cluster_label;

use super::charts::display_feature_name;

// ---------------------------------------------------------------------------
// Summary table – per-cluster means with the column maximum highlighted
// ---------------------------------------------------------------------------

/// Render the per-cluster mean-revenue-share table. The largest value in
/// each feature column is highlighted, mirroring the chart ranking.
pub fn cluster_means_table(ui: &mut Ui, means: &MeanMatrix) {
    ui.heading("Mean revenue share per cluster");

    if means.clusters.is_empty() {
        ui.label("No clusters on this date.");
        return;
    }

    let max_rows: Vec<Option<usize>> = (0..means.features.len())
        .map(|f| means.max_row_for(f))
        .collect();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(70.0))
        .columns(Column::remainder().at_least(60.0), means.features.len())
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Cluster");
            });
            for name in &means.features {
                let name = display_feature_name(name).to_string();
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|mut body| {
            for (c, &cluster) in means.clusters.iter().enumerate() {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(cluster_label(cluster));
                    });
                    for (f, &value) in means.values[c].iter().enumerate() {
                        row.col(|ui| {
                            let text = format!("{value:.3}");
                            if max_rows[f] == Some(c) {
                                ui.label(
                                    RichText::new(text)
                                        .strong()
                                        .color(Color32::LIGHT_GREEN),
                                );
                            } else {
                                ui.label(text);
                            }
                        });
                    }
                });
            }
        });
}
