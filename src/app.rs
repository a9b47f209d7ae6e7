use eframe::egui;

use crate::state::AppState;
use crate::ui::{charts, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct SellerClustersApp {
    pub state: AppState,
}

impl SellerClustersApp {
    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for SellerClustersApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // The panels above may have changed the selection; refit once here
        // so the charts below only borrow the memoized result.
        self.state.refresh_analytics();

        // ---- Central panel: the four charts and the summary table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    charts::trend_chart(ui, &self.state);
                    ui.separator();

                    let Some(analytics) = self.state.current_analytics() else {
                        ui.centered_and_justified(|ui| {
                            ui.heading("Open a clustering output CSV  (File → Open…)");
                        });
                        return;
                    };

                    charts::distribution_chart(ui, analytics);
                    ui.separator();
                    charts::projection_chart(ui, analytics);
                    ui.separator();
                    charts::importance_heatmap(ui, analytics);
                    ui.separator();
                    table::cluster_means_table(ui, &analytics.means);
                });
        });
    }
}
