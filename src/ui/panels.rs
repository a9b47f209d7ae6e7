use eframe::egui::{self, Color32, RichText, Ui};

use crate::analysis::MIN_TOP_FEATURES;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: reference-date selector and the
/// top-features slider for the heatmap.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let dates = dataset.dates.clone();
    let max_top_k = state.max_top_k(dataset);

    if dates.is_empty() {
        ui.label("Dataset has no valid reference dates.");
        return;
    }

    // ---- Reference date (defaults to the most recent) ----
    ui.strong("Reference date");
    let current = state
        .selected_date
        .map(|d| d.to_string())
        .unwrap_or_default();
    egui::ComboBox::from_id_salt("reference_date")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for &date in &dates {
                let is_selected = state.selected_date == Some(date);
                if ui
                    .selectable_label(is_selected, date.to_string())
                    .clicked()
                {
                    state.select_date(date);
                }
            }
        });
    ui.separator();

    // ---- Heatmap feature count ----
    ui.strong("Top features in heatmap");
    ui.add(
        egui::Slider::new(&mut state.top_k, MIN_TOP_FEATURES..=max_top_k)
            .text("features"),
    );
    ui.separator();

    ui.label(format!(
        "{} rows · {} feature columns · {} dates",
        state.dataset.as_ref().map_or(0, |d| d.len()),
        state.dataset.as_ref().map_or(0, |d| d.feature_count()),
        dates.len()
    ));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(ds), Some(date)) = (&state.dataset, state.selected_date) {
            let on_date = ds
                .records
                .iter()
                .filter(|r| r.date == Some(date))
                .count();
            ui.label(format!("{} sellers on {}", on_date, date));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open clustering output")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_from_path(&path);
    }
}
