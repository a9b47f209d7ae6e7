use std::path::Path;

use chrono::NaiveDate;

use crate::analysis::{DateAnalytics, MAX_TOP_FEATURES, MIN_TOP_FEATURES};
use crate::analysis::summary::{self, ClusterTrend};
use crate::data::filter::DateView;
use crate::data::loader;
use crate::data::model::ClusterDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads successfully).
    pub dataset: Option<ClusterDataset>,

    /// The reference date shown in the date-scoped charts.
    pub selected_date: Option<NaiveDate>,

    /// How many top-importance features the heatmap shows (3–20).
    pub top_k: usize,

    /// Trend series over the whole dataset, rebuilt on load.
    pub trend: Vec<ClusterTrend>,

    /// Date-scoped chart data for the current selection. Recomputed whenever
    /// the selection changes; memoized so an idle frame does not refit.
    analytics: Option<DateAnalytics>,
    computed_for: Option<(NaiveDate, usize)>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selected_date: None,
            top_k: 10,
            trend: Vec::new(),
            analytics: None,
            computed_for: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: default to the most recent date,
    /// clamp the slider, and rebuild the trend series.
    pub fn set_dataset(&mut self, dataset: ClusterDataset) {
        self.selected_date = dataset.latest_date();
        self.top_k = self.top_k.clamp(MIN_TOP_FEATURES, self.max_top_k(&dataset));
        self.trend = summary::trend_series(&dataset);
        self.analytics = None;
        self.computed_for = None;
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Load a CSV and install it, or surface the failure in the status line.
    pub fn load_from_path(&mut self, path: &Path) {
        match loader::load_dataset(path) {
            Ok(dataset) => {
                if dataset.is_empty() {
                    log::warn!("Dataset at {} has no rows", path.display());
                }
                log::info!(
                    "Loaded {} rows, {} feature columns, {} dates from {}",
                    dataset.len(),
                    dataset.feature_count(),
                    dataset.dates.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Upper slider bound for the current dataset.
    pub fn max_top_k(&self, dataset: &ClusterDataset) -> usize {
        MAX_TOP_FEATURES
            .min(dataset.feature_count())
            .max(MIN_TOP_FEATURES)
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);
    }

    /// Recompute the filter/PCA/tree pass if the (date, top-k) selection
    /// changed since the last call. Runs once per frame, after the control
    /// panels have applied their edits; an unchanged selection is a no-op.
    pub fn refresh_analytics(&mut self) {
        let Some(dataset) = self.dataset.as_ref() else {
            return;
        };
        let Some(date) = self.selected_date else {
            return;
        };
        let key = (date, self.top_k);

        if self.computed_for != Some(key) {
            let view = DateView::build(dataset, date);
            self.analytics = Some(DateAnalytics::compute(dataset, view, self.top_k));
            self.computed_for = Some(key);
        }
    }

    /// Chart data for the current selection. Returns `None` until
    /// [`Self::refresh_analytics`] has run for it, so a stale result is
    /// never rendered.
    pub fn current_analytics(&self) -> Option<&DateAnalytics> {
        let date = self.selected_date?;
        if self.computed_for == Some((date, self.top_k)) {
            self.analytics.as_ref()
        } else {
            None
        }
    }
}
