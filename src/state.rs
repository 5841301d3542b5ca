use std::path::PathBuf;

use crate::chart::{pie_chart, scatter_chart, Figures, PieChart, ScatterChart};
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::{filtered_indices, PayloadRange, SiteSelection};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Widget setters recompute only the charts that depend on them: the site
/// drives both charts, the payload range only drives the scatter chart.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<LaunchDataset>,

    /// Where the dataset came from, shown in the top bar.
    pub source_path: Option<PathBuf>,

    /// Dropdown value.
    pub site: SiteSelection,

    /// Text typed into the dropdown's search box.
    pub site_search: String,

    /// Slider value.
    pub payload_range: PayloadRange,

    /// Cached chart outputs.
    pub pie: PieChart,
    pub scatter: ScatterChart,

    /// Rows currently shown in the scatter chart (cached).
    pub visible_indices: Vec<usize>,

    /// Booster category colours for the scatter chart.
    pub booster_colors: ColorMap,

    /// Pie colours: per site for "All Sites", fixed per outcome otherwise.
    pub site_colors: ColorMap,
    pub outcome_colors: ColorMap,

    /// Whether the records table is open.
    pub show_records: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let payload_range = PayloadRange::new(config.slider.min, config.slider.max);
        Self {
            config,
            dataset: None,
            source_path: None,
            site: SiteSelection::All,
            site_search: String::new(),
            payload_range,
            pie: PieChart::default(),
            scatter: ScatterChart::default(),
            visible_indices: Vec::new(),
            booster_colors: ColorMap::default(),
            site_colors: ColorMap::default(),
            outcome_colors: ColorMap::outcomes(),
            show_records: false,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and reset the widgets to their defaults.
    pub fn set_dataset(&mut self, dataset: LaunchDataset, source: Option<PathBuf>) {
        self.site = SiteSelection::All;
        self.site_search.clear();
        self.payload_range = match dataset.payload_bounds() {
            Some((lo, hi)) => PayloadRange::new(lo, hi),
            None => PayloadRange::new(self.config.slider.min, self.config.slider.max),
        };
        self.booster_colors = ColorMap::new(dataset.booster_categories());
        self.site_colors = ColorMap::new(dataset.sites());

        self.dataset = Some(dataset);
        self.source_path = source;
        self.status_message = None;

        self.refresh_pie();
        self.refresh_scatter();
    }

    /// Dropdown changed.
    pub fn select_site(&mut self, site: SiteSelection) {
        if site == self.site {
            return;
        }
        log::debug!("site selection: {site}");
        self.site = site;
        self.refresh_pie();
        self.refresh_scatter();
    }

    /// Slider changed.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if range == self.payload_range {
            return;
        }
        log::debug!("payload range: [{}, {}]", range.low, range.high);
        self.payload_range = range;
        self.refresh_scatter();
    }

    /// Colours for the current pie, keyed by slice label.
    pub fn pie_colors(&self) -> &ColorMap {
        match self.site {
            SiteSelection::All => &self.site_colors,
            SiteSelection::Site(_) => &self.outcome_colors,
        }
    }

    /// Snapshot of both charts for export.
    pub fn figures(&self) -> Figures<'_> {
        Figures {
            pie: &self.pie,
            scatter: &self.scatter,
        }
    }

    fn refresh_pie(&mut self) {
        self.pie = match &self.dataset {
            Some(ds) => pie_chart(ds, &self.site),
            None => PieChart::default(),
        };
    }

    fn refresh_scatter(&mut self) {
        match &self.dataset {
            Some(ds) => {
                self.visible_indices = filtered_indices(ds, &self.site, self.payload_range);
                self.scatter = scatter_chart(ds, &self.site, self.payload_range);
            }
            None => {
                self.visible_indices.clear();
                self.scatter = ScatterChart::default();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::sample_dataset;

    fn loaded_state() -> AppState {
        let mut state = AppState::new(DashboardConfig::default());
        state.set_dataset(sample_dataset(), None);
        state
    }

    #[test]
    fn loading_resets_widgets_to_observed_range() {
        let state = loaded_state();
        assert_eq!(state.site, SiteSelection::All);
        assert_eq!(state.payload_range, PayloadRange::new(0.0, 9600.0));
        assert_eq!(state.scatter.point_count(), 10);
        assert_eq!(state.visible_indices.len(), 10);
        assert_eq!(state.pie.slices.len(), 4);
    }

    #[test]
    fn site_change_updates_both_charts() {
        let mut state = loaded_state();
        state.select_site(SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(state.pie.title, "Success of KSC LC-39A");
        assert_eq!(state.scatter.title, "Payload vs. Success: KSC LC-39A");
        assert_eq!(state.visible_indices, vec![4, 5, 8]);
    }

    #[test]
    fn pie_colours_follow_labels_not_slice_order() {
        let mut state = loaded_state();

        // CCAFS LC-40 has more failures, KSC LC-39A more successes.
        state.select_site(SiteSelection::Site("CCAFS LC-40".into()));
        assert_eq!(state.pie.slices[0].label, "0");
        let failure = state.pie_colors().color_for("0");
        let success = state.pie_colors().color_for("1");

        state.select_site(SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(state.pie.slices[0].label, "1");
        assert_eq!(state.pie_colors().color_for("0"), failure);
        assert_eq!(state.pie_colors().color_for("1"), success);
        assert_ne!(failure, success);

        state.select_site(SiteSelection::All);
        let ksc = state.pie_colors().color_for("KSC LC-39A");
        let vafb = state.pie_colors().color_for("VAFB SLC-4E");
        assert_ne!(ksc, vafb);
        assert_ne!(ksc, eframe::egui::Color32::GRAY);
    }

    #[test]
    fn range_change_leaves_pie_untouched() {
        let mut state = loaded_state();
        let pie_before = state.pie.clone();
        state.set_payload_range(PayloadRange::new(9700.0, 10_000.0));
        assert_eq!(state.pie, pie_before);
        assert!(state.scatter.is_empty());
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn empty_state_has_empty_charts() {
        let mut state = AppState::new(DashboardConfig::default());
        state.select_site(SiteSelection::Site("CCAFS LC-40".into()));
        assert!(state.pie.is_empty());
        assert!(state.scatter.is_empty());
        assert_eq!(state.payload_range, PayloadRange::new(0.0, 10_000.0));
    }

    #[test]
    fn figures_serialize_to_json() {
        let state = loaded_state();
        let json = serde_json::to_value(state.figures()).unwrap();
        assert_eq!(json["pie"]["title"], "Fraction of Launch Success By Site");
        assert_eq!(json["scatter"]["series"][0]["name"], "v1.0");
    }
}
