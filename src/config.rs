use std::path::PathBuf;

use eframe::egui::Color32;

/// Range-slider bounds and tick marks, in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub mark_step: f64,
}

impl SliderConfig {
    /// Tick mark positions from `min` to `max` inclusive.
    pub fn marks(&self) -> Vec<f64> {
        if self.mark_step <= 0.0 {
            return vec![self.min, self.max];
        }
        let n = ((self.max - self.min) / self.mark_step).floor() as usize;
        (0..=n).map(|i| self.min + i as f64 * self.mark_step).collect()
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1000.0,
            mark_step: 2500.0,
        }
    }
}

/// Fixed settings of the dashboard window and its widgets.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Launch table loaded at startup, relative to the working directory.
    pub dataset_path: PathBuf,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub heading: String,
    pub heading_color: Color32,
    pub heading_size: f32,
    pub slider: SliderConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("spacex_launch_dash.csv"),
            window_title: "SpaceX Launch Records Dashboard".to_string(),
            window_size: [1100.0, 900.0],
            min_window_size: [600.0, 500.0],
            heading: "SpaceX Launch Records Dashboard".to_string(),
            heading_color: Color32::from_rgb(0x50, 0x3D, 0x36),
            heading_size: 40.0,
            slider: SliderConfig::default(),
        }
    }
}
