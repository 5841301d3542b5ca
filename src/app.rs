use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Bottom panel: filtered records ----
        if self.state.show_records {
            egui::TopBottomPanel::bottom("records_panel")
                .default_height(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    table::records_table(ui, &self.state);
                });
        }

        // ---- Central panel: dashboard layout, top to bottom ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::heading(ui, &self.state);
                    ui.add_space(8.0);

                    if self.state.dataset.is_none() {
                        ui.vertical_centered(|ui: &mut Ui| {
                            ui.heading("Open a launch table to begin  (File → Open…)");
                        });
                        return;
                    }

                    panels::site_dropdown(ui, &mut self.state);
                    ui.add_space(12.0);

                    plot::pie_plot(ui, &self.state.pie, self.state.pie_colors());
                    ui.add_space(12.0);

                    panels::payload_slider(ui, &mut self.state);
                    ui.add_space(12.0);

                    plot::scatter_plot(ui, &self.state.scatter, &self.state.booster_colors);
                });
        });
    }
}
