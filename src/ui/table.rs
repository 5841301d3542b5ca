use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::loader::{COL_BOOSTER_CATEGORY, COL_CLASS, COL_LAUNCH_SITE, COL_PAYLOAD_MASS};
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Table of the launches currently plotted in the scatter chart.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let records = dataset.records();
    let visible = &state.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(50.0))
        .column(Column::remainder())
        .header(ROW_HEIGHT + 4.0, |mut header| {
            for name in [COL_LAUNCH_SITE, COL_PAYLOAD_MASS, COL_CLASS, COL_BOOSTER_CATEGORY] {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, visible.len(), |mut row| {
                let rec = &records[visible[row.index()]];
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.launch_site);
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(RichText::new(rec.outcome.to_string()).monospace());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(&rec.booster_category);
                });
            });
        });
}
