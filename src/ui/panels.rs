use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::SliderConfig;
use crate::data::filter::{site_options, PayloadRange, SiteSelection};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Dashboard controls
// ---------------------------------------------------------------------------

/// Page heading.
pub fn heading(ui: &mut Ui, state: &AppState) {
    let cfg = &state.config;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new(&cfg.heading)
                .size(cfg.heading_size)
                .color(cfg.heading_color),
        );
    });
}

/// Launch-site dropdown with a search box. "All Sites" is always listed first.
pub fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    let options = match &state.dataset {
        Some(ds) => site_options(ds),
        None => Vec::new(),
    };

    let mut chosen: Option<SiteSelection> = None;
    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(state.site.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_search)
                    .hint_text("Select a Launch Site here"),
            );
            ui.separator();

            let needle = state.site_search.to_lowercase();
            for opt in options
                .iter()
                .filter(|o| o.label.to_lowercase().contains(&needle))
            {
                let selected = state.site.value() == opt.value;
                if ui.selectable_label(selected, opt.label.as_str()).clicked() {
                    chosen = Some(SiteSelection::from_value(&opt.value));
                }
            }
        });

    if let Some(site) = chosen {
        state.site_search.clear();
        state.select_site(site);
    }
}

/// Space right of each slider track for the value box and its caption.
const SLIDER_TEXT_WIDTH: f32 = 110.0;
const MIN_TRACK_WIDTH: f32 = 160.0;
const MARK_ROW_HEIGHT: f32 = 14.0;

/// Dual-handle payload range slider. The handles never cross: moving one past
/// the other drags the other along.
///
/// Step rounding only applies while a handle is dragged, so the observed
/// `[min, max]` default survives rendering untouched.
pub fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    let cfg = state.config.slider;
    let previous = state.payload_range;
    let mut range = previous;

    ui.label("Payload range (Kg):");
    let track_width = (ui.available_width() - SLIDER_TEXT_WIDTH).max(MIN_TRACK_WIDTH);
    ui.scope(|ui: &mut Ui| {
        ui.spacing_mut().slider_width = track_width;
        for (value, caption) in [(&mut range.low, "from"), (&mut range.high, "to")] {
            ui.add(
                egui::Slider::new(value, cfg.min..=cfg.max)
                    .step_by(cfg.step)
                    .clamping(egui::SliderClamping::Edits)
                    .text(caption),
            );
        }
    });
    slider_marks(ui, &cfg, track_width);

    state.set_payload_range(ordered(previous, range));
}

/// Tick labels under the slider track, each centred on its value.
fn slider_marks(ui: &mut Ui, cfg: &SliderConfig, track_width: f32) {
    // Slider handles travel inside the track, inset by their radius.
    let inset = ui.spacing().interact_size.y / 2.5;
    let color = ui.visuals().weak_text_color();
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(track_width, MARK_ROW_HEIGHT),
        egui::Sense::hover(),
    );

    let painter = ui.painter();
    for (mark, x) in mark_offsets(cfg, track_width, inset) {
        painter.text(
            egui::pos2(rect.left() + x, rect.center().y),
            egui::Align2::CENTER_CENTER,
            format!("{mark:.0}"),
            egui::FontId::proportional(11.0),
            color,
        );
    }
}

/// Horizontal offset of each tick mark from the left edge of the track.
fn mark_offsets(cfg: &SliderConfig, track_width: f32, inset: f32) -> Vec<(f64, f32)> {
    let span = cfg.max - cfg.min;
    let usable = track_width - 2.0 * inset;
    cfg.marks()
        .into_iter()
        .map(|mark| {
            let t = if span > 0.0 {
                ((mark - cfg.min) / span) as f32
            } else {
                0.0
            };
            (mark, inset + t * usable)
        })
        .collect()
}

/// Resolve crossed handles in favour of the handle that just moved.
fn ordered(previous: PayloadRange, mut next: PayloadRange) -> PayloadRange {
    if next.low > next.high {
        if next.low != previous.low {
            next.high = next.low;
        } else {
            next.low = next.high;
        }
    }
    next
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
            if ui
                .add_enabled(state.dataset.is_some(), egui::Button::new("Export figures…"))
                .clicked()
            {
                export_figures_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let source = state
                .source_path
                .as_deref()
                .and_then(Path::file_name)
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            ui.label(format!(
                "{source}  {} launches, {} in range",
                ds.len(),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        if ui
            .selectable_label(state.show_records, "Records table")
            .clicked()
        {
            state.show_records = !state.show_records;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} sites",
                    dataset.len(),
                    dataset.sites().len()
                );
                state.set_dataset(dataset, Some(path));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

pub fn export_figures_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export figures")
        .set_file_name("figures.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match write_figures(state, &path) {
            Ok(()) => {
                log::info!("Exported figures to {}", path.display());
                state.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to export figures: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

fn write_figures(state: &AppState, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&state.figures()).context("serializing figures")?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
