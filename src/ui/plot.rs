use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{PieChart, ScatterChart};
use crate::color::ColorMap;

const PLOT_HEIGHT: f32 = 340.0;
/// Arc segments per 90° of wedge.
const ARC_SEGMENTS: usize = 24;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Render the success pie. Slices start at 12 o'clock and run clockwise;
/// each slice takes its colour from `colors` by label.
pub fn pie_plot(ui: &mut Ui, chart: &PieChart, colors: &ColorMap) {
    chart_title(ui, &chart.title, chart.is_empty());

    let total = chart.total() as f64;

    Plot::new("success_pie")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            if total <= 0.0 {
                return;
            }
            let mut start = 0.0;
            for slice in &chart.slices {
                let color = colors.color_for(&slice.label);
                let fraction = slice.value as f64 / total;
                let sweep = fraction * TAU;

                for wedge in wedge_polygons(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(wedge))
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let [x, y] = polar(start + sweep / 2.0, 0.65);
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(format!("{:.1}%", fraction * 100.0)).strong(),
                    )
                    .color(Color32::BLACK),
                );
                start += sweep;
            }
        });
}

/// Point on the unit-radius pie at `angle` radians clockwise from 12 o'clock.
fn polar(angle: f64, radius: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

/// Split a wedge into convex pieces of at most 90° each (polygon fills must be
/// convex). Each piece starts at the centre followed by its arc points.
pub(crate) fn wedge_polygons(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    if sweep <= 0.0 {
        return Vec::new();
    }
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let piece_sweep = sweep / pieces as f64;

    (0..pieces)
        .map(|p| {
            let a0 = start + p as f64 * piece_sweep;
            let mut points = Vec::with_capacity(ARC_SEGMENTS + 2);
            points.push([0.0, 0.0]);
            for s in 0..=ARC_SEGMENTS {
                let a = a0 + piece_sweep * s as f64 / ARC_SEGMENTS as f64;
                points.push(polar(a, 1.0));
            }
            points
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render payload mass vs. outcome class, one coloured series per booster.
pub fn scatter_plot(ui: &mut Ui, chart: &ScatterChart, color_map: &ColorMap) {
    chart_title(ui, &chart.title, chart.is_empty());

    Plot::new("payload_scatter")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|p| [p.payload_mass_kg, f64::from(p.class)])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(&series.name)
                        .color(color_map.color_for(&series.name))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}

fn chart_title(ui: &mut Ui, title: &str, empty: bool) {
    ui.horizontal(|ui: &mut Ui| {
        ui.strong(title);
        if empty {
            ui.weak("No data");
        }
    });
}
