use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Outcome;

pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x2C, 0xA0, 0x2C);
pub const FAILURE_COLOR: Color32 = Color32::from_rgb(0xD6, 0x27, 0x28);

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of a column (booster versions) to distinct colours.
///
/// Built once per dataset so a category keeps its colour while filters change.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: HashMap<String, Color32>,
}

impl ColorMap {
    pub fn new(categories: &[String]) -> Self {
        let mapping = categories
            .iter()
            .cloned()
            .zip(generate_palette(categories.len()))
            .collect();
        ColorMap { mapping }
    }

    /// Fixed colours for the outcome-class labels ("1" and "0").
    pub fn outcomes() -> Self {
        let mapping = [
            (Outcome::Success.to_string(), SUCCESS_COLOR),
            (Outcome::Failure.to_string(), FAILURE_COLOR),
        ]
        .into_iter()
        .collect();
        ColorMap { mapping }
    }

    /// Look up the colour for a category; unknown labels are grey.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping.get(category).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colours = generate_palette(5);
        assert_eq!(colours.len(), 5);
        for (i, a) in colours.iter().enumerate() {
            for b in &colours[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn palette_rounds_channels() {
        // Hue 72°: red channel is 0.7525 * 255 = 191.9, which must round up.
        assert_eq!(generate_palette(5)[1], Color32::from_rgb(192, 226, 54));
    }

    #[test]
    fn outcome_colours_are_keyed_by_class_label() {
        let map = ColorMap::outcomes();
        assert_eq!(map.color_for("1"), SUCCESS_COLOR);
        assert_eq!(map.color_for("0"), FAILURE_COLOR);
    }

    #[test]
    fn colour_map_is_stable_and_greys_unknowns() {
        let cats = vec!["v1.0".to_string(), "FT".to_string(), "B5".to_string()];
        let map = ColorMap::new(&cats);
        let palette = generate_palette(3);
        assert_eq!(map.color_for("v1.0"), palette[0]);
        assert_eq!(map.color_for("B5"), palette[2]);
        assert_eq!(map.color_for("B4"), Color32::GRAY);
    }
}
