use serde::Serialize;

use crate::data::filter::{filtered_indices, PayloadRange, SiteSelection};
use crate::data::loader::{COL_CLASS, COL_PAYLOAD_MASS};
use crate::data::model::LaunchDataset;

/// A launch plotted as `(payload mass, outcome class)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub class: u8,
}

/// All points sharing one booster version category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.point_count() == 0
    }
}

/// Build the payload-vs-outcome scatter for the dropdown and slider values.
///
/// Series appear in the order their booster category first shows up among the
/// filtered rows.
pub fn scatter_chart(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> ScatterChart {
    let mut series: Vec<ScatterSeries> = Vec::new();

    for i in filtered_indices(dataset, site, range) {
        let rec = &dataset.records()[i];
        let point = ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            class: rec.outcome.class(),
        };
        match series.iter_mut().find(|s| s.name == rec.booster_category) {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                name: rec.booster_category.clone(),
                points: vec![point],
            }),
        }
    }

    let title = match site {
        SiteSelection::All => "Payload Mass (kg) vs. Success: All Sites".to_string(),
        SiteSelection::Site(name) => format!("Payload vs. Success: {name}"),
    };

    ScatterChart {
        title,
        x_label: COL_PAYLOAD_MASS.to_string(),
        y_label: COL_CLASS.to_string(),
        series,
    }
}
