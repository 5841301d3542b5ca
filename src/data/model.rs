use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome as recorded in the `class` column (1 = success, 0 = failure).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value used on the scatter y-axis and as pie slice label.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    /// Interpret a raw class value. Anything other than exactly 0 or 1 is rejected.
    pub fn from_class(value: f64) -> Option<Self> {
        if value == 0.0 {
            Some(Outcome::Failure)
        } else if value == 1.0 {
            Some(Outcome::Success)
        } else {
            None
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The loaded launch table with pre-computed column indices.
///
/// Rows are private: once built, the table can only be read. Every filter
/// produces index lists or new chart values, never a modified dataset.
#[derive(Debug, Clone, Default)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    /// Distinct launch sites in order of first appearance.
    sites: Vec<String>,
    /// Distinct booster version categories in order of first appearance.
    booster_categories: Vec<String>,
    payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: Vec<String> = Vec::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            if !booster_categories.contains(&rec.booster_category) {
                booster_categories.push(rec.booster_category.clone());
            }
            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
                None => (m, m),
            });
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &[String] {
        &self.booster_categories
    }

    /// Observed `(min, max)` payload mass; `None` for an empty table.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.payload_bounds
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn rec(site: &str, payload: f64, class: u8, booster: &str) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            outcome: if class == 1 {
                Outcome::Success
            } else {
                Outcome::Failure
            },
            booster_category: booster.to_string(),
        }
    }

    /// Small table shaped like the real launch data.
    pub(crate) fn sample_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            rec("CCAFS LC-40", 0.0, 0, "v1.0"),
            rec("CCAFS LC-40", 525.0, 0, "v1.0"),
            rec("VAFB SLC-4E", 500.0, 0, "v1.1"),
            rec("CCAFS LC-40", 3170.0, 1, "v1.1"),
            rec("KSC LC-39A", 2490.0, 1, "FT"),
            rec("KSC LC-39A", 5300.0, 1, "FT"),
            rec("VAFB SLC-4E", 9600.0, 1, "FT"),
            rec("CCAFS SLC-40", 6460.0, 0, "B4"),
            rec("KSC LC-39A", 3600.0, 0, "B4"),
            rec("CCAFS SLC-40", 4400.0, 1, "B5"),
        ])
    }

    #[test]
    fn distinct_values_keep_first_appearance_order() {
        let ds = sample_dataset();
        assert_eq!(
            ds.sites(),
            ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"]
        );
        assert_eq!(ds.booster_categories(), ["v1.0", "v1.1", "FT", "B4", "B5"]);
    }

    #[test]
    fn payload_bounds_cover_all_rows() {
        let ds = sample_dataset();
        assert_eq!(ds.payload_bounds(), Some((0.0, 9600.0)));
        assert_eq!(LaunchDataset::default().payload_bounds(), None);
    }

    #[test]
    fn outcome_accepts_only_binary_classes() {
        assert_eq!(Outcome::from_class(1.0), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(0.0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(0.5), None);
        assert_eq!(Outcome::from_class(2.0), None);
        assert_eq!(Outcome::Success.to_string(), "1");
    }
}
