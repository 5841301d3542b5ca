use std::fmt;

use super::model::{LaunchDataset, LaunchRecord};

// ---------------------------------------------------------------------------
// Site selection (dropdown value)
// ---------------------------------------------------------------------------

/// Dropdown value: either the "All Sites" sentinel or one launch site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Raw value carried by the sentinel option.
    pub const ALL_VALUE: &'static str = "ALL";
    /// Label shown for the sentinel option.
    pub const ALL_LABEL: &'static str = "All Sites";

    /// Parse a raw dropdown value.
    pub fn from_value(value: &str) -> Self {
        if value == Self::ALL_VALUE {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// Raw dropdown value; inverse of [`SiteSelection::from_value`].
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => Self::ALL_VALUE,
            SiteSelection::Site(site) => site,
        }
    }

    /// Whether a record passes this selection.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => Self::ALL_LABEL,
            SiteSelection::Site(site) => site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One dropdown entry: the raw value it carries and the text it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteOption {
    pub value: String,
    pub label: String,
}

/// Dropdown entries: the "All Sites" sentinel first, then every site in
/// dataset order.
pub fn site_options(dataset: &LaunchDataset) -> Vec<SiteOption> {
    let sentinel = SiteOption {
        value: SiteSelection::ALL_VALUE.to_string(),
        label: SiteSelection::ALL_LABEL.to_string(),
    };
    std::iter::once(sentinel)
        .chain(dataset.sites().iter().map(|site| SiteOption {
            value: site.clone(),
            label: site.clone(),
        }))
        .collect()
}

// ---------------------------------------------------------------------------
// Payload range (slider value)
// ---------------------------------------------------------------------------

/// Inclusive payload-mass interval in kilograms.
///
/// No normalisation happens: a range with `low > high` contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// Row filters
// ---------------------------------------------------------------------------

/// Indices of rows belonging to the selected site (all rows for the sentinel).
pub fn site_indices(dataset: &LaunchDataset, site: &SiteSelection) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| site.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

/// Indices of rows passing both the site and the payload filter, in table order.
pub fn filtered_indices(
    dataset: &LaunchDataset,
    site: &SiteSelection,
    range: PayloadRange,
) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| range.contains(rec.payload_mass_kg) && site.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
