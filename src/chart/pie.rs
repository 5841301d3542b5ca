use serde::Serialize;

use crate::data::filter::{site_indices, SiteSelection};
use crate::data::model::{LaunchDataset, Outcome};

pub const ALL_SITES_TITLE: &str = "Fraction of Launch Success By Site";

/// One wedge of the pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Sum of all slice values.
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Build the success pie for the dropdown value.
///
/// * `All` – successful launches only, one slice per site (dataset site order).
/// * a site – that site's launches split by outcome class, largest count first.
pub fn pie_chart(dataset: &LaunchDataset, site: &SiteSelection) -> PieChart {
    match site {
        SiteSelection::All => success_by_site(dataset),
        SiteSelection::Site(name) => outcomes_for_site(dataset, site, name),
    }
}

fn success_by_site(dataset: &LaunchDataset) -> PieChart {
    let records = dataset.records();
    let slices = dataset
        .sites()
        .iter()
        .filter_map(|name| {
            let value = records
                .iter()
                .filter(|r| r.outcome.is_success() && r.launch_site == *name)
                .count();
            (value > 0).then(|| PieSlice {
                label: name.clone(),
                value,
            })
        })
        .collect();

    PieChart {
        title: ALL_SITES_TITLE.to_string(),
        slices,
    }
}

fn outcomes_for_site(dataset: &LaunchDataset, site: &SiteSelection, name: &str) -> PieChart {
    let mut counts = [(Outcome::Success, 0usize), (Outcome::Failure, 0usize)];
    for i in site_indices(dataset, site) {
        let outcome = dataset.records()[i].outcome;
        if let Some(entry) = counts.iter_mut().find(|(o, _)| *o == outcome) {
            entry.1 += 1;
        }
    }
    // Stable sort: ties keep success first.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let slices = counts
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(outcome, n)| PieSlice {
            label: outcome.to_string(),
            value: *n,
        })
        .collect();

    PieChart {
        title: format!("Success of {name}"),
        slices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{rec, sample_dataset};

    fn values(chart: &PieChart) -> Vec<(&str, usize)> {
        chart
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.value))
            .collect()
    }

    #[test]
    fn all_sites_counts_successes_per_site() {
        let ds = sample_dataset();
        let chart = pie_chart(&ds, &SiteSelection::All);
        assert_eq!(chart.title, ALL_SITES_TITLE);
        assert_eq!(
            values(&chart),
            vec![
                ("CCAFS LC-40", 1),
                ("VAFB SLC-4E", 1),
                ("KSC LC-39A", 2),
                ("CCAFS SLC-40", 1),
            ]
        );
        let successes = ds.records().iter().filter(|r| r.outcome.is_success()).count();
        assert_eq!(chart.total(), successes);
    }

    #[test]
    fn all_sites_omits_sites_without_success() {
        let ds = LaunchDataset::from_records(vec![
            rec("CCAFS LC-40", 100.0, 0, "v1.0"),
            rec("KSC LC-39A", 200.0, 1, "FT"),
        ]);
        let chart = pie_chart(&ds, &SiteSelection::All);
        assert_eq!(values(&chart), vec![("KSC LC-39A", 1)]);
    }

    #[test]
    fn single_site_slices_sum_to_site_rows() {
        let ds = sample_dataset();
        for name in ds.sites() {
            let chart = pie_chart(&ds, &SiteSelection::Site(name.clone()));
            let rows = ds.records().iter().filter(|r| r.launch_site == *name).count();
            assert_eq!(chart.total(), rows, "site {name}");
            assert_eq!(chart.title, format!("Success of {name}"));
        }
    }

    #[test]
    fn single_site_orders_by_count() {
        let ds = sample_dataset();
        let chart = pie_chart(&ds, &SiteSelection::Site("CCAFS LC-40".into()));
        assert_eq!(values(&chart), vec![("0", 2), ("1", 1)]);

        let chart = pie_chart(&ds, &SiteSelection::Site("KSC LC-39A".into()));
        assert_eq!(values(&chart), vec![("1", 2), ("0", 1)]);
    }

    #[test]
    fn one_row_site_gives_single_success_slice() {
        let ds = LaunchDataset::from_records(vec![rec("CCAFS", 2500.0, 1, "v1.0")]);
        let chart = pie_chart(&ds, &SiteSelection::Site("CCAFS".into()));
        assert_eq!(values(&chart), vec![("1", 1)]);
    }

    #[test]
    fn unknown_site_or_empty_table_gives_empty_pie() {
        let ds = sample_dataset();
        assert!(pie_chart(&ds, &SiteSelection::Site("Boca Chica".into())).is_empty());
        assert!(pie_chart(&LaunchDataset::default(), &SiteSelection::All).is_empty());
    }
}
