//! Chart values produced from the launch table.
//!
//! Both builders are pure functions of the dataset and the current widget
//! values. The UI caches their output and only rebuilds it when an input
//! changes; the structs serialize as-is for figure export.

pub mod pie;
pub mod scatter;

use serde::Serialize;

pub use pie::{pie_chart, PieChart};
pub use scatter::{scatter_chart, ScatterChart};

/// The two figures currently on screen, as written by File → Export figures.
#[derive(Debug, Clone, Serialize)]
pub struct Figures<'a> {
    pub pie: &'a PieChart,
    pub scatter: &'a ScatterChart,
}
