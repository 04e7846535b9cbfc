//! Quick statistics - per-dimension averages for the sidebar
//!
//! Strictly derived from the selected year's records; never stored.

use crate::controller::ViewState;
use crate::dataset::Dataset;
use crate::simulation::{adjust, SimulationParams};
use serde::Serialize;

/// Sidebar summary for the selected year under the active simulation flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct QuickStats {
    pub year: u16,
    pub simulated: bool,
    pub avg_threat: f64,
    pub avg_technical_controls: f64,
    pub avg_governance: f64,
    pub avg_stakeholder_protection: f64,
    /// Mean threat maturity minus mean stakeholder protection.
    pub overall_gap: f64,
}

/// Compute the sidebar statistics for the current view state.
pub fn compute_stats(dataset: &Dataset, state: &ViewState, params: &SimulationParams) -> QuickStats {
    let records = dataset.records_for_year(state.selected_year);
    let count = records.len() as f64;

    let mut sums = [0.0f64; 4];
    for record in records {
        let adjusted = adjust(record, state.simulation_enabled, params);
        for (sum, level) in sums.iter_mut().zip(adjusted.as_array()) {
            *sum += f64::from(level);
        }
    }

    let avg_threat = sums[0] / count;
    let avg_stakeholder_protection = sums[3] / count;

    QuickStats {
        year: state.selected_year,
        simulated: state.simulation_enabled,
        avg_threat,
        avg_technical_controls: sums[1] / count,
        avg_governance: sums[2] / count,
        avg_stakeholder_protection,
        overall_gap: avg_threat - avg_stakeholder_protection,
    }
}
