//! Protection-gap payload
//!
//! Gap = threat maturity minus the best-performing protective dimension,
//! computed under the active simulation adjustment.
//!
//! Global invariants enforced:
//! - Deterministic ordering: gap descending, then category name ascending
//! - Idempotent under re-invocation with unchanged state

use crate::controller::ViewState;
use crate::dataset::Dataset;
use crate::simulation::{adjust, SimulationParams};
use crate::theme::ThemePalette;
use serde::Serialize;

/// Gap severity band, mapped onto the integer gap scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GapSeverity {
    Low,      // <= 0
    Moderate, // 1
    High,     // 2
    Critical, // >= 3
}

impl GapSeverity {
    pub fn from_gap(gap: i8) -> GapSeverity {
        if gap >= 3 {
            GapSeverity::Critical
        } else if gap == 2 {
            GapSeverity::High
        } else if gap == 1 {
            GapSeverity::Moderate
        } else {
            GapSeverity::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GapSeverity::Low => "low",
            GapSeverity::Moderate => "moderate",
            GapSeverity::High => "high",
            GapSeverity::Critical => "critical",
        }
    }

    /// Bar color for this severity.
    pub fn color(&self) -> &'static str {
        match self {
            GapSeverity::Critical => "#d73027",
            GapSeverity::High => "#fc8d59",
            GapSeverity::Moderate => "#fee08b",
            GapSeverity::Low => "#d9ef8b",
        }
    }
}

/// One bar of the gap chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GapEntry {
    pub category: String,
    pub gap: i8,
    pub threat_level: u8,
    pub best_protection: u8,
    pub severity: GapSeverity,
    pub color: &'static str,
}

/// Gap chart for the selected year under the active simulation flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct GapPayload {
    pub year: u16,
    pub simulated: bool,
    pub palette: ThemePalette,
    pub entries: Vec<GapEntry>,
}

/// Compute the gap payload for the current view state.
pub fn compute_gaps(dataset: &Dataset, state: &ViewState, params: &SimulationParams) -> GapPayload {
    let mut entries: Vec<GapEntry> = dataset
        .records_for_year(state.selected_year)
        .into_iter()
        .map(|record| {
            let adjusted = adjust(record, state.simulation_enabled, params);
            let best = adjusted.best_protection();
            let gap = adjusted.threat as i8 - best as i8;
            let severity = GapSeverity::from_gap(gap);
            GapEntry {
                category: record.category.clone(),
                gap,
                threat_level: adjusted.threat,
                best_protection: best,
                severity,
                color: severity.color(),
            }
        })
        .collect();

    sort_entries(&mut entries);

    GapPayload {
        year: state.selected_year,
        simulated: state.simulation_enabled,
        palette: state.theme.palette(),
        entries,
    }
}

/// Sort gap entries deterministically.
fn sort_entries(entries: &mut [GapEntry]) {
    entries.sort_by(|a, b| {
        // 1. Gap descending
        b.gap
            .cmp(&a.gap)
            // 2. Category name ascending
            .then_with(|| a.category.cmp(&b.category))
    });
}
