//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output across runs with unchanged state

use crate::controller::ViewState;
use crate::dataset::Dataset;
use crate::detail::{compute_detail, DetailPayload};
use crate::gap::{compute_gaps, GapPayload};
use crate::heatmap::{compute_heatmap, HeatmapPayload};
use crate::radar::{compute_radar, RadarPayload};
use crate::simulation::SimulationParams;
use crate::stats::{compute_stats, QuickStats};
use serde::Serialize;

/// Every chart payload for one view state, bundled for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DashboardSnapshot {
    pub state: ViewState,
    pub stats: QuickStats,
    pub heatmap: HeatmapPayload,
    pub gaps: GapPayload,
    /// Radar for the selected category, or the first category when nothing
    /// is selected (the dashboard always shows one profile).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radar: Option<RadarPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailPayload>,
}

impl DashboardSnapshot {
    /// Compute all payloads for the given state.
    pub fn compute(dataset: &Dataset, state: &ViewState, params: &SimulationParams) -> Self {
        let radar_category = state
            .selected_category
            .as_deref()
            .or_else(|| dataset.categories().first().map(String::as_str));
        let radar =
            radar_category.and_then(|c| compute_radar(dataset, state, params, c).ok());

        DashboardSnapshot {
            state: state.clone(),
            stats: compute_stats(dataset, state, params),
            heatmap: compute_heatmap(dataset, state, params),
            gaps: compute_gaps(dataset, state, params),
            radar,
            detail: compute_detail(dataset, state, params),
        }
    }
}

/// Render a snapshot as JSON output.
pub fn render_json(snapshot: &DashboardSnapshot) -> String {
    serde_json::to_string_pretty(snapshot).unwrap_or_else(|_| "{}".to_string())
}

/// Render a snapshot as text output.
pub fn render_text(snapshot: &DashboardSnapshot) -> String {
    let mut output = String::new();

    let mode = if snapshot.state.simulation_enabled {
        " (what-if simulation on)"
    } else {
        ""
    };
    output.push_str(&format!(
        "Maturity assessment — {}{}\n\n",
        snapshot.state.selected_year, mode
    ));

    // Heatmap grid
    output.push_str(&format!("{:<22}", "CATEGORY"));
    for label in &snapshot.heatmap.dimension_labels {
        output.push_str(&format!(" {:<24}", label));
    }
    output.push('\n');
    for row in &snapshot.heatmap.rows {
        output.push_str(&format!("{:<22}", truncate_or_pad(&row.category, 22)));
        for cell in &row.cells {
            output.push_str(&format!(
                " {:<24}",
                format!("{} — {}", cell.level, cell.level_label)
            ));
        }
        output.push('\n');
    }
    output.push('\n');

    // Gap table
    output.push_str(&format!(
        "{:<6} {:<10} {:<8} {:<6} {}\n",
        "GAP", "SEVERITY", "THREAT", "BEST", "CATEGORY"
    ));
    for entry in &snapshot.gaps.entries {
        output.push_str(&format!(
            "{:<6} {:<10} {:<8} {:<6} {}\n",
            entry.gap,
            entry.severity.as_str(),
            entry.threat_level,
            entry.best_protection,
            entry.category,
        ));
    }
    output.push('\n');

    // Sidebar statistics
    output.push_str(&format!(
        "Averages: threat {:.1}, technical {:.1}, governance {:.1}, stakeholder {:.1}\n",
        snapshot.stats.avg_threat,
        snapshot.stats.avg_technical_controls,
        snapshot.stats.avg_governance,
        snapshot.stats.avg_stakeholder_protection,
    ));
    output.push_str(&format!("Overall gap: {:.1}\n", snapshot.stats.overall_gap));

    if let Some(ref detail) = snapshot.detail {
        output.push('\n');
        output.push_str(&format!("Selected: {}\n", detail.category));
        if let Some(ref description) = detail.description {
            output.push_str(&format!("  {}\n", description));
        }
        for card in &detail.cards {
            output.push_str(&format!(
                "  {:<26} {} — {}\n",
                card.label, card.level, card.level_label
            ));
        }
    }

    output
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.len() > width {
        format!("{}...", &s[..width.saturating_sub(3)])
    } else {
        format!("{:<width$}", s, width = width)
    }
}
