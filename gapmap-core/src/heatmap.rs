//! Heatmap payload - the assessment matrix for one year
//!
//! One row per category, one cell per dimension, colored on the shared
//! five-stop maturity scale. Tooltips carry the record's evidence (or the
//! per-dimension note when one exists).

use crate::controller::ViewState;
use crate::dataset::{level_label, Dataset, Dimension, MaturityRecord};
use crate::simulation::{adjust, SimulationParams};
use crate::theme::{level_color, ThemePalette};
use serde::Serialize;

/// One cell of the heatmap grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HeatmapCell {
    pub dimension: Dimension,
    pub level: u8,
    pub level_label: &'static str,
    pub color: &'static str,
    pub tooltip: String,
}

/// One category row: a 1x4 grid of cells plus the row-level evidence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HeatmapRow {
    pub category: String,
    pub cells: Vec<HeatmapCell>,
    pub evidence: String,
}

/// Heatmap for the selected year under the active simulation flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct HeatmapPayload {
    pub year: u16,
    pub simulated: bool,
    pub dimension_labels: Vec<&'static str>,
    pub palette: ThemePalette,
    pub rows: Vec<HeatmapRow>,
}

/// Compute the heatmap payload for the current view state.
pub fn compute_heatmap(
    dataset: &Dataset,
    state: &ViewState,
    params: &SimulationParams,
) -> HeatmapPayload {
    let rows = dataset
        .records_for_year(state.selected_year)
        .into_iter()
        .map(|record| heatmap_row(record, state.simulation_enabled, params))
        .collect();

    HeatmapPayload {
        year: state.selected_year,
        simulated: state.simulation_enabled,
        dimension_labels: Dimension::ALL.iter().map(|d| d.label()).collect(),
        palette: state.theme.palette(),
        rows,
    }
}

fn heatmap_row(record: &MaturityRecord, simulated: bool, params: &SimulationParams) -> HeatmapRow {
    let adjusted = adjust(record, simulated, params);
    let cells = Dimension::ALL
        .iter()
        .map(|dimension| {
            let level = adjusted.level(*dimension);
            HeatmapCell {
                dimension: *dimension,
                level,
                level_label: level_label(level),
                color: level_color(level),
                tooltip: cell_tooltip(record, *dimension, level),
            }
        })
        .collect();

    HeatmapRow {
        category: record.category.clone(),
        cells,
        evidence: record.evidence.clone(),
    }
}

fn cell_tooltip(record: &MaturityRecord, dimension: Dimension, level: u8) -> String {
    let note = record
        .notes
        .as_ref()
        .and_then(|notes| notes.for_dimension(dimension))
        .unwrap_or(&record.evidence);
    format!(
        "{} — {}\nLevel {}: {}\n{}",
        record.category,
        dimension.label(),
        level,
        level_label(level),
        note,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn one_row_per_category_with_source_levels() {
        let dataset = Dataset::builtin();
        let state = ViewState::new(dataset.baseline_year());
        let payload = compute_heatmap(&dataset, &state, &SimulationParams::default());

        assert_eq!(payload.rows.len(), dataset.categories().len());
        for row in &payload.rows {
            let record = dataset.record(&row.category, state.selected_year).unwrap();
            let levels: Vec<u8> = row.cells.iter().map(|c| c.level).collect();
            assert_eq!(
                levels,
                vec![
                    record.threat_level,
                    record.technical_controls_level,
                    record.governance_level,
                    record.stakeholder_protection_level,
                ]
            );
        }
    }

    #[test]
    fn dimension_note_wins_over_row_evidence_in_tooltips() {
        let dataset = Dataset::builtin();
        let state = ViewState::new(dataset.baseline_year());
        let payload = compute_heatmap(&dataset, &state, &SimulationParams::default());

        let row = payload
            .rows
            .iter()
            .find(|r| r.category == "Prompt Injection")
            .unwrap();
        assert!(row.cells[0].tooltip.contains("Indirect prompt injection"));
    }

    #[test]
    fn simulation_flag_shows_adjusted_levels() {
        let dataset = Dataset::builtin();
        let mut state = ViewState::new(dataset.baseline_year());
        state.simulation_enabled = true;
        let payload = compute_heatmap(&dataset, &state, &SimulationParams::default());

        let row = payload
            .rows
            .iter()
            .find(|r| r.category == "Political Integrity")
            .unwrap();
        // Governance 0 -> 2, stakeholder 0 -> 2 under the default delta.
        assert_eq!(row.cells[2].level, 2);
        assert_eq!(row.cells[3].level, 2);
        assert_eq!(row.cells[0].level, 4);
    }
}
