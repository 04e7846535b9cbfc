//! Detail payload - the click-to-detail view for the selected category

use crate::controller::ViewState;
use crate::dataset::{level_label, Dataset, Dimension};
use crate::simulation::{adjust, SimulationParams};
use crate::theme::level_color;
use serde::Serialize;

/// One per-dimension card in the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DimensionCard {
    pub dimension: Dimension,
    pub label: &'static str,
    pub level: u8,
    pub level_label: &'static str,
    pub color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Everything the detail modal shows for the selected category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct DetailPayload {
    pub category: String,
    pub year: u16,
    pub simulated: bool,
    pub evidence: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub incidents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
    pub cards: Vec<DimensionCard>,
}

/// Compute the detail payload for the current selection, if any.
///
/// Returns `None` when nothing is selected. A stale selection (possible
/// only if the state was built outside the controller) also yields `None`
/// rather than a partial payload.
pub fn compute_detail(
    dataset: &Dataset,
    state: &ViewState,
    params: &SimulationParams,
) -> Option<DetailPayload> {
    let category = state.selected_category.as_deref()?;
    let record = dataset.record(category, state.selected_year)?;
    let profile = dataset.profile(category);

    let adjusted = adjust(record, state.simulation_enabled, params);
    let cards = Dimension::ALL
        .iter()
        .map(|dimension| {
            let level = adjusted.level(*dimension);
            DimensionCard {
                dimension: *dimension,
                label: dimension.label(),
                level,
                level_label: level_label(level),
                color: level_color(level),
                note: record
                    .notes
                    .as_ref()
                    .and_then(|notes| notes.for_dimension(*dimension))
                    .map(str::to_string),
            }
        })
        .collect();

    Some(DetailPayload {
        category: record.category.clone(),
        year: state.selected_year,
        simulated: state.simulation_enabled,
        evidence: record.evidence.clone(),
        description: profile.map(|p| p.description.clone()),
        incidents: profile.map(|p| p.incidents.clone()).unwrap_or_default(),
        quote: profile.and_then(|p| p.quote.clone()),
        references: profile.map(|p| p.references.clone()).unwrap_or_default(),
        cards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn no_selection_yields_no_detail() {
        let dataset = Dataset::builtin();
        let state = ViewState::new(dataset.baseline_year());
        assert!(compute_detail(&dataset, &state, &SimulationParams::default()).is_none());
    }

    #[test]
    fn selection_pulls_profile_and_cards() {
        let dataset = Dataset::builtin();
        let mut state = ViewState::new(dataset.baseline_year());
        state.selected_category = Some("Prompt Injection".to_string());

        let detail = compute_detail(&dataset, &state, &SimulationParams::default()).unwrap();
        assert_eq!(detail.category, "Prompt Injection");
        assert_eq!(detail.cards.len(), 4);
        assert!(detail.description.is_some());
        assert_eq!(detail.incidents.len(), 3);
        assert!(detail.cards[0].note.is_some());
    }
}
