//! View-state controller - control events in, derived payloads out
//!
//! Global invariants enforced:
//! - Control events are validated before any state change; a rejected
//!   event leaves the prior state fully intact
//! - Payloads are strictly derived (never stored, always computed)
//! - Identical state yields identical payloads

use crate::dataset::Dataset;
use crate::detail::{compute_detail, DetailPayload};
use crate::error::SelectionError;
use crate::gap::{compute_gaps, GapPayload};
use crate::heatmap::{compute_heatmap, HeatmapPayload};
use crate::radar::{compute_radar, RadarPayload};
use crate::report::DashboardSnapshot;
use crate::simulation::SimulationParams;
use crate::stats::{compute_stats, QuickStats};
use crate::theme::Theme;
use serde::Serialize;

/// Current UI selections for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ViewState {
    pub selected_year: u16,
    pub theme: Theme,
    pub simulation_enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_category: Option<String>,
}

impl ViewState {
    /// Session defaults: baseline year, dark theme, simulation off,
    /// nothing selected.
    pub fn new(baseline_year: u16) -> ViewState {
        ViewState {
            selected_year: baseline_year,
            theme: Theme::default(),
            simulation_enabled: false,
            selected_category: None,
        }
    }
}

/// A user-control event routed back from the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    SetYear(u16),
    ToggleTheme,
    SetSimulation(bool),
    SelectCategory(String),
    ClearSelection,
}

/// What the rendering layer must refresh after an accepted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Year or simulation changed: recompute every chart payload.
    Data,
    /// Theme changed: re-render color scales only, no data recompute.
    Colors,
    /// Selection changed: update the detail view only.
    Detail,
}

/// Apply one control event to a view state.
///
/// Pure: the input state is untouched; on success the updated state and
/// the required refresh scope are returned. Validation failures reject
/// the event without producing a new state.
pub fn apply_event(
    dataset: &Dataset,
    state: &ViewState,
    event: ControlEvent,
) -> Result<(ViewState, Refresh), SelectionError> {
    let mut next = state.clone();
    let refresh = match event {
        ControlEvent::SetYear(year) => {
            if !dataset.contains_year(year) {
                return Err(SelectionError::UnknownYear(year));
            }
            next.selected_year = year;
            Refresh::Data
        }
        ControlEvent::ToggleTheme => {
            next.theme = next.theme.toggle();
            Refresh::Colors
        }
        ControlEvent::SetSimulation(enabled) => {
            next.simulation_enabled = enabled;
            Refresh::Data
        }
        ControlEvent::SelectCategory(category) => {
            if dataset.record(&category, state.selected_year).is_none() {
                return Err(SelectionError::UnknownCategory(category));
            }
            next.selected_category = Some(category);
            Refresh::Detail
        }
        ControlEvent::ClearSelection => {
            next.selected_category = None;
            Refresh::Detail
        }
    };
    Ok((next, refresh))
}

/// Owns the immutable dataset and the session's view state, and exposes
/// the control operations plus payload accessors.
pub struct Controller {
    dataset: Dataset,
    state: ViewState,
    params: SimulationParams,
}

impl Controller {
    /// Controller with default simulation parameters.
    pub fn new(dataset: Dataset) -> Controller {
        Controller::with_params(dataset, SimulationParams::default())
    }

    pub fn with_params(dataset: Dataset, params: SimulationParams) -> Controller {
        let state = ViewState::new(dataset.baseline_year());
        Controller {
            dataset,
            state,
            params,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Route one control event; commits the new state only on success.
    pub fn handle(&mut self, event: ControlEvent) -> Result<Refresh, SelectionError> {
        let (next, refresh) = apply_event(&self.dataset, &self.state, event)?;
        self.state = next;
        Ok(refresh)
    }

    pub fn set_year(&mut self, year: u16) -> Result<Refresh, SelectionError> {
        self.handle(ControlEvent::SetYear(year))
    }

    pub fn toggle_theme(&mut self) -> Refresh {
        self.state.theme = self.state.theme.toggle();
        Refresh::Colors
    }

    pub fn set_simulation(&mut self, enabled: bool) -> Refresh {
        self.state.simulation_enabled = enabled;
        Refresh::Data
    }

    pub fn select_category(&mut self, category: &str) -> Result<Refresh, SelectionError> {
        self.handle(ControlEvent::SelectCategory(category.to_string()))
    }

    pub fn clear_selection(&mut self) -> Refresh {
        self.state.selected_category = None;
        Refresh::Detail
    }

    pub fn heatmap(&self) -> HeatmapPayload {
        compute_heatmap(&self.dataset, &self.state, &self.params)
    }

    pub fn gaps(&self) -> GapPayload {
        compute_gaps(&self.dataset, &self.state, &self.params)
    }

    pub fn radar(&self, category: &str) -> Result<RadarPayload, SelectionError> {
        compute_radar(&self.dataset, &self.state, &self.params, category)
    }

    pub fn stats(&self) -> QuickStats {
        compute_stats(&self.dataset, &self.state, &self.params)
    }

    pub fn detail(&self) -> Option<DetailPayload> {
        compute_detail(&self.dataset, &self.state, &self.params)
    }

    /// Everything the dashboard needs for the current state in one bundle.
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot::compute(&self.dataset, &self.state, &self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn defaults_start_at_the_baseline_year() {
        let controller = Controller::new(Dataset::builtin());
        assert_eq!(controller.state().selected_year, 2025);
        assert_eq!(controller.state().theme, Theme::Dark);
        assert!(!controller.state().simulation_enabled);
        assert!(controller.state().selected_category.is_none());
    }

    #[test]
    fn unknown_year_is_rejected_and_state_is_kept() {
        let mut controller = Controller::new(Dataset::builtin());
        let before = controller.state().clone();
        let result = controller.set_year(2099);
        assert_eq!(result, Err(SelectionError::UnknownYear(2099)));
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn unknown_category_is_rejected_and_state_is_kept() {
        let mut controller = Controller::new(Dataset::builtin());
        let before = controller.state().clone();
        let result = controller.select_category("nonexistent");
        assert_eq!(
            result,
            Err(SelectionError::UnknownCategory("nonexistent".to_string()))
        );
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn accepted_events_report_their_refresh_scope() {
        let mut controller = Controller::new(Dataset::builtin());
        assert_eq!(controller.set_year(2026), Ok(Refresh::Data));
        assert_eq!(controller.set_simulation(true), Refresh::Data);
        assert_eq!(controller.toggle_theme(), Refresh::Colors);
        assert_eq!(
            controller.select_category("Privacy"),
            Ok(Refresh::Detail)
        );
        assert_eq!(controller.clear_selection(), Refresh::Detail);
        assert!(controller.state().selected_category.is_none());
    }

    #[test]
    fn apply_event_matches_the_controller_methods() {
        let dataset = Dataset::builtin();
        let state = ViewState::new(dataset.baseline_year());

        let (themed, refresh) =
            apply_event(&dataset, &state, ControlEvent::ToggleTheme).unwrap();
        assert_eq!(refresh, Refresh::Colors);
        assert_eq!(themed.theme, Theme::Light);
        // Input state untouched
        assert_eq!(state.theme, Theme::Dark);

        let (simulated, refresh) =
            apply_event(&dataset, &state, ControlEvent::SetSimulation(true)).unwrap();
        assert_eq!(refresh, Refresh::Data);
        assert!(simulated.simulation_enabled);
    }

    #[test]
    fn selection_is_validated_against_the_selected_year() {
        let mut controller = Controller::new(Dataset::builtin());
        assert!(controller.select_category("Prompt Injection").is_ok());
        assert_eq!(
            controller.state().selected_category.as_deref(),
            Some("Prompt Injection")
        );
    }
}
