//! End-to-end controller flows over the builtin and fixture datasets

use gapmap_core::{
    render_json, ControlEvent, Controller, Dataset, DashboardSnapshot, Refresh, SelectionError,
    SimulationParams, ViewState,
};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_dataset() -> Dataset {
    Dataset::from_file(&fixture_path("assessment.json")).unwrap()
}

#[test]
fn heatmap_has_exactly_one_entry_per_category_in_every_year() {
    let dataset = Dataset::builtin();
    let mut controller = Controller::new(dataset);

    for year in controller.dataset().years().to_vec() {
        controller.set_year(year).unwrap();
        let payload = controller.heatmap();

        for category in controller.dataset().categories() {
            let matches: Vec<_> = payload
                .rows
                .iter()
                .filter(|row| &row.category == category)
                .collect();
            assert_eq!(matches.len(), 1, "{} in {}", category, year);

            let record = controller.dataset().record(category, year).unwrap();
            let levels: Vec<u8> = matches[0].cells.iter().map(|c| c.level).collect();
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
}

#[test]
fn gap_payload_is_sorted_and_idempotent() {
    let controller = Controller::new(Dataset::builtin());

    let first = controller.gaps();
    let second = controller.gaps();
    assert_eq!(first, second);

    for pair in first.entries.windows(2) {
        assert!(
            pair[0].gap > pair[1].gap
                || (pair[0].gap == pair[1].gap && pair[0].category < pair[1].category)
        );
    }
}

#[test]
fn simulation_never_decreases_levels_or_exceeds_the_scale() {
    let mut controller = Controller::new(Dataset::builtin());
    let before = controller.heatmap();
    controller.set_simulation(true);
    let after = controller.heatmap();

    for (row_before, row_after) in before.rows.iter().zip(&after.rows) {
        assert_eq!(row_before.category, row_after.category);
        for (cell_before, cell_after) in row_before.cells.iter().zip(&row_after.cells) {
            assert!(cell_after.level >= cell_before.level);
            assert!(cell_after.level <= 4);
        }
    }
}

#[test]
fn unsupported_year_is_rejected_with_state_retained() {
    let mut controller = Controller::new(Dataset::builtin());
    let before = controller.state().clone();

    assert_eq!(
        controller.set_year(2099),
        Err(SelectionError::UnknownYear(2099))
    );
    assert_eq!(controller.state(), &before);
    assert_eq!(controller.state().selected_year, 2025);
}

#[test]
fn unknown_category_is_rejected_with_state_retained() {
    let mut controller = Controller::new(Dataset::builtin());
    controller.select_category("Privacy").unwrap();

    assert_eq!(
        controller.select_category("nonexistent"),
        Err(SelectionError::UnknownCategory("nonexistent".to_string()))
    );
    assert_eq!(controller.state().selected_category.as_deref(), Some("Privacy"));
}

#[test]
fn theme_toggle_round_trip_keeps_chart_data_identical() {
    let mut controller = Controller::new(Dataset::builtin());
    let before = render_json(&controller.snapshot());

    assert_eq!(controller.toggle_theme(), Refresh::Colors);
    assert_eq!(controller.toggle_theme(), Refresh::Colors);

    let after = render_json(&controller.snapshot());
    assert_eq!(before, after);
}

#[test]
fn worked_example_gap_narrows_from_three_to_two_under_simulation() {
    // Prompt Injection 2025: threat 4, tech 1, governance 0, stakeholder 0.
    let mut controller = Controller::new(fixture_dataset());

    let gaps = controller.gaps();
    let entry = gaps
        .entries
        .iter()
        .find(|e| e.category == "Prompt Injection")
        .unwrap();
    assert_eq!(entry.gap, 3);

    controller.set_simulation(true);
    let gaps = controller.gaps();
    let entry = gaps
        .entries
        .iter()
        .find(|e| e.category == "Prompt Injection")
        .unwrap();
    // governance' = 2, stakeholder' = 2, best protection = 2
    assert_eq!(entry.gap, 2);
    assert_eq!(entry.best_protection, 2);
}

#[test]
fn pure_event_application_leaves_the_input_state_untouched() {
    let dataset = fixture_dataset();
    let state = ViewState::new(dataset.baseline_year());

    let (next, refresh) = gapmap_core::apply_event(
        &dataset,
        &state,
        ControlEvent::SelectCategory("Privacy".to_string()),
    )
    .unwrap();

    assert_eq!(refresh, Refresh::Detail);
    assert_eq!(next.selected_category.as_deref(), Some("Privacy"));
    assert!(state.selected_category.is_none());
}

#[test]
fn snapshot_detail_follows_the_selection_lifecycle() {
    let mut controller = Controller::new(fixture_dataset());
    assert!(controller.snapshot().detail.is_none());

    controller.select_category("Prompt Injection").unwrap();
    let snapshot = controller.snapshot();
    let detail = snapshot.detail.unwrap();
    assert_eq!(detail.category, "Prompt Injection");
    assert!(detail.description.is_some());

    controller.clear_selection();
    assert!(controller.snapshot().detail.is_none());
}

#[test]
fn snapshot_radar_uses_the_selected_category() {
    let dataset = fixture_dataset();
    let mut state = ViewState::new(dataset.baseline_year());
    state.selected_category = Some("Privacy".to_string());

    let snapshot = DashboardSnapshot::compute(&dataset, &state, &SimulationParams::default());
    assert_eq!(
        snapshot.radar.map(|r| r.category),
        Some("Privacy".to_string())
    );
}
