//! Radar payload - one category's profile across the four dimensions
//!
//! Emits a closed polygon: four vertices plus the first repeated, each
//! normalized onto the shared radial scale.

use crate::controller::ViewState;
use crate::dataset::{level_label, Dataset, Dimension, LEVEL_MAX};
use crate::error::SelectionError;
use crate::simulation::{adjust, SimulationParams};
use crate::theme::ThemePalette;
use serde::Serialize;

/// Dotted reference ring drawn at the "Developing" level.
pub const REFERENCE_RING_LEVEL: u8 = 2;

/// One vertex of the radar polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RadarPoint {
    pub axis: &'static str,
    pub level: u8,
    pub level_label: &'static str,
    /// Level normalized to the shared radial scale (0.0 at center, 1.0 at rim).
    pub fraction: f64,
}

/// Radar chart for one category in the selected year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RadarPayload {
    pub category: String,
    pub year: u16,
    pub simulated: bool,
    pub palette: ThemePalette,
    /// Closed polygon: five points, the first vertex repeated last.
    pub points: Vec<RadarPoint>,
    pub reference_level: u8,
}

/// Compute the radar payload for one category.
pub fn compute_radar(
    dataset: &Dataset,
    state: &ViewState,
    params: &SimulationParams,
    category: &str,
) -> Result<RadarPayload, SelectionError> {
    let record = dataset
        .record(category, state.selected_year)
        .ok_or_else(|| SelectionError::UnknownCategory(category.to_string()))?;

    let adjusted = adjust(record, state.simulation_enabled, params);
    let mut points: Vec<RadarPoint> = Dimension::ALL
        .iter()
        .map(|dimension| {
            let level = adjusted.level(*dimension);
            RadarPoint {
                axis: dimension.label(),
                level,
                level_label: level_label(level),
                fraction: f64::from(level) / f64::from(LEVEL_MAX),
            }
        })
        .collect();

    // Close the polygon by repeating the first vertex.
    points.push(points[0].clone());

    Ok(RadarPayload {
        category: record.category.clone(),
        year: state.selected_year,
        simulated: state.simulation_enabled,
        palette: state.theme.palette(),
        points,
        reference_level: REFERENCE_RING_LEVEL,
    })
}
