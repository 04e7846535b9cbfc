//! Gapmap core library - maturity-assessment exploration for generative AI security threats

#![deny(warnings)]

// Global invariants enforced in this crate:
// - The dataset is loaded once, validated, and never mutated
// - Payloads are strictly derived (never stored, always computed)
// - No randomness, clocks, threads, or async
// - Identical view state yields byte-for-byte identical output
// - Rejected control events leave the prior view state intact

pub mod config;
pub mod controller;
pub mod dataset;
pub mod detail;
pub mod error;
pub mod gap;
pub mod heatmap;
pub mod html;
pub mod radar;
pub mod report;
pub mod simulation;
pub mod stats;
pub mod theme;

pub use controller::{apply_event, ControlEvent, Controller, Refresh, ViewState};
pub use dataset::{Dataset, Dimension, MaturityRecord};
pub use error::{DatasetError, SelectionError};
pub use html::render_html;
pub use report::{render_json, render_text, DashboardSnapshot};
pub use simulation::{SimulationParams, DEFAULT_POLICY_DELTA};
pub use theme::Theme;

use std::path::Path;

/// Load a dataset from a file, or fall back to the builtin assessment.
pub fn load_dataset(path: Option<&Path>) -> Result<Dataset, DatasetError> {
    match path {
        Some(path) => Dataset::from_file(path),
        None => Ok(Dataset::builtin()),
    }
}
