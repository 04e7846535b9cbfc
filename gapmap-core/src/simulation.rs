//! What-if simulation - read-time governance improvement
//!
//! Global invariants enforced:
//! - The underlying dataset is never mutated
//! - Adjusted levels never decrease and never exceed the scale top
//! - Threat and technical-controls levels are unaffected

use crate::dataset::{Dimension, MaturityRecord, LEVEL_MAX};
use serde::{Deserialize, Serialize};

/// Policy-improvement delta applied when the simulation is enabled.
pub const DEFAULT_POLICY_DELTA: u8 = 2;

/// Tunable simulation parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Levels added to governance and stakeholder protection (clamped to 4).
    pub delta: u8,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            delta: DEFAULT_POLICY_DELTA,
        }
    }
}

/// A record's four levels after the active simulation adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AdjustedLevels {
    pub threat: u8,
    pub technical_controls: u8,
    pub governance: u8,
    pub stakeholder_protection: u8,
}

impl AdjustedLevels {
    pub fn level(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Threat => self.threat,
            Dimension::TechnicalControls => self.technical_controls,
            Dimension::Governance => self.governance,
            Dimension::StakeholderProtection => self.stakeholder_protection,
        }
    }

    /// Levels in display order (threat first).
    pub fn as_array(&self) -> [u8; 4] {
        [
            self.threat,
            self.technical_controls,
            self.governance,
            self.stakeholder_protection,
        ]
    }

    /// Best-performing protective dimension.
    pub fn best_protection(&self) -> u8 {
        self.technical_controls
            .max(self.governance)
            .max(self.stakeholder_protection)
    }
}

/// Apply the simulation transform to one record.
pub fn adjust(record: &MaturityRecord, enabled: bool, params: &SimulationParams) -> AdjustedLevels {
    let delta = if enabled { params.delta } else { 0 };
    AdjustedLevels {
        threat: record.threat_level,
        technical_controls: record.technical_controls_level,
        governance: shift(record.governance_level, delta),
        stakeholder_protection: shift(record.stakeholder_protection_level, delta),
    }
}

fn shift(level: u8, delta: u8) -> u8 {
    level.saturating_add(delta).min(LEVEL_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(levels: [u8; 4]) -> MaturityRecord {
        MaturityRecord {
            category: "Prompt Injection".to_string(),
            year: 2025,
            threat_level: levels[0],
            technical_controls_level: levels[1],
            governance_level: levels[2],
            stakeholder_protection_level: levels[3],
            evidence: String::new(),
            notes: None,
        }
    }

    #[test]
    fn disabled_simulation_is_identity() {
        let adjusted = adjust(&record([4, 1, 0, 0]), false, &SimulationParams::default());
        assert_eq!(adjusted.as_array(), [4, 1, 0, 0]);
    }

    #[test]
    fn enabled_simulation_shifts_governance_dimensions_only() {
        let adjusted = adjust(&record([4, 1, 0, 0]), true, &SimulationParams::default());
        assert_eq!(adjusted.threat, 4);
        assert_eq!(adjusted.technical_controls, 1);
        assert_eq!(adjusted.governance, 2);
        assert_eq!(adjusted.stakeholder_protection, 2);
    }

    #[test]
    fn adjustment_never_decreases_and_clamps_at_four() {
        for governance in 0..=LEVEL_MAX {
            let adjusted = adjust(
                &record([4, 2, governance, governance]),
                true,
                &SimulationParams::default(),
            );
            assert!(adjusted.governance >= governance);
            assert!(adjusted.governance <= LEVEL_MAX);
            assert!(adjusted.stakeholder_protection >= governance);
            assert!(adjusted.stakeholder_protection <= LEVEL_MAX);
        }
    }

    #[test]
    fn best_protection_takes_the_maximum() {
        let adjusted = adjust(&record([4, 1, 3, 2]), false, &SimulationParams::default());
        assert_eq!(adjusted.best_protection(), 3);
    }
}
