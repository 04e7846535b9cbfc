//! Configuration file support
//!
//! Loads explorer configuration from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.gapmaprc.json` in the working directory
//! 3. `gapmap.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::dataset::LEVEL_MAX;
use crate::simulation::{SimulationParams, DEFAULT_POLICY_DELTA};
use crate::theme::Theme;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File names probed when no explicit config path is given.
const CONFIG_FILE_NAMES: &[&str] = &[".gapmaprc.json", "gapmap.config.json"];

/// Explorer configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GapmapConfig {
    /// Path to a dataset file replacing the builtin assessment
    #[serde(default)]
    pub dataset: Option<PathBuf>,

    /// Year selected at session start (default: dataset baseline)
    #[serde(default)]
    pub default_year: Option<u16>,

    /// Initial theme (default: dark)
    #[serde(default)]
    pub theme: Option<Theme>,

    /// Policy-improvement delta for the what-if simulation (default: 2)
    #[serde(default)]
    pub simulation_delta: Option<u8>,
}

impl GapmapConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(delta) = self.simulation_delta {
            if delta > LEVEL_MAX {
                anyhow::bail!(
                    "simulation_delta must be within 0-{} (got {})",
                    LEVEL_MAX,
                    delta
                );
            }
        }
        if let Some(ref dataset) = self.dataset {
            if dataset.as_os_str().is_empty() {
                anyhow::bail!("dataset path must not be empty");
            }
        }
        Ok(())
    }
}

/// Resolved configuration with defaults filled in
#[derive(Debug)]
pub struct ResolvedConfig {
    pub dataset_path: Option<PathBuf>,
    pub default_year: Option<u16>,
    pub theme: Theme,
    pub params: SimulationParams,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        ResolvedConfig {
            dataset_path: None,
            default_year: None,
            theme: Theme::default(),
            params: SimulationParams {
                delta: DEFAULT_POLICY_DELTA,
            },
            config_path: None,
        }
    }
}

/// Probe the working directory for a config file
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|candidate| candidate.is_file())
}

/// Read, parse, and validate a config file
pub fn load_config_file(path: &Path) -> Result<GapmapConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: GapmapConfig = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    Ok(config)
}

/// Load the effective configuration: explicit path, discovered file, or
/// defaults when no file exists.
pub fn resolve_config(explicit: Option<&Path>, root: &Path) -> Result<ResolvedConfig> {
    let located = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config_file(root),
    };

    let Some(path) = located else {
        return Ok(ResolvedConfig::default());
    };

    let config = load_config_file(&path)?;
    Ok(ResolvedConfig {
        dataset_path: config.dataset,
        default_year: config.default_year,
        theme: config.theme.unwrap_or_default(),
        params: SimulationParams {
            delta: config.simulation_delta.unwrap_or(DEFAULT_POLICY_DELTA),
        },
        config_path: Some(path),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_when_no_config_exists() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_config(None, dir.path()).unwrap();
        assert!(resolved.config_path.is_none());
        assert_eq!(resolved.theme, Theme::Dark);
        assert_eq!(resolved.params.delta, DEFAULT_POLICY_DELTA);
    }

    #[test]
    fn discovered_rc_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".gapmaprc.json");
        fs::write(&path, r#"{"theme": "light", "simulation_delta": 1}"#).unwrap();

        let resolved = resolve_config(None, dir.path()).unwrap();
        assert_eq!(resolved.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(resolved.theme, Theme::Light);
        assert_eq!(resolved.params.delta, 1);
    }

    #[test]
    fn out_of_scale_delta_is_rejected() {
        let config = GapmapConfig {
            simulation_delta: Some(9),
            ..GapmapConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gapmap.config.json");
        fs::write(&path, r#"{"governance_slider": 3}"#).unwrap();
        assert!(load_config_file(&path).is_err());
    }

    #[test]
    fn explicit_path_wins_over_discovery() {
        let dir = tempfile::tempdir().unwrap();
        let discovered = dir.path().join(".gapmaprc.json");
        fs::write(&discovered, r#"{"simulation_delta": 1}"#).unwrap();
        let explicit = dir.path().join("other.json");
        fs::write(&explicit, r#"{"simulation_delta": 3}"#).unwrap();

        let resolved = resolve_config(Some(&explicit), dir.path()).unwrap();
        assert_eq!(resolved.params.delta, 3);
    }
}
