//! Maturity dataset - records, profiles, loading, validation
//!
//! Global invariants enforced:
//! - The dataset is immutable after load
//! - Every category has exactly one record per assessment year
//! - All level fields are within the 0-4 maturity scale
//! - Schema violations fail at load time, never during payload computation

use crate::error::DatasetError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Top of the maturity scale.
pub const LEVEL_MAX: u8 = 4;

/// Default dataset: the assessment matrix for 2025-2027 with cell evidence.
const BUILTIN_JSON: &str = include_str!("../data/maturity.json");

/// Human label for a maturity level (0 = Non-existent .. 4 = Managed/Mature).
pub fn level_label(level: u8) -> &'static str {
    match level {
        0 => "Non-existent",
        1 => "Initial/Ad-hoc",
        2 => "Developing",
        3 => "Defined",
        _ => "Managed/Mature",
    }
}

/// One of the four scoring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Threat,
    TechnicalControls,
    Governance,
    StakeholderProtection,
}

impl Dimension {
    /// All dimensions in display order (threat first, then protections).
    pub const ALL: [Dimension; 4] = [
        Dimension::Threat,
        Dimension::TechnicalControls,
        Dimension::Governance,
        Dimension::StakeholderProtection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Threat => "threat",
            Dimension::TechnicalControls => "technical_controls",
            Dimension::Governance => "governance",
            Dimension::StakeholderProtection => "stakeholder_protection",
        }
    }

    /// Axis/column label shown in charts.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Threat => "Threat Maturity",
            Dimension::TechnicalControls => "Technical Controls",
            Dimension::Governance => "Governance Enforcement",
            Dimension::StakeholderProtection => "Stakeholder Protections",
        }
    }
}

/// One row of the assessment matrix: a threat category scored across the
/// four dimensions for one year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct MaturityRecord {
    pub category: String,
    pub year: u16,
    pub threat_level: u8,
    pub technical_controls_level: u8,
    pub governance_level: u8,
    pub stakeholder_protection_level: u8,
    /// Citation/justification shown on hover and in the detail view.
    pub evidence: String,
    /// Optional per-dimension evidence for richer cell tooltips.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<DimensionNotes>,
}

impl MaturityRecord {
    /// Raw (unadjusted) level for a dimension.
    pub fn level(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::Threat => self.threat_level,
            Dimension::TechnicalControls => self.technical_controls_level,
            Dimension::Governance => self.governance_level,
            Dimension::StakeholderProtection => self.stakeholder_protection_level,
        }
    }
}

/// Per-dimension evidence snippets for one record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DimensionNotes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_controls: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub governance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stakeholder_protection: Option<String>,
}

impl DimensionNotes {
    pub fn for_dimension(&self, dimension: Dimension) -> Option<&str> {
        match dimension {
            Dimension::Threat => self.threat.as_deref(),
            Dimension::TechnicalControls => self.technical_controls.as_deref(),
            Dimension::Governance => self.governance.as_deref(),
            Dimension::StakeholderProtection => self.stakeholder_protection.as_deref(),
        }
    }
}

/// Narrative context for one threat category, shown in the detail view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryProfile {
    pub category: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub incidents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<String>,
}

/// On-disk dataset document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetDocument {
    pub records: Vec<MaturityRecord>,
    #[serde(default)]
    pub profiles: Vec<CategoryProfile>,
}

/// Validated, immutable assessment dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<MaturityRecord>,
    profiles: HashMap<String, CategoryProfile>,
    index: HashMap<(String, u16), usize>,
    years: Vec<u16>,
    categories: Vec<String>,
}

impl Dataset {
    /// The dataset bundled with the library (the 2025-2027 assessment).
    pub fn builtin() -> Dataset {
        Dataset::from_json(BUILTIN_JSON).expect("builtin dataset is valid")
    }

    /// Parse and validate a dataset from a JSON string.
    pub fn from_json(json: &str) -> Result<Dataset, DatasetError> {
        let document: DatasetDocument = serde_json::from_str(json)?;
        Dataset::from_document(document)
    }

    /// Read, parse, and validate a dataset file.
    pub fn from_file(path: &Path) -> Result<Dataset, DatasetError> {
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Dataset::from_json(&json)
    }

    /// Validate a parsed document and build the indexed dataset.
    pub fn from_document(document: DatasetDocument) -> Result<Dataset, DatasetError> {
        let DatasetDocument { records, profiles } = document;

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut index: HashMap<(String, u16), usize> = HashMap::new();
        let mut year_set: BTreeSet<u16> = BTreeSet::new();
        let mut category_set: BTreeSet<String> = BTreeSet::new();

        for (position, record) in records.iter().enumerate() {
            check_levels(record)?;

            let key = (record.category.clone(), record.year);
            if index.insert(key, position).is_some() {
                return Err(DatasetError::DuplicateRecord {
                    category: record.category.clone(),
                    year: record.year,
                });
            }
            year_set.insert(record.year);
            category_set.insert(record.category.clone());
        }

        // The matrix must be rectangular: every category scored every year.
        for category in &category_set {
            for year in &year_set {
                if !index.contains_key(&(category.clone(), *year)) {
                    return Err(DatasetError::MissingRecord {
                        category: category.clone(),
                        year: *year,
                    });
                }
            }
        }

        let mut profile_map = HashMap::new();
        for profile in profiles {
            if !category_set.contains(&profile.category) {
                return Err(DatasetError::UnknownProfile {
                    category: profile.category,
                });
            }
            profile_map.insert(profile.category.clone(), profile);
        }

        Ok(Dataset {
            records,
            profiles: profile_map,
            index,
            years: year_set.into_iter().collect(),
            categories: category_set.into_iter().collect(),
        })
    }

    /// Supported years, ascending. The first entry is the baseline.
    pub fn years(&self) -> &[u16] {
        &self.years
    }

    /// The baseline (earliest) assessment year.
    pub fn baseline_year(&self) -> u16 {
        self.years[0]
    }

    pub fn contains_year(&self, year: u16) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    /// Threat categories, sorted ascending by name.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Look up the record for a category in a given year.
    pub fn record(&self, category: &str, year: u16) -> Option<&MaturityRecord> {
        self.index
            .get(&(category.to_string(), year))
            .map(|position| &self.records[*position])
    }

    /// All records for a year, ordered by category name.
    pub fn records_for_year(&self, year: u16) -> Vec<&MaturityRecord> {
        self.categories
            .iter()
            .filter_map(|category| self.record(category, year))
            .collect()
    }

    pub fn profile(&self, category: &str) -> Option<&CategoryProfile> {
        self.profiles.get(category)
    }
}

fn check_levels(record: &MaturityRecord) -> Result<(), DatasetError> {
    for dimension in Dimension::ALL {
        let level = record.level(dimension);
        if level > LEVEL_MAX {
            return Err(DatasetError::LevelOutOfRange {
                category: record.category.clone(),
                year: record.year,
                dimension: dimension.as_str(),
                level,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, year: u16, levels: [u8; 4]) -> MaturityRecord {
        MaturityRecord {
            category: category.to_string(),
            year,
            threat_level: levels[0],
            technical_controls_level: levels[1],
            governance_level: levels[2],
            stakeholder_protection_level: levels[3],
            evidence: format!("{} assessment for {}", category, year),
            notes: None,
        }
    }

    #[test]
    fn builtin_dataset_loads_and_is_rectangular() {
        let dataset = Dataset::builtin();
        assert_eq!(dataset.years(), &[2025, 2026, 2027]);
        assert_eq!(dataset.categories().len(), 4);
        for year in dataset.years() {
            assert_eq!(dataset.records_for_year(*year).len(), 4);
        }
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let result = Dataset::from_document(DatasetDocument {
            records: vec![],
            profiles: vec![],
        });
        assert!(matches!(result, Err(DatasetError::Empty)));
    }

    #[test]
    fn out_of_range_level_is_rejected() {
        let result = Dataset::from_document(DatasetDocument {
            records: vec![record("Prompt Injection", 2025, [5, 0, 0, 0])],
            profiles: vec![],
        });
        assert!(matches!(
            result,
            Err(DatasetError::LevelOutOfRange { level: 5, .. })
        ));
    }

    #[test]
    fn duplicate_record_is_rejected() {
        let result = Dataset::from_document(DatasetDocument {
            records: vec![
                record("Privacy", 2025, [4, 2, 2, 2]),
                record("Privacy", 2025, [4, 2, 2, 2]),
            ],
            profiles: vec![],
        });
        assert!(matches!(result, Err(DatasetError::DuplicateRecord { .. })));
    }

    #[test]
    fn missing_year_coverage_is_rejected() {
        let result = Dataset::from_document(DatasetDocument {
            records: vec![
                record("Privacy", 2025, [4, 2, 2, 2]),
                record("Privacy", 2026, [4, 2, 2, 2]),
                record("Prompt Injection", 2025, [4, 1, 0, 0]),
            ],
            profiles: vec![],
        });
        assert!(matches!(
            result,
            Err(DatasetError::MissingRecord { year: 2026, .. })
        ));
    }

    #[test]
    fn profile_for_unknown_category_is_rejected() {
        let result = Dataset::from_document(DatasetDocument {
            records: vec![record("Privacy", 2025, [4, 2, 2, 2])],
            profiles: vec![CategoryProfile {
                category: "Deepfakes".to_string(),
                description: "not assessed".to_string(),
                incidents: vec![],
                quote: None,
                references: vec![],
            }],
        });
        assert!(matches!(result, Err(DatasetError::UnknownProfile { .. })));
    }

    #[test]
    fn records_for_year_is_sorted_by_category() {
        let dataset = Dataset::from_document(DatasetDocument {
            records: vec![
                record("Privacy", 2025, [4, 2, 2, 2]),
                record("Autonomy Harms", 2025, [4, 2, 2, 0]),
            ],
            profiles: vec![],
        })
        .unwrap();
        let names: Vec<&str> = dataset
            .records_for_year(2025)
            .iter()
            .map(|r| r.category.as_str())
            .collect();
        assert_eq!(names, vec!["Autonomy Harms", "Privacy"]);
    }
}
