//! Error types
//!
//! Two kinds only: dataset problems are fatal at load time, selection
//! problems are recoverable and leave the prior view state untouched.

use thiserror::Error;

/// Fatal dataset failure. The process should not start on any of these.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("dataset contains no records")]
    Empty,

    #[error("{category} ({year}): {dimension} level {level} is outside the 0-4 maturity scale")]
    LevelOutOfRange {
        category: String,
        year: u16,
        dimension: &'static str,
        level: u8,
    },

    #[error("duplicate record for {category} in {year}")]
    DuplicateRecord { category: String, year: u16 },

    #[error("{category} has no record for {year} (every category needs one record per assessment year)")]
    MissingRecord { category: String, year: u16 },

    #[error("profile references unknown category {category:?}")]
    UnknownProfile { category: String },
}

/// Recoverable control-event failure. The event is rejected and the
/// caller's view state is unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("year {0} is not covered by the assessment")]
    UnknownYear(u16),

    #[error("category {0:?} is not part of the assessment")]
    UnknownCategory(String),
}
