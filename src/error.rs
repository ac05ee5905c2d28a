//! Error taxonomy shared by the loaders, the record source and the outputs.
//!
//! Counting itself never fails: missing or malformed record fields degrade to
//! empty text. Errors only come from the edges of the pipeline.

use std::io;

use thiserror::Error;

/// Errors raised outside the counting core.
#[derive(Debug, Error)]
pub enum NewsError {
    /// An upstream collaborator (API, label file, params file) produced no
    /// usable data. Distinct from a valid result with zero mentions.
    #[error("no usable data from {source_name}: {reason}")]
    DataAbsent { source_name: String, reason: String },
    /// A label (or region name) is empty or otherwise unusable.
    #[error("invalid label: {0}")]
    Validation(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl NewsError {
    pub fn absent(source_name: impl Into<String>, reason: impl ToString) -> Self {
        NewsError::DataAbsent {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// `true` when the error means "could not obtain data" rather than a
    /// local failure.
    pub fn is_data_absent(&self) -> bool {
        matches!(self, NewsError::DataAbsent { .. })
    }
}
