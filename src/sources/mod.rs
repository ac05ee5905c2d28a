//! Collaborators that feed the counting core.
//!
//! - [`newsapi`]: fetches records for one query from NewsAPI
//! - [`files`]: loads label and query-parameter files
//!
//! Every collaborator reports "could not obtain data" as
//! [`NewsError::DataAbsent`] so callers can tell it apart from a valid,
//! empty result.

use crate::error::NewsError;
use crate::models::{QueryParams, Record};

pub mod files;
pub mod newsapi;

/// Anything that turns a query into a list of records.
///
/// The pipeline is generic over this trait so tests can substitute canned
/// or failing sources for the HTTP client.
pub trait RecordSource {
    /// Short name used in logs and `DataAbsent` errors.
    fn name(&self) -> &str;

    /// Fetch the records matching `params`. An empty list is a valid answer.
    async fn fetch(&self, params: &QueryParams) -> Result<Vec<Record>, NewsError>;
}
