//! JSON loaders for label and query-parameter files.

use crate::error::NewsError;
use crate::models::{Labels, QueryParams};
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Read and decode a JSON file. Read and parse failures both come back as
/// [`NewsError::DataAbsent`] naming the file.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, NewsError> {
    let name = path.display().to_string();
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| NewsError::absent(&name, e))?;
    serde_json::from_str(&text).map_err(|e| NewsError::absent(&name, e))
}

/// Load a flat or region-keyed label file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_labels(path: &Path) -> Result<Labels, NewsError> {
    let labels: Labels = read_json(path).await?;
    let count = match &labels {
        Labels::Flat(list) => list.len(),
        Labels::Hierarchical(map) => map.values().map(Vec::len).sum(),
    };
    info!(count, "Loaded labels");
    Ok(labels)
}

/// Load the list of query parameter sets. An empty list is valid.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load_params(path: &Path) -> Result<Vec<QueryParams>, NewsError> {
    let params: Vec<QueryParams> = read_json(path).await?;
    info!(count = params.len(), "Loaded query parameters");
    Ok(params)
}
