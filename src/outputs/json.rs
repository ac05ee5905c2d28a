//! JSON report output.
//!
//! One file per query, grouped by date:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     ├── 101502_q1.json
//!     └── 101507_q2.json
//! ```

use crate::analysis::MentionKey;
use crate::error::NewsError;
use crate::models::QueryParams;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// One ranked entry. `region` is set only for hierarchical labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub count: u64,
}

impl From<&(MentionKey, u64)> for RankedEntry {
    fn from((key, count): &(MentionKey, u64)) -> Self {
        match key {
            MentionKey::Label(label) => RankedEntry {
                label: label.clone(),
                region: None,
                count: *count,
            },
            MentionKey::Place { region, place } => RankedEntry {
                label: place.clone(),
                region: Some(region.clone()),
                count: *count,
            },
        }
    }
}

/// Everything known about one query's run.
#[derive(Debug, Clone, Serialize)]
pub struct QueryReport {
    pub local_date: String,
    pub local_time: String,
    pub query_index: usize,
    pub params: QueryParams,
    pub mode: String,
    pub records: usize,
    pub ranked: Vec<RankedEntry>,
}

impl QueryReport {
    /// Build a report stamped with `now`. API keys are masked.
    pub fn new(
        now: DateTime<Local>,
        query_index: usize,
        params: &QueryParams,
        mode: String,
        records: usize,
        ranked: &[(MentionKey, u64)],
    ) -> Self {
        QueryReport {
            local_date: now.date_naive().to_string(),
            local_time: now.format("%H:%M:%S").to_string(),
            query_index,
            params: params.redacted(),
            mode,
            records,
            ranked: ranked.iter().map(RankedEntry::from).collect(),
        }
    }

    fn file_path(&self, json_output_dir: &str) -> PathBuf {
        PathBuf::from(json_output_dir)
            .join(&self.local_date)
            .join(format!(
                "{}_q{}.json",
                self.local_time.replace(':', ""),
                self.query_index
            ))
    }
}

/// Write a [`QueryReport`] under `{json_output_dir}/{date}/` and return its path.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, query = report.query_index))]
pub async fn write_report(report: &QueryReport, json_output_dir: &str) -> Result<PathBuf, NewsError> {
    let json = serde_json::to_string_pretty(report)?;
    let path = report.file_path(json_output_dir);

    if let Some(dir) = path.parent() {
        if let Err(e) = fs::create_dir_all(dir).await {
            error!(dir = %dir.display(), error = %e, "Failed to create JSON dir");
            return Err(e.into());
        }
    }

    fs::write(&path, json).await?;
    info!(path = %path.display(), entries = report.ranked.len(), "Wrote JSON report");
    Ok(path)
}
