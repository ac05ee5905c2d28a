//! Run configuration loaded from YAML.
//!
//! Every key is optional; a missing file section falls back to the defaults
//! below. Command-line flags are applied on top by [`AppConfig::apply_cli`].
//!
//! ```yaml
//! endpoint: https://newsapi.org/v2/everything
//! api_key: YOUR_KEY
//! fields: title-description
//! policy: word-boundary
//! top_n: 10
//! min_token_len: 4
//! stopwords: [para, como, sobre]
//! delay:
//!   min_secs: 1.0
//!   max_secs: 5.0
//! shuffle: true
//! timeout_secs: 30
//! ```

use crate::analysis::keywords::DEFAULT_MIN_TOKEN_LEN;
use crate::analysis::{MatchPolicy, TextFields};
use crate::cli::Cli;
use crate::error::NewsError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/everything";

/// Spanish function words that would otherwise dominate keyword counts.
const DEFAULT_STOPWORDS: &[&str] = &[
    "para", "como", "pero", "sobre", "este", "esta", "estos", "estas", "entre", "desde", "hasta",
    "donde", "cuando", "porque", "también", "tiene", "tienen", "había", "según", "durante",
    "todos", "todas", "otro", "otra", "otros", "otras", "cada", "sido", "será", "están", "ellos",
    "ellas", "nuestro", "nuestra", "menos", "después", "antes", "mientras",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            min_secs: 1.0,
            max_secs: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub fields: TextFields,
    pub policy: MatchPolicy,
    pub top_n: Option<usize>,
    pub min_token_len: usize,
    pub stopwords: Vec<String>,
    pub delay: DelayConfig,
    pub shuffle: bool,
    pub timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            fields: TextFields::default(),
            policy: MatchPolicy::default(),
            top_n: None,
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
            stopwords: DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect(),
            delay: DelayConfig::default(),
            shuffle: true,
            timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Parse a YAML document and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, NewsError> {
        let config: AppConfig =
            serde_yaml::from_str(yaml).map_err(|e| NewsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Command-line flags win over file values.
    pub fn apply_cli(mut self, cli: &Cli) -> Result<Self, NewsError> {
        if let Some(policy) = cli.policy {
            self.policy = policy;
        }
        if let Some(fields) = cli.fields {
            self.fields = fields;
        }
        if cli.top_n.is_some() {
            self.top_n = cli.top_n;
        }
        if cli.api_key.is_some() {
            self.api_key = cli.api_key.clone();
        }
        if cli.no_shuffle {
            self.shuffle = false;
        }
        if cli.no_delay {
            self.delay = DelayConfig {
                min_secs: 0.0,
                max_secs: 0.0,
            };
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), NewsError> {
        Url::parse(&self.endpoint)
            .map_err(|e| NewsError::Config(format!("endpoint {:?}: {e}", self.endpoint)))?;
        let DelayConfig { min_secs, max_secs } = self.delay;
        if !(min_secs >= 0.0 && max_secs >= min_secs && max_secs.is_finite()) {
            return Err(NewsError::Config(format!(
                "delay range {min_secs}..{max_secs} is invalid"
            )));
        }
        if self.min_token_len == 0 {
            return Err(NewsError::Config("min_token_len must be at least 1".to_string()));
        }
        Ok(())
    }
}

/// Load the run configuration; `None` means built-in defaults.
#[instrument(level = "info", skip_all)]
pub async fn load_config(path: Option<&Path>) -> Result<AppConfig, NewsError> {
    let Some(path) = path else {
        info!("No config file given; using defaults");
        return Ok(AppConfig::default());
    };
    let yaml = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| NewsError::Config(format!("{}: {e}", path.display())))?;
    let config = AppConfig::from_yaml(&yaml)?;
    info!(path = %path.display(), policy = %config.policy, fields = %config.fields, "Loaded configuration");
    Ok(config)
}
