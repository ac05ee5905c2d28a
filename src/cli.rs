//! Command-line interface definitions for News Mentions.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Flags that also exist in the YAML configuration override the file value.

use crate::analysis::{MatchPolicy, TextFields};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// What to count in each article.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Mentions of the labels in `--labels`
    #[default]
    Mentions,
    /// Free keywords, minus stop-words and short tokens
    Keywords,
}

/// Command-line arguments for the News Mentions application.
///
/// # Examples
///
/// ```sh
/// # Count state mentions, presence per article
/// news_mentions -p params.json -l estados.json
///
/// # Count every occurrence of each municipality in article content
/// news_mentions -p params.json -l municipios.json --policy substring --fields content
///
/// # Top 20 keywords, with a JSON report per query
/// news_mentions -p params.json --mode keywords -n 20 -j ./reports
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// JSON file with an array of NewsAPI query parameter objects
    #[arg(short, long)]
    pub params: PathBuf,

    /// JSON file with labels: a list of names or a region -> names mapping
    /// (required in `mentions` mode)
    #[arg(short, long)]
    pub labels: Option<PathBuf>,

    /// Optional path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// What to count
    #[arg(long, value_enum, default_value_t = Mode::Mentions)]
    pub mode: Mode,

    /// Matching policy for labels (overrides config)
    #[arg(long, value_enum)]
    pub policy: Option<MatchPolicy>,

    /// Record fields to analyze (overrides config)
    #[arg(long, value_enum)]
    pub fields: Option<TextFields>,

    /// Show only the N most mentioned entries (overrides config)
    #[arg(short = 'n', long)]
    pub top_n: Option<usize>,

    /// NewsAPI key, added to queries that do not carry an `apiKey`
    #[arg(long, env = "NEWSAPI_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output directory for JSON reports (one file per query)
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Run queries in file order instead of shuffling them
    #[arg(long)]
    pub no_shuffle: bool,

    /// Do not wait between queries
    #[arg(long)]
    pub no_delay: bool,
}
