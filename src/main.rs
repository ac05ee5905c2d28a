//! # News Mentions
//!
//! Query a news-search API with a list of parameter sets and count how often
//! place names (or free keywords) appear in the returned articles.
//!
//! ## Features
//!
//! - Flat label lists (`["Jalisco", "Sonora"]`) or region-keyed ones
//!   (`{"Jalisco": ["Guadalajara", "Zapopan"]}`)
//! - Substring (frequency) or word-boundary (presence) matching
//! - Keyword mode: stop-word filtered token frequencies
//! - Console ranking per query, optional JSON reports
//!
//! ## Usage
//!
//! ```sh
//! news_mentions -p params.json -l estados.json --policy substring -n 10
//! ```
//!
//! ## Architecture
//!
//! 1. **Loading**: labels, query parameters and run configuration
//! 2. **Fetching**: one NewsAPI request per parameter set, in shuffled order
//! 3. **Analysis**: normalize each article, count, fold into one tally
//! 4. **Output**: ranked console listing and optional JSON report
//!
//! Queries run one at a time with a randomized pause between them.

use clap::Parser;
use rand::rng;
use rand::seq::SliceRandom;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analysis;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod sources;
mod utils;

use analysis::{KeywordFilter, LabelSet, render_ranked};
use cli::{Cli, Mode};
use config::{AppConfig, load_config};
use outputs::{console, json};
use pipeline::{AnalysisMode, Analyzer, run_query};
use sources::files::{load_labels, load_params};
use sources::newsapi::NewsApiClient;
use utils::{ensure_writable_dir, random_delay};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("news_mentions starting up");

    let args = Cli::parse();
    debug!(?args.params, ?args.labels, ?args.mode, "Parsed CLI arguments");

    let config = load_config(args.config.as_deref()).await?.apply_cli(&args)?;

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    let analyzer = match build_analyzer(&args, &config).await {
        Ok(analyzer) => analyzer,
        Err(e) => {
            error!(error = %e, "Failed to load labels");
            eprintln!("Error loading labels: {e}");
            return Err(e);
        }
    };

    let mut queries = match load_params(&args.params).await {
        Ok(queries) => queries,
        Err(e) => {
            error!(error = %e, "Failed to load query parameters");
            eprintln!("Error loading parameters: {e}");
            return Err(e.into());
        }
    };
    if config.shuffle {
        queries.shuffle(&mut rng());
    }

    let client = NewsApiClient::new(
        &config.endpoint,
        config.api_key.clone(),
        Duration::from_secs(config.timeout_secs),
    )?;

    let mut succeeded = 0usize;
    let mut absent = 0usize;
    for (i, params) in queries.iter().enumerate() {
        let index = i + 1;
        if i > 0 {
            let pause = random_delay(&config.delay);
            debug!(?pause, "Waiting before next query");
            tokio::time::sleep(pause).await;
        }
        info!(index, total = queries.len(), "Querying the API");

        match run_query(&client, params, &analyzer).await {
            Ok(outcome) => {
                succeeded += 1;
                let ranked = render_ranked(&outcome.tally, config.top_n);
                console::print_ranked(index, &ranked);

                if let Some(dir) = &args.json_output_dir {
                    let report = json::QueryReport::new(
                        chrono::Local::now(),
                        index,
                        params,
                        analyzer.mode.describe(),
                        outcome.records,
                        &ranked,
                    );
                    if let Err(e) = json::write_report(&report, dir).await {
                        error!(index, error = %e, "Failed to write JSON report");
                    }
                }
            }
            Err(e) if e.is_data_absent() => {
                absent += 1;
                warn!(index, error = %e, "No data for query; skipping");
                console::print_absent(index, &e.to_string());
            }
            Err(e) => {
                error!(index, error = %e, "Query failed");
                return Err(e.into());
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        queries = queries.len(),
        succeeded,
        absent,
        "Execution complete"
    );
    Ok(())
}

/// Turn the CLI mode and configuration into an [`Analyzer`].
async fn build_analyzer(args: &Cli, config: &AppConfig) -> Result<Analyzer, Box<dyn Error>> {
    let mode = match args.mode {
        Mode::Mentions => {
            let path = args
                .labels
                .as_deref()
                .ok_or("--labels is required in mentions mode")?;
            let labels = LabelSet::new(&load_labels(path).await?)?;
            if labels.is_empty() {
                warn!("Label set is empty; every query will report no mentions");
            } else {
                info!(count = labels.len(), policy = %config.policy, "Label set ready");
            }
            AnalysisMode::Mentions {
                labels,
                policy: config.policy,
            }
        }
        Mode::Keywords => AnalysisMode::Keywords(KeywordFilter::new(
            &config.stopwords,
            config.min_token_len,
        )),
    };
    info!(mode = %mode.describe(), fields = %config.fields, "Analyzer ready");
    Ok(Analyzer::new(config.fields, mode))
}
