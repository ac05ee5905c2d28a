//! NewsAPI `/v2/everything` client.
//!
//! One request per query, no retries. Any failure (transport error, non-2xx
//! status, `"status": "error"` body, undecodable JSON) becomes
//! [`NewsError::DataAbsent`] carrying the API's own message when it sent one.

use crate::error::NewsError;
use crate::models::{ApiResponse, QueryParams, Record};
use crate::sources::RecordSource;
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

const SOURCE_NAME: &str = "newsapi";

#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
}

impl NewsApiClient {
    /// Build a client for `endpoint`. `api_key` is sent as `apiKey` on
    /// queries that do not already carry one.
    pub fn new(endpoint: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, NewsError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| NewsError::Config(format!("endpoint {endpoint:?}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NewsError::Config(format!("http client: {e}")))?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Query with the configured key filled in.
    fn with_key(&self, params: &QueryParams) -> QueryParams {
        let mut params = params.clone();
        if let Some(key) = &self.api_key {
            if !params.contains("apiKey") {
                params.insert("apiKey", key.clone());
            }
        }
        params
    }
}

impl RecordSource for NewsApiClient {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    #[instrument(level = "info", skip_all, fields(endpoint = %self.endpoint))]
    async fn fetch(&self, params: &QueryParams) -> Result<Vec<Record>, NewsError> {
        let t0 = Instant::now();
        let params = self.with_key(params);
        debug!(params = ?params.redacted(), "Requesting articles");

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&params.to_query_pairs())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Request failed");
                NewsError::absent(SOURCE_NAME, e)
            })?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| NewsError::absent(SOURCE_NAME, e))?;

        let records = parse_response(status.as_u16(), &body)?;
        info!(
            count = records.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched articles"
        );
        Ok(records)
    }
}

/// Decode a response body into records, or explain why there are none.
pub fn parse_response(status: u16, body: &str) -> Result<Vec<Record>, NewsError> {
    let parsed: Result<ApiResponse, _> = serde_json::from_str(body);
    let ok_status = (200..300).contains(&status);

    match parsed {
        Ok(resp) if ok_status && resp.status == "ok" => {
            debug!(total_results = ?resp.total_results, "API reported results");
            Ok(resp.articles.iter().map(Record::from_value).collect())
        }
        Ok(resp) => {
            let reason = match (resp.code, resp.message) {
                (Some(code), Some(message)) => format!("HTTP {status} {code}: {message}"),
                (None, Some(message)) => format!("HTTP {status}: {message}"),
                (Some(code), None) => format!("HTTP {status} {code}"),
                (None, None) => format!("HTTP {status}: invalid response"),
            };
            warn!(%reason, "API returned an error");
            Err(NewsError::absent(SOURCE_NAME, reason))
        }
        Err(e) => {
            warn!(
                status,
                error = %e,
                body_preview = %truncate_for_log(body, 300),
                "Response body is not valid JSON"
            );
            Err(NewsError::absent(SOURCE_NAME, format!("HTTP {status}: {e}")))
        }
    }
}
