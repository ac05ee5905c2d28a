//! Data models for news records, label files and query parameters.
//!
//! This module defines the data structures that cross the pipeline's edges:
//! - [`Record`]: one news item as returned by the search API
//! - [`Labels`]: the raw contents of a label file (flat or by region)
//! - [`QueryParams`]: one set of search parameters from the params file
//! - [`ApiResponse`]: the envelope NewsAPI wraps articles in
//!
//! The API uses camelCase field names, hence the `rename` attributes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A news item with optional text fields.
///
/// Records are built from raw JSON values rather than deserialized directly so
/// that a field with the wrong type (a number, an object) degrades to `None`
/// instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
}

impl Record {
    /// Build a record from one element of the API's `articles` array.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(str::to_string);
        Record {
            title: field("title"),
            description: field("description"),
            content: field("content"),
            url: field("url"),
            published_at: field("publishedAt"),
        }
    }
}

/// Raw label file contents.
///
/// Either a flat list of place names / keywords:
///
/// ```json
/// ["Jalisco", "Sonora", "Chihuahua"]
/// ```
///
/// or a mapping from region to the places inside it:
///
/// ```json
/// { "Jalisco": ["Guadalajara", "Zapopan"] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Labels {
    Flat(Vec<String>),
    Hierarchical(BTreeMap<String, Vec<String>>),
}

/// One NewsAPI query, e.g. `{"q": "violencia", "language": "es", "pageSize": 50}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct QueryParams(pub BTreeMap<String, Value>);

impl QueryParams {
    /// Render values as query-string pairs. Strings are used verbatim,
    /// other scalars through their JSON text; nulls are dropped.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(k, v)| match v {
                Value::Null => None,
                Value::String(s) => Some((k.clone(), s.clone())),
                other => Some((k.clone(), other.to_string())),
            })
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Value::String(value.into()));
    }

    /// Same parameters with credentials masked, for logs and reports.
    pub fn redacted(&self) -> QueryParams {
        let mut masked = self.clone();
        if let Some(v) = masked.0.get_mut("apiKey") {
            *v = Value::String("***".to_string());
        }
        masked
    }
}

/// Response envelope of `/v2/everything`.
///
/// Success: `{"status": "ok", "totalResults": 12, "articles": [...]}`.
/// Failure: `{"status": "error", "code": "apiKeyInvalid", "message": "..."}`.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(rename = "totalResults", default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub articles: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_from_value() {
        let v = json!({
            "title": "Lluvias en Zapopan",
            "description": null,
            "content": "Texto completo",
            "url": "https://example.com/a",
            "publishedAt": "2024-09-01T10:00:00Z"
        });
        let record = Record::from_value(&v);
        assert_eq!(record.title.as_deref(), Some("Lluvias en Zapopan"));
        assert_eq!(record.description, None);
        assert_eq!(record.content.as_deref(), Some("Texto completo"));
        assert_eq!(record.published_at.as_deref(), Some("2024-09-01T10:00:00Z"));
    }

    #[test]
    fn test_record_wrong_types_degrade() {
        let v = json!({ "title": 42, "description": ["a"], "content": {} });
        assert_eq!(Record::from_value(&v), Record::default());
        assert_eq!(Record::from_value(&json!("not an object")), Record::default());
    }

    #[test]
    fn test_labels_flat_deserialization() {
        let labels: Labels = serde_json::from_str(r#"["Jalisco", "Sonora"]"#).unwrap();
        assert_eq!(
            labels,
            Labels::Flat(vec!["Jalisco".to_string(), "Sonora".to_string()])
        );
    }

    #[test]
    fn test_labels_hierarchical_deserialization() {
        let labels: Labels =
            serde_json::from_str(r#"{"Jalisco": ["Guadalajara", "Zapopan"]}"#).unwrap();
        match labels {
            Labels::Hierarchical(map) => {
                assert_eq!(map["Jalisco"], vec!["Guadalajara", "Zapopan"]);
            }
            other => panic!("expected hierarchical labels, got {other:?}"),
        }
    }

    #[test]
    fn test_query_pairs() {
        let params: QueryParams =
            serde_json::from_str(r#"{"q": "violencia", "pageSize": 20, "from": null}"#).unwrap();
        assert_eq!(
            params.to_query_pairs(),
            vec![
                ("pageSize".to_string(), "20".to_string()),
                ("q".to_string(), "violencia".to_string()),
            ]
        );
    }

    #[test]
    fn test_redacted_masks_api_key() {
        let mut params = QueryParams::default();
        params.insert("q", "Jalisco");
        params.insert("apiKey", "secret");
        let masked = params.redacted();
        assert_eq!(masked.0["apiKey"], json!("***"));
        assert_eq!(masked.0["q"], json!("Jalisco"));
        assert_eq!(params.0["apiKey"], json!("secret"));
    }

    #[test]
    fn test_api_response_error_envelope() {
        let body = r#"{"status":"error","code":"apiKeyMissing","message":"Your API key is missing."}"#;
        let resp: ApiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.status, "error");
        assert_eq!(resp.code.as_deref(), Some("apiKeyMissing"));
        assert!(resp.articles.is_empty());
    }
}
