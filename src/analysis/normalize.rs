//! Turn a [`Record`] into the single lowercase string the counters scan.

use crate::models::Record;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::fmt;

/// NewsAPI cuts `content` at ~200 chars and appends e.g. `… [+2345 chars]`.
static TRUNCATION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*…?\s*\[\+\d+ chars\]\s*$").expect("valid truncation regex"));

/// An opening/closing tag or a character reference. A bare `<` is plain text.
static MARKUP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?[a-zA-Z][^>]*>|&(?:#\d+|#[xX][0-9a-fA-F]+|[a-zA-Z]+\d*);")
        .expect("valid markup regex")
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Which record fields feed the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TextFields {
    /// `title + " " + description`
    #[default]
    TitleDescription,
    /// `content` alone
    Content,
    /// title, description and content
    All,
}

impl fmt::Display for TextFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextFields::TitleDescription => "title-description",
            TextFields::Content => "content",
            TextFields::All => "all",
        })
    }
}

/// Concatenate the selected fields with a separating space and lowercase the
/// result. Missing fields count as empty strings.
pub fn normalize(record: &Record, fields: TextFields) -> String {
    let title = clean_field(record.title.as_deref());
    let description = clean_field(record.description.as_deref());
    let content = strip_truncation_marker(&clean_field(record.content.as_deref())).to_string();

    let joined = match fields {
        TextFields::TitleDescription => format!("{title} {description}"),
        TextFields::Content => content,
        TextFields::All => format!("{title} {description} {content}"),
    };
    joined.to_lowercase()
}

/// Field text with embedded HTML reduced to its text nodes and whitespace
/// runs (newlines included) collapsed to one space.
fn clean_field(field: Option<&str>) -> String {
    let text = match field {
        None => return String::new(),
        Some(s) if MARKUP.is_match(s) => html_to_text(s),
        Some(s) => s.to_string(),
    };
    WHITESPACE.replace_all(&text, " ").into_owned()
}

/// Adjacent block elements carry no whitespace between them, so text nodes
/// are joined with a space; [`clean_field`] collapses the doubled ones.
fn html_to_text(s: &str) -> String {
    Html::parse_fragment(s)
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_truncation_marker(s: &str) -> &str {
    match TRUNCATION_MARKER.find(s) {
        Some(m) => &s[..m.start()],
        None => s,
    }
}
