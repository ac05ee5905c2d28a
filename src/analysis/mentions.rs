//! Counting label mentions in normalized text.
//!
//! Two policies are supported and a run uses exactly one of them:
//!
//! | Policy | Value per text | `"aaa"` with label `"a"` |
//! |--------|----------------|--------------------------|
//! | [`MatchPolicy::Substring`] | number of non-overlapping occurrences | 3 |
//! | [`MatchPolicy::WordBoundary`] | 1 if the label appears as a whole word | 0 |
//!
//! Both are case-insensitive.

use crate::analysis::tally::{MentionKey, Tally, aggregate};
use crate::error::NewsError;
use crate::models::Labels;
use itertools::Itertools;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// How a label is matched against a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MatchPolicy {
    /// Frequency: every non-overlapping occurrence counts, even inside
    /// larger words.
    Substring,
    /// Presence: at most 1 per text, whole words only.
    #[default]
    WordBoundary,
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchPolicy::Substring => "substring",
            MatchPolicy::WordBoundary => "word-boundary",
        })
    }
}

/// One validated label ready for matching.
#[derive(Debug, Clone)]
struct Target {
    key: MentionKey,
    needle: String,
    pattern: Regex,
}

impl Target {
    fn new(key: MentionKey, label: &str) -> Result<Self, NewsError> {
        let needle = label.trim().to_lowercase();
        // Half boundaries only look outside the label, so "Cd. Juárez" still
        // matches before a space or at the end of the text.
        let pattern = RegexBuilder::new(&format!(
            r"\b{{start-half}}{}\b{{end-half}}",
            regex::escape(&needle)
        ))
        .case_insensitive(true)
        .build()
        .map_err(|e| NewsError::Validation(format!("{label:?}: {e}")))?;
        Ok(Target { key, needle, pattern })
    }

    fn count_in(&self, text: &str, policy: MatchPolicy) -> u64 {
        match policy {
            MatchPolicy::Substring => text.matches(self.needle.as_str()).count() as u64,
            MatchPolicy::WordBoundary => u64::from(self.pattern.is_match(text)),
        }
    }
}

/// A validated, deduplicated set of labels.
///
/// Construction fails with [`NewsError::Validation`] on a blank label or a
/// blank region name, since an empty needle would match every text.
#[derive(Debug, Clone)]
pub struct LabelSet {
    targets: Vec<Target>,
}

impl LabelSet {
    pub fn new(labels: &Labels) -> Result<Self, NewsError> {
        let pairs: Vec<(MentionKey, &str)> = match labels {
            Labels::Flat(list) => list
                .iter()
                .map(|label| (MentionKey::label(label.trim()), label.as_str()))
                .collect(),
            Labels::Hierarchical(regions) => {
                let mut pairs = Vec::new();
                for (region, places) in regions {
                    if region.trim().is_empty() {
                        return Err(NewsError::Validation("empty region name".to_string()));
                    }
                    for place in places {
                        pairs.push((MentionKey::place(region.trim(), place.trim()), place.as_str()));
                    }
                }
                pairs
            }
        };

        let mut targets = Vec::with_capacity(pairs.len());
        for (key, label) in pairs.into_iter().unique_by(|(key, _)| key.clone()) {
            if label.trim().is_empty() {
                return Err(NewsError::Validation(format!("empty label in {key:?}")));
            }
            targets.push(Target::new(key, label)?);
        }
        debug!(count = targets.len(), "Built label set");
        Ok(LabelSet { targets })
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    #[cfg(test)]
    pub fn keys(&self) -> impl Iterator<Item = &MentionKey> {
        self.targets.iter().map(|t| &t.key)
    }
}

/// Score one text against every label.
pub fn count_text(text: &str, labels: &LabelSet, policy: MatchPolicy) -> Tally {
    if text.trim().is_empty() {
        return Tally::new();
    }
    let lowered = text.to_lowercase();
    labels
        .targets
        .iter()
        .map(|t| (t.key.clone(), t.count_in(&lowered, policy)))
        .collect()
}

/// Count mentions across many texts and fold them into one tally.
pub fn count_mentions<I, S>(texts: I, labels: &LabelSet, policy: MatchPolicy) -> Tally
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aggregate(
        texts
            .into_iter()
            .map(|text| count_text(text.as_ref(), labels, policy)),
    )
}
