//! Free-keyword extraction: tokenize, drop short tokens and stop-words, count.

use crate::analysis::tally::{MentionKey, Tally, aggregate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Runs of non-word characters. `\W` is Unicode-aware, so accented letters
/// stay inside their token.
static TOKEN_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W+").expect("valid token regex"));

/// Tokens shorter than this many characters are dropped by default.
pub const DEFAULT_MIN_TOKEN_LEN: usize = 4;

/// Stop-word set plus the minimum token length.
#[derive(Debug, Clone)]
pub struct KeywordFilter {
    stopwords: HashSet<String>,
    min_len: usize,
}

impl KeywordFilter {
    /// Stop-words are compared lowercase regardless of how they are given.
    pub fn new<I, S>(stopwords: I, min_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        KeywordFilter {
            stopwords: stopwords
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            min_len,
        }
    }

    fn keeps(&self, token: &str) -> bool {
        token.chars().count() >= self.min_len && !self.stopwords.contains(token)
    }

    /// Surviving tokens of `text`, lowercased, in text order.
    pub fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        TOKEN_SPLIT
            .split(text)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .filter(move |t| self.keeps(t))
    }

    /// Frequency of each surviving token in one text.
    pub fn count_text(&self, text: &str) -> Tally {
        self.tokens(text).map(|t| (MentionKey::Label(t), 1)).collect()
    }
}

/// Count keywords across many texts and fold them into one tally.
pub fn count_keywords<I, S>(texts: I, filter: &KeywordFilter) -> Tally
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aggregate(texts.into_iter().map(|text| filter.count_text(text.as_ref())))
}
