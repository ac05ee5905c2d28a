//! Mention tallies and the aggregator that folds them together.

use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt;

/// Key of a [`Tally`] entry.
///
/// Ordering is derived: single labels sort before region/place pairs, and
/// each kind sorts lexicographically. The ranked view uses this order to
/// break ties.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MentionKey {
    /// A flat label or an extracted keyword.
    Label(String),
    /// A place inside a region of a hierarchical label set.
    Place { region: String, place: String },
}

impl MentionKey {
    pub fn label(s: impl Into<String>) -> Self {
        MentionKey::Label(s.into())
    }

    pub fn place(region: impl Into<String>, place: impl Into<String>) -> Self {
        MentionKey::Place {
            region: region.into(),
            place: place.into(),
        }
    }
}

impl fmt::Display for MentionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MentionKey::Label(label) => f.write_str(label),
            MentionKey::Place { region, place } => write!(f, "{place} ({region})"),
        }
    }
}

/// Non-negative counts per [`MentionKey`].
///
/// Only positive counts are stored, so an all-zero tally and an empty tally
/// compare equal and an unseen key counts as 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: BTreeMap<MentionKey, u64>,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` to `key`. Adding zero is a no-op.
    pub fn add(&mut self, key: MentionKey, n: u64) {
        if n == 0 {
            return;
        }
        *self.counts.entry(key).or_insert(0) += n;
    }

    #[cfg(test)]
    pub fn get(&self, key: &MentionKey) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Elementwise sum of two tallies.
    pub fn merge(mut self, other: Tally) -> Tally {
        self.absorb(other);
        self
    }

    /// In-place form of [`Tally::merge`].
    pub fn absorb(&mut self, other: Tally) {
        for (key, n) in other.counts {
            self.add(key, n);
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct keys with a positive count.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&MentionKey, u64)> {
        self.counts.iter().map(|(k, n)| (k, *n))
    }

    /// Entries ordered by descending count, ties by ascending key.
    ///
    /// `top_n` keeps only the first N entries; `Some(0)` yields nothing.
    pub fn ranked(&self, top_n: Option<usize>) -> Vec<(MentionKey, u64)> {
        // BTreeMap iteration is already key-ordered and sorted_by is stable.
        self.counts
            .iter()
            .map(|(k, n)| (k.clone(), *n))
            .sorted_by(|a, b| b.1.cmp(&a.1))
            .take(top_n.unwrap_or(usize::MAX))
            .collect()
    }
}

impl Extend<(MentionKey, u64)> for Tally {
    fn extend<I: IntoIterator<Item = (MentionKey, u64)>>(&mut self, iter: I) {
        for (key, n) in iter {
            self.add(key, n);
        }
    }
}

impl FromIterator<(MentionKey, u64)> for Tally {
    fn from_iter<I: IntoIterator<Item = (MentionKey, u64)>>(iter: I) -> Self {
        let mut tally = Tally::new();
        tally.extend(iter);
        tally
    }
}

/// Fold any sequence of tallies into one, starting from the empty tally.
pub fn aggregate<I>(tallies: I) -> Tally
where
    I: IntoIterator<Item = Tally>,
{
    tallies.into_iter().fold(Tally::new(), Tally::merge)
}

/// Ranked `(key, count)` pairs for presentation. See [`Tally::ranked`].
pub fn render_ranked(tally: &Tally, top_n: Option<usize>) -> Vec<(MentionKey, u64)> {
    tally.ranked(top_n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(entries: &[(&str, u64)]) -> Tally {
        entries
            .iter()
            .map(|(k, n)| (MentionKey::label(*k), *n))
            .collect()
    }

    #[test]
    fn test_zero_counts_are_not_stored() {
        let mut t = Tally::new();
        t.add(MentionKey::label("Sonora"), 0);
        assert!(t.is_empty());
        assert_eq!(t, Tally::new());
        assert_eq!(t.get(&MentionKey::label("Sonora")), 0);
    }

    #[test]
    fn test_merge_sums_elementwise() {
        let a = tally(&[("Jalisco", 2), ("Sonora", 1)]);
        let b = tally(&[("Jalisco", 3), ("Colima", 4)]);
        let merged = a.merge(b);
        assert_eq!(merged, tally(&[("Jalisco", 5), ("Sonora", 1), ("Colima", 4)]));
        assert_eq!(merged.total(), 10);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_aggregate_is_order_independent() {
        let parts = vec![
            tally(&[("Jalisco", 1)]),
            tally(&[("Sonora", 2), ("Jalisco", 1)]),
            tally(&[("Colima", 3)]),
        ];
        let forward = aggregate(parts.clone());
        let backward = aggregate(parts.into_iter().rev());
        assert_eq!(forward, backward);
        assert_eq!(forward.get(&MentionKey::label("Jalisco")), 2);
    }

    #[test]
    fn test_aggregate_empty_sequence() {
        assert_eq!(aggregate(Vec::new()), Tally::new());
    }

    #[test]
    fn test_ranked_descending_with_key_tiebreak() {
        let t = tally(&[("Zacatecas", 2), ("Colima", 5), ("Aguascalientes", 2), ("Sonora", 1)]);
        let ranked: Vec<(String, u64)> = render_ranked(&t, None)
            .into_iter()
            .map(|(k, n)| (k.to_string(), n))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("Colima".to_string(), 5),
                ("Aguascalientes".to_string(), 2),
                ("Zacatecas".to_string(), 2),
                ("Sonora".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_ranked_ignores_insertion_order() {
        let a = tally(&[("b", 1), ("a", 1), ("c", 1)]);
        let b = tally(&[("c", 1), ("b", 1), ("a", 1)]);
        assert_eq!(a.ranked(None), b.ranked(None));
    }

    #[test]
    fn test_ranked_top_n() {
        let t = tally(&[("a", 3), ("b", 2), ("c", 1)]);
        assert_eq!(t.ranked(Some(2)).len(), 2);
        assert_eq!(t.ranked(Some(2))[0], (MentionKey::label("a"), 3));
        assert!(t.ranked(Some(0)).is_empty());
        assert_eq!(t.ranked(Some(10)).len(), 3);
    }

    #[test]
    fn test_place_key_display_and_order() {
        let key = MentionKey::place("Jalisco", "Zapopan");
        assert_eq!(key.to_string(), "Zapopan (Jalisco)");
        assert!(MentionKey::label("zzz") < MentionKey::place("a", "a"));
        assert!(MentionKey::place("Jalisco", "Guadalajara") < MentionKey::place("Jalisco", "Zapopan"));
    }
}
