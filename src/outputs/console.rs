//! Plain-text rendering of a ranked tally.

use crate::analysis::MentionKey;

/// One line per entry, `"<label>: <count> mentions"`, in the given order.
pub fn format_ranked(ranked: &[(MentionKey, u64)]) -> Vec<String> {
    ranked
        .iter()
        .map(|(key, count)| {
            let unit = if *count == 1 { "mention" } else { "mentions" };
            format!("{key}: {count} {unit}")
        })
        .collect()
}

/// Print a query's ranking, or say that nothing was found.
pub fn print_ranked(index: usize, ranked: &[(MentionKey, u64)]) {
    if ranked.is_empty() {
        println!("Query {index}: no mentions found.");
        return;
    }
    println!("Query {index}:");
    for line in format_ranked(ranked) {
        println!("  {line}");
    }
}

/// Print the diagnostic for a query whose data could not be obtained.
pub fn print_absent(index: usize, reason: &str) {
    println!("Query {index}: could not analyze news ({reason}).");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ranked() {
        let ranked = vec![
            (MentionKey::place("Jalisco", "Guadalajara"), 3),
            (MentionKey::label("Sonora"), 1),
        ];
        assert_eq!(
            format_ranked(&ranked),
            vec!["Guadalajara (Jalisco): 3 mentions", "Sonora: 1 mention"]
        );
    }

    #[test]
    fn test_format_empty() {
        assert!(format_ranked(&[]).is_empty());
    }
}
