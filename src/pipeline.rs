//! One configurable analysis pass: fetch records, normalize, count, fold.

use crate::analysis::{
    KeywordFilter, LabelSet, MatchPolicy, Tally, TextFields, count_keywords, count_mentions,
    normalize,
};
use crate::error::NewsError;
use crate::models::{QueryParams, Record};
use crate::sources::RecordSource;
use tracing::{debug, info, instrument};

/// What the analyzer counts.
#[derive(Debug, Clone)]
pub enum AnalysisMode {
    Mentions { labels: LabelSet, policy: MatchPolicy },
    Keywords(KeywordFilter),
}

impl AnalysisMode {
    pub fn describe(&self) -> String {
        match self {
            AnalysisMode::Mentions { policy, .. } => format!("mentions/{policy}"),
            AnalysisMode::Keywords(_) => "keywords".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Analyzer {
    pub fields: TextFields,
    pub mode: AnalysisMode,
}

impl Analyzer {
    pub fn new(fields: TextFields, mode: AnalysisMode) -> Self {
        Self { fields, mode }
    }

    /// Count across a batch of records. Never fails.
    pub fn analyze(&self, records: &[Record]) -> Tally {
        let texts = records.iter().map(|r| {
            debug!(url = ?r.url, published_at = ?r.published_at, "Analyzing record");
            normalize(r, self.fields)
        });
        match &self.mode {
            AnalysisMode::Mentions { labels, policy } => count_mentions(texts, labels, *policy),
            AnalysisMode::Keywords(filter) => count_keywords(texts, filter),
        }
    }
}

/// Result of one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub records: usize,
    pub tally: Tally,
}

/// Fetch one query's records and analyze them.
///
/// `Err(DataAbsent)` means the source could not deliver; `Ok` with an empty
/// tally means the articles simply did not mention anything.
#[instrument(level = "info", skip_all, fields(source = source.name(), mode = %analyzer.mode.describe()))]
pub async fn run_query<S: RecordSource>(
    source: &S,
    params: &QueryParams,
    analyzer: &Analyzer,
) -> Result<QueryOutcome, NewsError> {
    let records = source.fetch(params).await?;
    let tally = analyzer.analyze(&records);
    info!(
        records = records.len(),
        distinct = tally.len(),
        total = tally.total(),
        "Analyzed query"
    );
    Ok(QueryOutcome {
        records: records.len(),
        tally,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::MentionKey;
    use crate::models::Labels;
    use std::collections::BTreeMap;

    struct StaticSource(Vec<Record>);

    impl RecordSource for StaticSource {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch(&self, _params: &QueryParams) -> Result<Vec<Record>, NewsError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl RecordSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self, _params: &QueryParams) -> Result<Vec<Record>, NewsError> {
            Err(NewsError::absent("failing", "apiKeyMissing"))
        }
    }

    fn record(title: &str, description: &str, content: &str) -> Record {
        Record {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            content: Some(content.to_string()),
            ..Record::default()
        }
    }

    fn states(policy: MatchPolicy) -> Analyzer {
        let labels = LabelSet::new(&Labels::Flat(vec![
            "Jalisco".to_string(),
            "Sonora".to_string(),
        ]))
        .unwrap();
        Analyzer::new(TextFields::TitleDescription, AnalysisMode::Mentions { labels, policy })
    }

    #[tokio::test]
    async fn test_failing_source_is_distinguishable_from_empty() {
        let analyzer = states(MatchPolicy::WordBoundary);
        let err = run_query(&FailingSource, &QueryParams::default(), &analyzer)
            .await
            .unwrap_err();
        assert!(err.is_data_absent());

        let empty = run_query(&StaticSource(vec![]), &QueryParams::default(), &analyzer)
            .await
            .unwrap();
        assert_eq!(empty.records, 0);
        assert!(empty.tally.is_empty());
    }

    #[tokio::test]
    async fn test_mentions_over_title_and_description() {
        let source = StaticSource(vec![
            record("Balacera en Sonora", "Autoridades de Sonora", "Jalisco"),
            record("Lluvias", "Jalisco en alerta", ""),
        ]);
        let outcome = run_query(&source, &QueryParams::default(), &states(MatchPolicy::Substring))
            .await
            .unwrap();
        assert_eq!(outcome.records, 2);
        assert_eq!(outcome.tally.get(&MentionKey::label("Sonora")), 2);
        // Content is not part of title-description.
        assert_eq!(outcome.tally.get(&MentionKey::label("Jalisco")), 1);
    }

    #[test]
    fn test_content_field_selection() {
        let mut analyzer = states(MatchPolicy::WordBoundary);
        analyzer.fields = TextFields::Content;
        let records = vec![record("Sonora", "Sonora", "Noticias de Jalisco [+120 chars]")];
        let tally = analyzer.analyze(&records);
        assert_eq!(tally.get(&MentionKey::label("Jalisco")), 1);
        assert_eq!(tally.get(&MentionKey::label("Sonora")), 0);
    }

    #[test]
    fn test_hierarchical_presence_over_records() {
        let mut map = BTreeMap::new();
        map.insert(
            "Jalisco".to_string(),
            vec!["Guadalajara".to_string(), "Zapopan".to_string()],
        );
        let labels = LabelSet::new(&Labels::Hierarchical(map)).unwrap();
        let analyzer = Analyzer::new(
            TextFields::TitleDescription,
            AnalysisMode::Mentions {
                labels,
                policy: MatchPolicy::WordBoundary,
            },
        );
        let records = vec![
            record("Hoy en Guadalajara y Zapopan", "hubo un evento en Guadalajara", ""),
            record("Zapopan", "", ""),
        ];
        let tally = analyzer.analyze(&records);
        assert_eq!(tally.get(&MentionKey::place("Jalisco", "Guadalajara")), 1);
        assert_eq!(tally.get(&MentionKey::place("Jalisco", "Zapopan")), 2);
    }

    #[test]
    fn test_multi_word_label_split_by_markup() {
        let labels = LabelSet::new(&Labels::Flat(vec!["Ciudad de México".to_string()])).unwrap();
        let key = MentionKey::label("Ciudad de México");
        let records = vec![record(
            "Lluvias",
            "<p>Alerta en Ciudad de <b>México</b></p>",
            "",
        )];
        for policy in [MatchPolicy::Substring, MatchPolicy::WordBoundary] {
            let analyzer = Analyzer::new(
                TextFields::TitleDescription,
                AnalysisMode::Mentions {
                    labels: labels.clone(),
                    policy,
                },
            );
            assert_eq!(analyzer.analyze(&records).get(&key), 1, "{policy}");
        }
    }

    #[test]
    fn test_keyword_mode() {
        let analyzer = Analyzer::new(
            TextFields::TitleDescription,
            AnalysisMode::Keywords(KeywordFilter::new(["jalisco", "de", "el"], 4)),
        );
        let records = vec![
            record("El gobierno de Jalisco", "anunció medidas", ""),
            Record::default(),
        ];
        let tally = analyzer.analyze(&records);
        assert_eq!(tally.len(), 3);
        assert_eq!(tally.get(&MentionKey::label("gobierno")), 1);
        assert_eq!(analyzer.mode.describe(), "keywords");
    }
}
