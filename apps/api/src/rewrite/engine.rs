//! Rewrite engine — wires a segmenter and a placement strategy into the
//! optimize pipeline: segment once, place keywords, finish.
//!
//! The segmenter and strategy are injected capabilities, not globals. The
//! sentence list is computed once from the original text and handed to the
//! strategy as a fixed slice — it is never recomputed mid-run, so earlier
//! insertions cannot drift the boundaries later keywords see.

use std::sync::Arc;

use tracing::info;

use crate::models::keyword::KeywordRecord;
use crate::rewrite::finisher::make_marketable;
use crate::rewrite::segmenter::{Segmenter, Sentence};

/// Outcome of one rewrite run.
///
/// `used_keywords` and `unused_keywords` partition the input keyword list:
/// every keyword lands in exactly one of them, `used_keywords` in the order
/// placements succeeded.
#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub optimized_text: String,
    pub used_keywords: Vec<String>,
    pub unused_keywords: Vec<String>,
}

/// A keyword placement strategy.
///
/// Strategies are pure and synchronous — all I/O (the keyword fetch)
/// completes before placement begins — and must return a result for any
/// well-formed string input rather than erroring. Placement trouble
/// reclassifies the keyword as unused.
pub trait RewriteStrategy: Send + Sync {
    /// Short name used in logs and config.
    fn name(&self) -> &'static str;

    fn rewrite(
        &self,
        text: &str,
        keywords: &[KeywordRecord],
        sentences: &[Sentence],
    ) -> RewriteOutcome;
}

/// Which placement strategy the service runs with, selected at startup via
/// `REWRITE_STRATEGY`. `mark` is the production default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Mark,
    Phrase,
}

impl StrategyKind {
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        match value {
            "mark" => Ok(StrategyKind::Mark),
            "phrase" => Ok(StrategyKind::Phrase),
            other => anyhow::bail!(
                "unknown REWRITE_STRATEGY '{other}' (expected 'mark' or 'phrase')"
            ),
        }
    }
}

/// The full rewrite pipeline: segment → place → finish.
pub struct ContentRewriter {
    segmenter: Arc<dyn Segmenter>,
    strategy: Arc<dyn RewriteStrategy>,
}

impl ContentRewriter {
    pub fn new(segmenter: Arc<dyn Segmenter>, strategy: Arc<dyn RewriteStrategy>) -> Self {
        Self {
            segmenter,
            strategy,
        }
    }

    /// Runs the pipeline over one request's text and keyword page.
    ///
    /// Each call builds its own sentence list and working text; nothing is
    /// shared across requests.
    pub fn optimize(&self, text: &str, keywords: &[KeywordRecord]) -> RewriteOutcome {
        let sentences = self.segmenter.segment(text);
        info!(
            "Rewrite pipeline ({}): {} sentences, {} keywords",
            self.strategy.name(),
            sentences.len(),
            keywords.len()
        );

        let RewriteOutcome {
            optimized_text,
            used_keywords,
            unused_keywords,
        } = self.strategy.rewrite(text, keywords, &sentences);

        RewriteOutcome {
            optimized_text: make_marketable(&optimized_text),
            used_keywords,
            unused_keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::finisher::CALL_TO_ACTION;
    use crate::rewrite::highlighter::PhraseHighlighter;
    use crate::rewrite::placer::MarkInserter;
    use crate::rewrite::segmenter::RuleSegmenter;

    fn make_keywords(words: &[&str]) -> Vec<KeywordRecord> {
        words
            .iter()
            .map(|w| KeywordRecord {
                keyword: w.to_string(),
                search_volume: 100,
                seo_difficulty: 50.0,
            })
            .collect()
    }

    fn rewriter(strategy: Arc<dyn RewriteStrategy>) -> ContentRewriter {
        ContentRewriter::new(Arc::new(RuleSegmenter), strategy)
    }

    #[test]
    fn test_strategy_kind_parses_known_values() {
        assert_eq!(StrategyKind::parse("mark").unwrap(), StrategyKind::Mark);
        assert_eq!(StrategyKind::parse("phrase").unwrap(), StrategyKind::Phrase);
    }

    #[test]
    fn test_strategy_kind_rejects_unknown_value() {
        let err = StrategyKind::parse("semantic").unwrap_err();
        assert!(err.to_string().contains("semantic"));
    }

    #[test]
    fn test_empty_keyword_list_appends_only_call_to_action() {
        let engine = rewriter(Arc::new(MarkInserter));
        let text = "This sentence is left completely alone.";
        let outcome = engine.optimize(text, &[]);

        assert!(outcome.used_keywords.is_empty());
        assert!(outcome.unused_keywords.is_empty());
        assert_eq!(outcome.optimized_text, format!("{text}\n\n{CALL_TO_ACTION}"));
    }

    #[test]
    fn test_call_to_action_present_for_both_strategies() {
        let text = "This is a fairly long sentence about study options.";
        let keywords = make_keywords(&["apprenticeships"]);

        for strategy in [
            Arc::new(MarkInserter) as Arc<dyn RewriteStrategy>,
            Arc::new(PhraseHighlighter) as Arc<dyn RewriteStrategy>,
        ] {
            let outcome = rewriter(strategy).optimize(text, &keywords);
            assert!(
                outcome.optimized_text.contains(CALL_TO_ACTION),
                "finisher must run after either strategy"
            );
        }
    }

    #[test]
    fn test_partition_property_for_both_strategies() {
        let text = "Students weigh study options carefully these days. Short one. \
                    Advisers discuss careers with them every week.";
        let keywords = make_keywords(&["careers", "apprenticeships", "open days", "study options"]);

        for strategy in [
            Arc::new(MarkInserter) as Arc<dyn RewriteStrategy>,
            Arc::new(PhraseHighlighter) as Arc<dyn RewriteStrategy>,
        ] {
            let name = strategy.name();
            let outcome = rewriter(strategy).optimize(text, &keywords);

            let mut all: Vec<String> = outcome
                .used_keywords
                .iter()
                .chain(outcome.unused_keywords.iter())
                .cloned()
                .collect();
            all.sort();
            let mut expected: Vec<String> =
                keywords.iter().map(|k| k.keyword.clone()).collect();
            expected.sort();
            assert_eq!(all, expected, "{name}: used ∪ unused must equal the input list");

            for used in &outcome.used_keywords {
                assert!(
                    !outcome.unused_keywords.contains(used),
                    "{name}: '{used}' appears in both partitions"
                );
            }
        }
    }

    #[test]
    fn test_output_never_shrinks_for_both_strategies() {
        let text = "Nothing here matches anything. Another filler sentence follows it.";
        let keywords = make_keywords(&["zzz-unplaceable"]);

        for strategy in [
            Arc::new(MarkInserter) as Arc<dyn RewriteStrategy>,
            Arc::new(PhraseHighlighter) as Arc<dyn RewriteStrategy>,
        ] {
            let outcome = rewriter(strategy).optimize(text, &keywords);
            assert!(outcome.optimized_text.len() >= text.len());
        }
    }

    #[test]
    fn test_keyword_slice_is_not_mutated() {
        let keywords = make_keywords(&["careers", "apprenticeships"]);
        let before: Vec<String> = keywords.iter().map(|k| k.keyword.clone()).collect();

        let engine = rewriter(Arc::new(MarkInserter));
        let _ = engine.optimize("A long enough sentence for insertion lives here.", &keywords);

        let after: Vec<String> = keywords.iter().map(|k| k.keyword.clone()).collect();
        assert_eq!(before, after);
    }
}
