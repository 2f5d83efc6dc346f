//! Literal-substring keyword placement — the production `mark` strategy.
//!
//! Processes keywords in ranking order as an explicit fold: the working
//! text, the used/unused partition, and the set of consumed sentences are
//! threaded through one step per keyword, so there is no hidden aliasing of
//! a shared document.

use std::collections::HashSet;

use tracing::warn;

use crate::models::keyword::KeywordRecord;
use crate::rewrite::engine::{RewriteOutcome, RewriteStrategy};
use crate::rewrite::segmenter::Sentence;

/// Sentences at or below this word count never receive an insertion —
/// fragments and headers read badly with a keyword bolted on.
const MIN_SENTENCE_WORDS: usize = 3;

/// Appends eligible keywords to sentences as `<mark>` annotations.
pub struct MarkInserter;

/// Fold state threaded through one placement step per keyword.
struct Placement {
    working: String,
    used: Vec<String>,
    unused: Vec<String>,
    /// Indices of sentences that already absorbed an insertion. A mutated
    /// sentence is no longer a verbatim-matchable target, so it is excluded
    /// from later scans.
    consumed: HashSet<usize>,
}

impl RewriteStrategy for MarkInserter {
    fn name(&self) -> &'static str {
        "mark"
    }

    fn rewrite(
        &self,
        text: &str,
        keywords: &[KeywordRecord],
        sentences: &[Sentence],
    ) -> RewriteOutcome {
        let init = Placement {
            working: text.to_string(),
            used: Vec::new(),
            unused: Vec::new(),
            consumed: HashSet::new(),
        };

        let state = keywords
            .iter()
            .fold(init, |state, record| place_keyword(state, record, sentences));

        RewriteOutcome {
            optimized_text: state.working,
            used_keywords: state.used,
            unused_keywords: state.unused,
        }
    }
}

/// One fold step: try to place a single keyword, classifying it used or
/// unused. Never fails; anomalies downgrade to unused.
fn place_keyword(mut state: Placement, record: &KeywordRecord, sentences: &[Sentence]) -> Placement {
    let keyword = record.keyword.as_str();

    // Presence, even pre-existing, suppresses insertion.
    if state.working.contains(keyword) {
        state.unused.push(keyword.to_string());
        return state;
    }

    let target = sentences.iter().find(|s| {
        s.word_count() > MIN_SENTENCE_WORDS
            && !s.text.contains(keyword)
            && !state.consumed.contains(&s.index)
    });

    let Some(sentence) = target else {
        state.unused.push(keyword.to_string());
        return state;
    };

    let annotated = format!("{} <mark>{}</mark>", sentence.text, keyword);
    let replaced = state.working.replacen(&sentence.text, &annotated, 1);

    if replaced == state.working {
        // The sentence substring no longer occurs verbatim in the working
        // text (duplicate sentence or earlier drift). Recover locally.
        warn!(
            "Placement anomaly: sentence {} not found verbatim, keyword '{}' left unused",
            sentence.index, keyword
        );
        state.unused.push(keyword.to_string());
        return state;
    }

    state.working = replaced;
    state.consumed.insert(sentence.index);
    state.used.push(keyword.to_string());
    state
}
