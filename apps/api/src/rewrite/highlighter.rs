//! Phrase-match highlighting — the alternate `phrase` strategy.
//!
//! Matches keyword phrases as token sequences over the Unicode words of the
//! document, which tolerates the case and punctuation differences a literal
//! substring scan misses. A sentence absorbs at most one phrase match: the
//! matched span is wrapped in a red inline style and its sentence in bold.
//! Keywords with no usable match are reported in a trailing
//! "Unused Keywords" line, this variant's reporting shape.

use std::collections::HashSet;
use std::ops::Range;

use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

use crate::models::keyword::KeywordRecord;
use crate::rewrite::engine::{RewriteOutcome, RewriteStrategy};
use crate::rewrite::segmenter::Sentence;

/// Highlights phrase matches in place instead of appending keywords.
pub struct PhraseHighlighter;

/// A document token with its byte offset in the source text.
struct Token<'a> {
    start: usize,
    text: &'a str,
}

impl RewriteStrategy for PhraseHighlighter {
    fn name(&self) -> &'static str {
        "phrase"
    }

    fn rewrite(
        &self,
        text: &str,
        keywords: &[KeywordRecord],
        sentences: &[Sentence],
    ) -> RewriteOutcome {
        let tokens: Vec<Token> = text
            .unicode_word_indices()
            .map(|(start, word)| Token { start, text: word })
            .collect();

        // Keyword phrases tokenized once, lowercased for comparison.
        let phrases: Vec<Vec<String>> = keywords
            .iter()
            .map(|k| k.keyword.unicode_words().map(str::to_lowercase).collect())
            .collect();

        let mut working = text.to_string();
        let mut highlighted: Vec<String> = Vec::new();
        let mut matched: HashSet<usize> = HashSet::new();
        let mut consumed: HashSet<usize> = HashSet::new();

        // Walk the document left to right; at each token, try every phrase
        // that has not been placed yet. Earlier matches win.
        for pos in 0..tokens.len() {
            for (ki, phrase) in phrases.iter().enumerate() {
                if matched.contains(&ki) || phrase.is_empty() {
                    continue;
                }
                let Some(span) = match_at(&tokens, pos, phrase) else {
                    continue;
                };
                let Some(sentence) = sentences.iter().find(|s| s.range().contains(&span.start))
                else {
                    continue;
                };
                if consumed.contains(&sentence.index) || span.end > sentence.range().end {
                    continue;
                }

                let span_text = &text[span.clone()];
                let styled = format!("<span style=\"color:red;\">{span_text}</span>");
                let rewritten = sentence.text.replacen(span_text, &styled, 1);
                let bolded = format!("<b>{rewritten}</b>");
                let replaced = working.replacen(&sentence.text, &bolded, 1);

                if replaced == working {
                    warn!(
                        "Placement anomaly: sentence {} not found verbatim, phrase '{}' skipped",
                        sentence.index, keywords[ki].keyword
                    );
                    continue;
                }

                working = replaced;
                consumed.insert(sentence.index);
                matched.insert(ki);
                highlighted.push(keywords[ki].keyword.clone());
            }
        }

        let unused: Vec<String> = keywords
            .iter()
            .enumerate()
            .filter(|(i, _)| !matched.contains(i))
            .map(|(_, k)| k.keyword.clone())
            .collect();

        if !unused.is_empty() {
            working.push_str("\n\nUnused Keywords: ");
            working.push_str(&unused.join(", "));
        }

        RewriteOutcome {
            optimized_text: working,
            used_keywords: highlighted,
            unused_keywords: unused,
        }
    }
}

/// Tries to match `phrase` against the tokens starting at `pos`, comparing
/// case-insensitively. Returns the byte span of the matched text, which may
/// include punctuation between the tokens.
fn match_at(tokens: &[Token], pos: usize, phrase: &[String]) -> Option<Range<usize>> {
    if pos + phrase.len() > tokens.len() {
        return None;
    }
    for (offset, word) in phrase.iter().enumerate() {
        if tokens[pos + offset].text.to_lowercase() != *word {
            return None;
        }
    }
    let first = &tokens[pos];
    let last = &tokens[pos + phrase.len() - 1];
    Some(first.start..last.start + last.text.len())
}
