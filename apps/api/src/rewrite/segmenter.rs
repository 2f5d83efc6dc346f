//! Sentence segmentation — the boundary-detection capability the rewrite
//! engine is parameterized over.

use unicode_segmentation::UnicodeSegmentation;

/// One segmented sentence span of the input text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    /// Ordinal position in the source text.
    pub index: usize,
    /// Byte offset of the first character within the source text.
    pub start: usize,
    /// The sentence text, without surrounding whitespace.
    pub text: String,
}

impl Sentence {
    /// Number of Unicode words in the sentence.
    pub fn word_count(&self) -> usize {
        self.text.unicode_words().count()
    }

    /// Byte range the sentence occupies within the source text.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.text.len()
    }
}

/// Sentence boundary detection.
///
/// Implementations must be deterministic for a given input and must return
/// an empty list for empty input rather than an error. Spans are ordered,
/// non-overlapping, and reconstruct the input modulo whitespace.
pub trait Segmenter: Send + Sync {
    fn segment(&self, text: &str) -> Vec<Sentence>;
}

/// Common abbreviations whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "approx", "dept", "est",
    "fig", "no", "e.g", "i.e",
];

/// Rule-based sentence splitter.
///
/// A sentence ends at `.`, `!` or `?` (plus any closing quotes/brackets)
/// when the next non-whitespace character opens a new sentence, or at end of
/// input. Abbreviations, single-letter initials, and decimal points are not
/// boundaries. A trailing fragment without a terminator still counts as a
/// sentence so that segmentation covers the whole text.
pub struct RuleSegmenter;

impl Segmenter for RuleSegmenter {
    fn segment(&self, text: &str) -> Vec<Sentence> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences: Vec<Sentence> = Vec::new();
        let mut start: Option<usize> = None;
        let mut i = 0;

        while i < chars.len() {
            let (byte_idx, c) = chars[i];

            let Some(sentence_start) = start else {
                if !c.is_whitespace() {
                    start = Some(byte_idx);
                }
                i += 1;
                continue;
            };

            if matches!(c, '.' | '!' | '?') {
                let next_is_digit = chars
                    .get(i + 1)
                    .map_or(false, |&(_, next)| next.is_ascii_digit());
                let abbrev = c == '.' && ends_with_abbreviation(&text[sentence_start..byte_idx]);

                if !next_is_digit && !abbrev {
                    // Closing quotes/brackets belong to the sentence they end.
                    let mut end = i;
                    let mut j = i + 1;
                    while j < chars.len() && is_closer(chars[j].1) {
                        end = j;
                        j += 1;
                    }

                    if opens_new_sentence(&chars, j) {
                        let end_byte = chars[end].0 + chars[end].1.len_utf8();
                        sentences.push(Sentence {
                            index: sentences.len(),
                            start: sentence_start,
                            text: text[sentence_start..end_byte].to_string(),
                        });
                        start = None;
                        i = j;
                        continue;
                    }
                }
            }

            i += 1;
        }

        // A trailing fragment without a terminator still covers its text.
        if let Some(sentence_start) = start {
            let tail = text[sentence_start..].trim_end();
            if !tail.is_empty() {
                sentences.push(Sentence {
                    index: sentences.len(),
                    start: sentence_start,
                    text: tail.to_string(),
                });
            }
        }

        sentences
    }
}

fn is_closer(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

fn is_opener(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '\'' | '(' | '[' | '\u{201c}' | '\u{2018}')
}

/// True when position `j` (first char after the candidate boundary) starts a
/// new sentence: end of input, or whitespace followed by an opener/EOF.
fn opens_new_sentence(chars: &[(usize, char)], mut j: usize) -> bool {
    if j >= chars.len() {
        return true;
    }
    if !chars[j].1.is_whitespace() {
        return false;
    }
    while j < chars.len() && chars[j].1.is_whitespace() {
        j += 1;
    }
    j >= chars.len() || is_opener(chars[j].1)
}

/// True when the text before a period ends in an abbreviation or a
/// single-letter initial ("Dr", "e.g", "J").
fn ends_with_abbreviation(prefix: &str) -> bool {
    let Some(last) = prefix.rsplit(char::is_whitespace).next() else {
        return false;
    };
    let token = last.trim_start_matches(|c: char| !c.is_alphanumeric());
    if token.is_empty() {
        return false;
    }
    if token.chars().count() == 1 && token.chars().all(char::is_alphabetic) {
        return true;
    }
    let lower = token.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}
