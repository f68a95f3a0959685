//! Greedy longest-phrase matching

use super::dictionary::{GestureId, SignDictionary};
use super::letters_of;

/// Longest phrase span tried by default
pub const DEFAULT_MAX_SPAN: usize = 3;

/// A dictionary hit covering `span` consecutive words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch<'a> {
    pub span: usize,
    pub gestures: &'a [GestureId],
}

/// Find the longest phrase starting at `start`
///
/// Tries spans from `max_span` (bounded by the words left) down to one word;
/// the first span present in the dictionary wins.
#[must_use]
pub fn match_longest<'d, S: AsRef<str>>(
    dictionary: &'d SignDictionary,
    words: &[S],
    start: usize,
    max_span: usize,
) -> Option<PhraseMatch<'d>> {
    let remaining = words.len().checked_sub(start)?;
    let longest = max_span.min(remaining);

    (1..=longest).rev().find_map(|span| {
        let key = phrase_key(&words[start..start + span])?;
        dictionary
            .lookup(&key)
            .map(|gestures| PhraseMatch { span, gestures })
    })
}

/// Build the dictionary key for a run of words
///
/// Each word keeps only its letters (A-Z and Ñ), uppercased; words are joined
/// with `_`. Returns `None` when any word has no letters left.
#[must_use]
pub fn phrase_key<S: AsRef<str>>(words: &[S]) -> Option<String> {
    let mut parts = Vec::with_capacity(words.len());
    for word in words {
        let letters = letters_of(word.as_ref());
        if letters.is_empty() {
            return None;
        }
        parts.push(letters);
    }
    Some(parts.join("_"))
}
