//! Text to sign-language gesture translation
//!
//! Words are matched greedily against the sign dictionary, preferring the
//! longest multi-word phrase at each position. Anything left unmatched is
//! fingerspelled letter by letter.
//!
//! ```text
//! "hi what is your name"
//!   hi        -> no phrase -> fingerspell  [H, I]
//!   what is   -> WHAT_IS                   [WHAT]
//!   your      -> YOUR                      [YOU]
//!   name      -> NAME                      [NAME]
//! ```

mod dictionary;
mod fingerspell;
mod matcher;

use std::sync::Arc;

use serde::Serialize;

pub use dictionary::{GestureId, SignDictionary, SignEntry, gesture_id, normalize_name};
pub use fingerspell::{NG, fingerspell, graphemes};
pub use matcher::{DEFAULT_MAX_SPAN, PhraseMatch, match_longest, phrase_key};

/// One translated unit: the original word(s) and their gestures
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslatedWord {
    pub word: String,
    pub gestures: Vec<GestureId>,
}

/// Translation pipeline over a shared, immutable dictionary
#[derive(Debug, Clone)]
pub struct Translator {
    dictionary: Arc<SignDictionary>,
    max_span: usize,
}

impl Translator {
    /// Create a translator with the default phrase span
    #[must_use]
    pub const fn new(dictionary: Arc<SignDictionary>) -> Self {
        Self {
            dictionary,
            max_span: DEFAULT_MAX_SPAN,
        }
    }

    /// Override the longest phrase span tried (minimum 1)
    #[must_use]
    pub fn with_max_span(mut self, max_span: usize) -> Self {
        self.max_span = max_span.max(1);
        self
    }

    /// The underlying dictionary
    #[must_use]
    pub fn dictionary(&self) -> &SignDictionary {
        &self.dictionary
    }

    /// Longest phrase span tried
    #[must_use]
    pub const fn max_span(&self) -> usize {
        self.max_span
    }

    /// Translate text into an ordered sequence of gestures per word or phrase
    ///
    /// Empty or whitespace-only text yields an empty sequence.
    #[must_use]
    pub fn translate(&self, text: &str) -> Vec<TranslatedWord> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let mut out = Vec::with_capacity(words.len());

        let mut i = 0;
        while i < words.len() {
            if let Some(hit) = match_longest(&self.dictionary, &words, i, self.max_span) {
                out.push(TranslatedWord {
                    word: words[i..i + hit.span].join(" "),
                    gestures: hit.gestures.to_vec(),
                });
                i += hit.span;
            } else {
                out.push(TranslatedWord {
                    word: words[i].to_string(),
                    gestures: fingerspell(&self.dictionary, words[i]),
                });
                i += 1;
            }
        }

        tracing::debug!(words = words.len(), units = out.len(), "translated text");
        out
    }
}

/// Whether a character can be signed: A-Z or Ñ (either case)
#[must_use]
pub const fn is_sign_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, 'Ñ' | 'ñ')
}

/// Uppercased letters of a word, everything else removed
pub(crate) fn letters_of(word: &str) -> String {
    word.to_uppercase().chars().filter(|&c| is_sign_letter(c)).collect()
}
