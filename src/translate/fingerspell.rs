//! Letter-by-letter fallback for words outside the vocabulary

use super::dictionary::{GestureId, SignDictionary};
use super::is_sign_letter;

/// Two-letter grapheme signed as a single handshape
pub const NG: &str = "NG";

/// Split a word into fingerspelling units
///
/// Non-letters are skipped. "NG" is taken as one unit only when N is directly
/// followed by G in the word itself, so "n-g" stays two letters.
#[must_use]
pub fn graphemes(word: &str) -> Vec<String> {
    let chars: Vec<char> = word.to_uppercase().chars().collect();
    let mut units = Vec::with_capacity(chars.len());

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if !is_sign_letter(c) {
            i += 1;
        } else if c == 'N' && chars.get(i + 1) == Some(&'G') {
            units.push(NG.to_string());
            i += 2;
        } else {
            units.push(c.to_string());
            i += 1;
        }
    }

    units
}

/// Fingerspell a word into gestures
///
/// A unit with no gesture in the dictionary is emitted as its own text.
#[must_use]
pub fn fingerspell(dictionary: &SignDictionary, word: &str) -> Vec<GestureId> {
    let mut gestures = Vec::new();

    for unit in graphemes(word) {
        if let Some(found) = dictionary.lookup(&unit) {
            gestures.extend_from_slice(found);
        } else {
            tracing::warn!(unit = %unit, word, "no gesture for letter, emitting placeholder");
            gestures.push(unit);
        }
    }

    gestures
}
