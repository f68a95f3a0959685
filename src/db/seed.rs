//! Built-in seed vocabulary
//!
//! 26 Latin letters, the NG and Ñ graphemes, a fixed list of common words, and
//! phrase aliases that reuse existing gesture assets instead of new ones.

use crate::Result;
use crate::translate::{SignDictionary, SignEntry};

/// Directory prefix for gesture asset paths
pub const GESTURE_DIR: &str = "Gestures";

/// Fingerspelling alphabet
pub const LETTERS: [&str; 28] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z", "NG", "Ñ",
];

/// Common words and fixed phrases with their own gesture asset
pub const WORDS: &[&str] = &[
    "AGAIN",
    "DEAF",
    "DONT",
    "DRINK",
    "EAT",
    "FOOD",
    "FROM",
    "HARD_OF_HEARING",
    "HELLO",
    "HERE",
    "HOW_MUCH",
    "HUNGRY",
    "LIVE",
    "ME",
    "MEET",
    "NAME",
    "NICE",
    "NO",
    "SORRY",
    "THANK_YOU",
    "THEM",
    "UNDERSTAND",
    "WAIT",
    "WELCOME",
    "WHAT",
    "WHEN",
    "WHERE",
    "WHO",
    "WHY",
    "YES",
    "YOU",
];

/// Phrases signed with gestures that already exist
pub const PHRASE_ALIASES: &[(&str, &[&str])] = &[
    ("I_AM", &["ME"]),
    ("MY", &["ME"]),
    ("WHAT_IS", &["WHAT"]),
    ("WHATS", &["WHAT"]),
    ("YOUR", &["YOU"]),
];

/// Asset path for a gesture name
#[must_use]
pub fn gesture_path(gesture: &str) -> String {
    format!("{GESTURE_DIR}/{gesture}")
}

/// All seed signs in insertion order: letters, words, then aliases
#[must_use]
pub fn entries() -> Vec<SignEntry> {
    let own_asset = LETTERS
        .iter()
        .chain(WORDS)
        .map(|name| SignEntry::new(*name, vec![gesture_path(name)]));

    let aliases = PHRASE_ALIASES.iter().map(|(phrase, gestures)| {
        SignEntry::new(*phrase, gestures.iter().map(|g| gesture_path(g)).collect())
    });

    own_asset.chain(aliases).collect()
}

/// Build a dictionary straight from the seed list, without a database
///
/// # Errors
///
/// Returns error if the seed list contains duplicate names
pub fn dictionary() -> Result<SignDictionary> {
    SignDictionary::from_entries(entries())
}
