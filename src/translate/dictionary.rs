//! Read-only sign dictionary
//!
//! Maps normalized sign names (letters, graphemes, words and phrases) to the
//! ordered gesture identifiers rendered for them. Built once at startup and
//! shared behind an `Arc`; there is no mutation after construction.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use crate::{Error, Result};

/// Canonical gesture identifier (uppercased asset file stem)
pub type GestureId = String;

/// A sign together with the asset paths of the gestures it owns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignEntry {
    pub name: String,
    pub gesture_paths: Vec<String>,
}

impl SignEntry {
    /// Create a new entry
    #[must_use]
    pub fn new(name: impl Into<String>, gesture_paths: Vec<String>) -> Self {
        Self {
            name: name.into(),
            gesture_paths,
        }
    }
}

/// Immutable lookup table from normalized sign name to gestures
#[derive(Debug, Clone, Default)]
pub struct SignDictionary {
    signs: HashMap<String, Vec<GestureId>>,
    max_phrase_words: usize,
}

impl SignDictionary {
    /// Build a dictionary from seed entries
    ///
    /// # Errors
    ///
    /// Returns error if two names collide after normalization, a name is
    /// blank, or a sign owns no gestures
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = SignEntry>,
    {
        let mut signs = HashMap::new();
        let mut max_phrase_words = 0;

        for entry in entries {
            let key = normalize_name(&entry.name);
            if key.is_empty() {
                return Err(Error::Dictionary(format!(
                    "blank sign name: {:?}",
                    entry.name
                )));
            }
            if entry.gesture_paths.is_empty() {
                return Err(Error::Dictionary(format!("sign {key} has no gestures")));
            }

            let gestures: Vec<GestureId> =
                entry.gesture_paths.iter().map(|p| gesture_id(p)).collect();

            max_phrase_words = max_phrase_words.max(key.split('_').count());

            match signs.entry(key) {
                Entry::Occupied(existing) => {
                    return Err(Error::Dictionary(format!(
                        "duplicate sign: {}",
                        existing.key()
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(gestures);
                }
            }
        }

        tracing::debug!(signs = signs.len(), max_phrase_words, "sign dictionary built");

        Ok(Self {
            signs,
            max_phrase_words,
        })
    }

    /// Look up the gestures for a sign name
    ///
    /// Case-insensitive; spaces and underscores are interchangeable.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&[GestureId]> {
        self.signs.get(&normalize_name(name)).map(Vec::as_slice)
    }

    /// Whether a sign with this name exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Number of signs
    #[must_use]
    pub fn len(&self) -> usize {
        self.signs.len()
    }

    /// Whether the dictionary has no signs
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }

    /// Word count of the longest phrase in the dictionary
    #[must_use]
    pub const fn max_phrase_words(&self) -> usize {
        self.max_phrase_words
    }
}

/// Normalize a sign name for comparison
///
/// Trims, uppercases, and replaces every run of whitespace or underscores
/// with one `_`.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Derive the gesture identifier from an asset path
///
/// `Gestures/HELLO` and `gestures/hello.mp4` both yield `HELLO`.
#[must_use]
pub fn gesture_id(path: &str) -> GestureId {
    Path::new(path)
        .file_stem()
        .map_or_else(|| path.to_uppercase(), |stem| stem.to_string_lossy().to_uppercase())
}
