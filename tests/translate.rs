//! Translation properties over the built-in vocabulary, loaded through the
//! sign database

use std::sync::Arc;

use sign_gateway::db::{self, SignRepo, seed};
use sign_gateway::translate::{graphemes, normalize_name};
use sign_gateway::{SignDictionary, Translator};

mod common;

/// Seed an on-disk database, reopen it and load the dictionary
fn stored_dictionary() -> SignDictionary {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("signs.db");

    {
        let pool = db::init(&path).unwrap();
        SignRepo::new(pool).seed(&seed::entries(), false).unwrap();
    }

    let pool = db::init(&path).unwrap();
    SignRepo::new(pool).load_dictionary().unwrap()
}

fn translator() -> Translator {
    Translator::new(Arc::new(stored_dictionary()))
}

/// Seeded names that are a single spoken word
fn single_word_names() -> Vec<String> {
    seed::entries()
        .into_iter()
        .map(|e| normalize_name(&e.name))
        .filter(|name| !name.contains('_'))
        .collect()
}

#[test]
fn test_known_words_translate_to_their_lookup() {
    let t = translator();

    for name in single_word_names() {
        let spoken = name.to_lowercase();
        let result = t.translate(&spoken);

        assert_eq!(result.len(), 1, "{spoken} should be one unit");
        assert_eq!(result[0].word, spoken);
        assert_eq!(
            Some(result[0].gestures.as_slice()),
            t.dictionary().lookup(&name),
            "{spoken} should sign as its own entry"
        );
    }
}

#[test]
fn test_unknown_words_are_fingerspelled_per_grapheme() {
    let t = translator();

    for word in ["xyz", "Ana", "kangaroo", "sing", "Peña", "angle"] {
        assert!(!t.dictionary().contains(word), "{word} must not be seeded");

        let result = t.translate(word);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].gestures.len(), graphemes(word).len(), "{word}");
        for (gesture, unit) in result[0].gestures.iter().zip(graphemes(word)) {
            assert_eq!(
                Some(std::slice::from_ref(gesture)),
                t.dictionary().lookup(&unit),
                "{word}: {unit}"
            );
        }
    }

    let kangaroo = &t.translate("kangaroo")[0].gestures;
    assert_eq!(kangaroo, &["K", "A", "NG", "A", "R", "O", "O"]);
}

#[test]
fn test_longest_phrase_wins() {
    let t = translator();

    let result = t.translate("what is");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].word, "what is");
    assert_eq!(result[0].gestures, ["WHAT"]);

    let result = t.translate("Thank you hard of hearing");
    let words: Vec<&str> = result.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, ["Thank you", "hard of hearing"]);
    assert_eq!(result[1].gestures, ["HARD_OF_HEARING"]);
}

#[test]
fn test_lookup_normalization() {
    let dict = stored_dictionary();

    assert_eq!(dict.lookup("hello"), dict.lookup("HELLO"));
    assert_eq!(dict.lookup("Hello"), dict.lookup("HELLO"));
    assert_eq!(dict.lookup("thank you"), dict.lookup("THANK_YOU"));
    assert!(dict.lookup("hello").is_some());
}

#[test]
fn test_sing_uses_ng_grapheme() {
    let t = translator();
    assert_eq!(t.translate("SING")[0].gestures, ["S", "I", "NG"]);
}

#[test]
fn test_empty_and_blank_input() {
    let t = translator();
    assert!(t.translate("").is_empty());
    assert!(t.translate("   \t\n").is_empty());
}

#[test]
fn test_missing_letter_degrades_to_placeholder() {
    // Only "A" is available; "B" must come back as its literal letter
    let dict = SignDictionary::from_entries([sign_gateway::translate::SignEntry::new(
        "A",
        vec![seed::gesture_path("A")],
    )])
    .unwrap();
    let t = Translator::new(Arc::new(dict));

    assert_eq!(t.translate("ab")[0].gestures, ["A", "B"]);
}

#[test]
fn test_reset_recreates_same_dictionary() {
    let pool = common::setup_seeded_db();
    let repo = SignRepo::new(pool);

    let before = repo.load_entries().unwrap();
    assert_eq!(repo.seed(&seed::entries(), false).unwrap(), 0);
    assert_eq!(repo.seed(&seed::entries(), true).unwrap(), before.len());

    let after = repo.load_entries().unwrap();
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.name, a.name);
        assert_eq!(b.gesture_paths, a.gesture_paths);
    }
}
