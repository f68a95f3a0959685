//! Grammar normalization of transcripts
//!
//! A [`TextNormalizer`] rewrites raw speech transcripts into short, plain
//! sentences; [`correct`] wraps it with the blank-input shortcut and the final
//! character clean-up.

mod chat;

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::Result;

pub use chat::{ChatNormalizer, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Anything other than ASCII letters, digits, whitespace and Ñ/ñ
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\sÑñ]").expect("valid regex"));

/// Rewrites raw text into corrected text
#[async_trait]
pub trait TextNormalizer: Send + Sync {
    /// Short backend name for logs and readiness checks
    fn name(&self) -> &'static str;

    /// Correct grammar and spelling
    ///
    /// # Errors
    ///
    /// Returns error if the backend fails
    async fn normalize(&self, text: &str) -> Result<String>;
}

/// Correct a transcript for translation
///
/// Blank input returns an empty string without calling the normalizer.
///
/// # Errors
///
/// Returns error if the normalizer fails
pub async fn correct(normalizer: &dyn TextNormalizer, text: &str) -> Result<String> {
    if text.trim().is_empty() {
        return Ok(String::new());
    }

    let corrected = normalizer.normalize(text).await?;
    let cleaned = clean_text(&corrected);

    tracing::debug!(input = %text, output = %cleaned, "grammar corrected");
    Ok(cleaned)
}

/// Strip punctuation and symbols, keeping letters, digits, whitespace and Ñ/ñ
#[must_use]
pub fn clean_text(text: &str) -> String {
    DISALLOWED.replace_all(text, "").trim().to_string()
}
