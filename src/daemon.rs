//! Daemon - the main gateway service
//!
//! Opens the sign database, seeds it on first run, loads the dictionary into
//! memory and wires the optional speech and grammar backends into the API.

use std::sync::Arc;

use crate::api::ApiServerBuilder;
use crate::config::{GrammarConfig, SpeechConfig};
use crate::db::{self, DbPool, SignRepo};
use crate::grammar::{ChatNormalizer, TextNormalizer};
use crate::speech::{SpeechToText, Transcriber};
use crate::translate::Translator;
use crate::{Config, Result};

/// The sign gateway daemon
pub struct Daemon {
    config: Config,
    db: DbPool,
    translator: Translator,
    transcriber: Option<Arc<dyn Transcriber>>,
    normalizer: Option<Arc<dyn TextNormalizer>>,
}

impl Daemon {
    /// Create a new daemon instance
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened, seeded or loaded, or a
    /// configured backend is invalid
    pub fn new(config: Config) -> Result<Self> {
        let db = db::init(&config.dictionary.database)?;
        tracing::info!(path = %config.dictionary.database.display(), "database initialized");

        let translator = load_translator(&db, &config)?;
        let transcriber = build_transcriber(&config.speech)?;
        let normalizer = build_normalizer(&config.grammar)?;

        Ok(Self {
            config,
            db,
            translator,
            transcriber,
            normalizer,
        })
    }

    /// Run the HTTP API until shutdown
    ///
    /// # Errors
    ///
    /// Returns error if the server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let server = &self.config.server;

        let mut builder = ApiServerBuilder::new(self.translator)
            .db(self.db)
            .bind(server.host.clone(), server.port)
            .rate_limit(server.rate_limit_per_minute)
            .assets_dir(server.assets_dir.clone())
            .max_upload_bytes(server.max_upload_bytes);

        if let Some(transcriber) = self.transcriber {
            builder = builder.transcriber(transcriber);
        } else {
            tracing::warn!("speech recognition disabled - no API key configured");
        }

        if let Some(normalizer) = self.normalizer {
            builder = builder.normalizer(normalizer);
        } else {
            tracing::warn!("grammar correction disabled - no API key configured");
        }

        builder.build().run().await?;

        tracing::info!("daemon stopped");
        Ok(())
    }
}

/// Seed an empty database if allowed, then load the dictionary
///
/// # Errors
///
/// Returns error if seeding or loading fails, or the stored data is invalid
pub fn load_translator(db: &DbPool, config: &Config) -> Result<Translator> {
    let repo = SignRepo::new(db.clone());

    if config.dictionary.seed_if_empty {
        let inserted = repo.seed(&db::seed::entries(), false)?;
        if inserted > 0 {
            tracing::info!(signs = inserted, "seeded built-in vocabulary");
        }
    }

    let dictionary = repo.load_dictionary()?;
    if dictionary.is_empty() {
        tracing::warn!("sign dictionary is empty - every word will be fingerspelled");
    }
    tracing::info!(
        signs = dictionary.len(),
        max_phrase_words = dictionary.max_phrase_words(),
        max_span = config.dictionary.max_span,
        "sign dictionary loaded"
    );

    Ok(Translator::new(Arc::new(dictionary)).with_max_span(config.dictionary.max_span))
}

/// Build the speech backend if an API key is configured
///
/// # Errors
///
/// Returns error if the backend rejects its configuration
pub fn build_transcriber(config: &SpeechConfig) -> Result<Option<Arc<dyn Transcriber>>> {
    let Some(key) = &config.api_key else {
        return Ok(None);
    };

    let mut stt = SpeechToText::new(config.provider, key.clone(), config.model.clone())?
        .with_language(config.language.clone());
    if let Some(url) = &config.base_url {
        stt = stt.with_base_url(url.clone());
    }

    tracing::info!(provider = %config.provider, model = %config.model, "speech recognition enabled");
    Ok(Some(Arc::new(stt)))
}

/// Build the grammar backend if an API key is configured
///
/// # Errors
///
/// Returns error if the backend rejects its configuration
pub fn build_normalizer(config: &GrammarConfig) -> Result<Option<Arc<dyn TextNormalizer>>> {
    let Some(key) = &config.api_key else {
        return Ok(None);
    };

    let mut chat = ChatNormalizer::new(key.clone(), config.model.clone())?
        .with_max_tokens(config.max_tokens);
    if let Some(url) = &config.base_url {
        chat = chat.with_base_url(url.clone());
    }

    tracing::info!(model = %config.model, "grammar correction enabled");
    Ok(Some(Arc::new(chat)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file::SignConfigFile;

    fn config_with(pairs: &[(&str, &str)]) -> Config {
        let map: std::collections::HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_sources(SignConfigFile::default(), move |key| map.get(key).cloned()).unwrap()
    }

    #[test]
    fn test_backends_absent_without_keys() {
        let config = config_with(&[]);
        assert!(build_transcriber(&config.speech).unwrap().is_none());
        assert!(build_normalizer(&config.grammar).unwrap().is_none());
    }

    #[test]
    fn test_backends_built_from_keys() {
        let config = config_with(&[("OPENAI_API_KEY", "sk-test")]);
        let stt = build_transcriber(&config.speech).unwrap().unwrap();
        assert_eq!(stt.name(), "whisper");
        assert!(build_normalizer(&config.grammar).unwrap().is_some());
    }

    #[test]
    fn test_load_translator_seeds_empty_database() {
        let pool = db::init_memory().unwrap();
        let config = config_with(&[]);

        let translator = load_translator(&pool, &config).unwrap();
        assert_eq!(translator.dictionary().len(), db::seed::entries().len());

        // Second load finds the rows already present
        let again = load_translator(&pool, &config).unwrap();
        assert_eq!(again.dictionary().len(), translator.dictionary().len());
    }

    #[test]
    fn test_daemon_opens_on_disk_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("signs.db");
        let config = config_with(&[("SIGNGW_DB", db_path.to_str().unwrap())]);

        let daemon = Daemon::new(config).unwrap();
        assert!(db_path.exists());
        assert!(!daemon.translator.dictionary().is_empty());
    }
}
