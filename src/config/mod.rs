//! Configuration management for the sign gateway
//!
//! Precedence is env > TOML file > defaults.

pub mod file;

use std::path::{Path, PathBuf};

use secrecy::SecretString;

use crate::speech::SttProvider;
use crate::translate::DEFAULT_MAX_SPAN;
use crate::{Result, grammar};

/// Default API server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default cap on uploaded audio (matches the hosted Whisper limit)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Sign gateway configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to data directory (database)
    pub data_dir: PathBuf,

    /// HTTP API server configuration
    pub server: ServerConfig,

    /// Sign dictionary configuration
    pub dictionary: DictionaryConfig,

    /// Speech-to-text configuration
    pub speech: SpeechConfig,

    /// Grammar correction configuration
    pub grammar: GrammarConfig,
}

/// HTTP API server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Global requests-per-minute limit; `None` disables rate limiting
    pub rate_limit_per_minute: Option<u32>,

    /// Directory of gesture assets served under `/gestures`
    pub assets_dir: Option<PathBuf>,

    /// Largest accepted audio upload in bytes
    pub max_upload_bytes: usize,
}

/// Sign dictionary configuration
#[derive(Debug, Clone)]
pub struct DictionaryConfig {
    /// Path to the `SQLite` sign database
    pub database: PathBuf,

    /// Longest multi-word phrase tried by the matcher
    pub max_span: usize,

    /// Seed the built-in vocabulary when the database is empty
    pub seed_if_empty: bool,
}

/// Speech-to-text configuration
#[derive(Debug, Clone)]
pub struct SpeechConfig {
    /// STT backend
    pub provider: SttProvider,

    /// Model identifier
    pub model: String,

    /// API base URL override
    pub base_url: Option<String>,

    /// Spoken language hint
    pub language: Option<String>,

    /// API key for the provider (`OPENAI_API_KEY` or `DEEPGRAM_API_KEY`)
    pub api_key: Option<SecretString>,
}

/// Grammar correction configuration
#[derive(Debug, Clone)]
pub struct GrammarConfig {
    /// Chat model identifier
    pub model: String,

    /// API base URL override
    pub base_url: Option<String>,

    /// Max tokens for the corrected sentence
    pub max_tokens: u32,

    /// API key (`SIGNGW_GRAMMAR_API_KEY`, falling back to `OPENAI_API_KEY`)
    pub api_key: Option<SecretString>,
}

/// Default data directory: `~/.local/share/sign-gateway` on Linux
fn default_data_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".local/share/sign-gateway"),
        |d| d.data_dir().join("sign-gateway"),
    )
}

impl Config {
    /// Load configuration from the environment and the config file
    ///
    /// # Errors
    ///
    /// Returns error if an explicit config file cannot be loaded or a value is
    /// invalid
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let fc = file::load_config_file(config_path)?;
        Self::from_sources(fc, |key| std::env::var(key).ok())
    }

    /// Build configuration from a parsed file and an environment lookup
    ///
    /// # Errors
    ///
    /// Returns error if a value is invalid
    pub fn from_sources<F>(fc: file::SignConfigFile, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = env("SIGNGW_DATA_DIR")
            .or(fc.data_dir)
            .map_or_else(default_data_dir, PathBuf::from);

        // Server (env > toml > default)
        let server = ServerConfig {
            host: env("SIGNGW_HOST")
                .or(fc.server.host)
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: env("SIGNGW_PORT")
                .or_else(|| env("PORT"))
                .and_then(|s| s.parse().ok())
                .or(fc.server.port)
                .unwrap_or(DEFAULT_PORT),
            rate_limit_per_minute: env("SIGNGW_RATE_LIMIT")
                .and_then(|s| s.parse().ok())
                .or(fc.server.rate_limit_per_minute)
                .filter(|rpm| *rpm > 0),
            assets_dir: env("SIGNGW_ASSETS_DIR")
                .or(fc.server.assets_dir)
                .map(PathBuf::from),
            max_upload_bytes: env("SIGNGW_MAX_UPLOAD_BYTES")
                .and_then(|s| s.parse().ok())
                .or(fc.server.max_upload_bytes)
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        };

        // Dictionary (env > toml > default)
        let dictionary = DictionaryConfig {
            database: env("SIGNGW_DB")
                .or(fc.dictionary.database)
                .map_or_else(|| data_dir.join("signs.db"), PathBuf::from),
            max_span: env("SIGNGW_MAX_SPAN")
                .and_then(|s| s.parse().ok())
                .or(fc.dictionary.max_span)
                .unwrap_or(DEFAULT_MAX_SPAN)
                .max(1),
            seed_if_empty: fc.dictionary.seed_if_empty.unwrap_or(true),
        };

        // Speech (env > toml > default)
        let provider: SttProvider = env("SIGNGW_STT_PROVIDER")
            .or(fc.speech.provider)
            .map(|s| s.parse())
            .transpose()?
            .unwrap_or_default();
        let openai_key = env("OPENAI_API_KEY").or(fc.api_keys.openai);
        let speech_key = match provider {
            SttProvider::Whisper => openai_key.clone(),
            SttProvider::Deepgram => env("DEEPGRAM_API_KEY").or(fc.api_keys.deepgram),
        };
        let speech = SpeechConfig {
            provider,
            model: env("SIGNGW_STT_MODEL")
                .or(fc.speech.model)
                .unwrap_or_else(|| provider.default_model().to_string()),
            base_url: env("SIGNGW_STT_URL").or(fc.speech.base_url),
            language: env("SIGNGW_STT_LANGUAGE").or(fc.speech.language),
            api_key: speech_key.filter(|k| !k.is_empty()).map(SecretString::from),
        };

        // Grammar (env > toml > default)
        let grammar = GrammarConfig {
            model: env("SIGNGW_GRAMMAR_MODEL")
                .or(fc.grammar.model)
                .unwrap_or_else(|| grammar::DEFAULT_MODEL.to_string()),
            base_url: env("SIGNGW_GRAMMAR_URL").or(fc.grammar.base_url),
            max_tokens: fc.grammar.max_tokens.unwrap_or(50),
            api_key: env("SIGNGW_GRAMMAR_API_KEY")
                .or(openai_key)
                .filter(|k| !k.is_empty())
                .map(SecretString::from),
        };

        Ok(Self {
            data_dir,
            server,
            dictionary,
            speech,
            grammar,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;
    use crate::Error;

    fn key(secret: Option<&SecretString>) -> Option<&str> {
        secret.map(ExposeSecret::expose_secret)
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_sources(file::SignConfigFile::default(), env_of(&[])).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert!(config.server.rate_limit_per_minute.is_none());
        assert_eq!(config.server.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
        assert_eq!(config.dictionary.max_span, DEFAULT_MAX_SPAN);
        assert!(config.dictionary.seed_if_empty);
        assert_eq!(config.dictionary.database, config.data_dir.join("signs.db"));
        assert_eq!(config.speech.provider, SttProvider::Whisper);
        assert_eq!(config.speech.model, "whisper-1");
        assert!(config.speech.api_key.is_none());
        assert!(config.grammar.api_key.is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let fc = file::parse(
            r#"
            data_dir = "/srv/signs"

            [server]
            port = 9000
            rate_limit_per_minute = 60

            [dictionary]
            max_span = 2
            "#,
        )
        .unwrap();

        let config = Config::from_sources(
            fc,
            env_of(&[("SIGNGW_PORT", "9100"), ("OPENAI_API_KEY", "sk-test")]),
        )
        .unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.rate_limit_per_minute, Some(60));
        assert_eq!(config.dictionary.max_span, 2);
        assert_eq!(config.dictionary.database, PathBuf::from("/srv/signs/signs.db"));
        assert_eq!(key(config.speech.api_key.as_ref()), Some("sk-test"));
        assert_eq!(key(config.grammar.api_key.as_ref()), Some("sk-test"));
    }

    #[test]
    fn test_deepgram_uses_its_own_key() {
        let config = Config::from_sources(
            file::SignConfigFile::default(),
            env_of(&[
                ("SIGNGW_STT_PROVIDER", "deepgram"),
                ("OPENAI_API_KEY", "sk-openai"),
                ("DEEPGRAM_API_KEY", "dg-key"),
            ]),
        )
        .unwrap();

        assert_eq!(config.speech.provider, SttProvider::Deepgram);
        assert_eq!(config.speech.model, "nova-2");
        assert_eq!(key(config.speech.api_key.as_ref()), Some("dg-key"));
        assert_eq!(key(config.grammar.api_key.as_ref()), Some("sk-openai"));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let result = Config::from_sources(
            file::SignConfigFile::default(),
            env_of(&[("SIGNGW_STT_PROVIDER", "vosk")]),
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_values_clamped() {
        let config = Config::from_sources(
            file::SignConfigFile::default(),
            env_of(&[("SIGNGW_MAX_SPAN", "0"), ("SIGNGW_RATE_LIMIT", "0")]),
        )
        .unwrap();

        assert_eq!(config.dictionary.max_span, 1);
        assert!(config.server.rate_limit_per_minute.is_none());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = Config::from_sources(
            file::SignConfigFile::default(),
            env_of(&[("OPENAI_API_KEY", "sk-secret")]),
        )
        .unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("REDACTED"));
    }
}
