//! TOML configuration file loading
//!
//! Supports `~/.config/sign-gateway/config.toml` (or `--config <path>`) as a
//! persistent config source. All fields are optional; the file is a partial
//! overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result};

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize)]
pub struct SignConfigFile {
    /// Directory for the sign database
    #[serde(default)]
    pub data_dir: Option<String>,

    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerFileConfig,

    /// Sign dictionary configuration
    #[serde(default)]
    pub dictionary: DictionaryFileConfig,

    /// Speech-to-text configuration
    #[serde(default)]
    pub speech: SpeechFileConfig,

    /// Grammar correction configuration
    #[serde(default)]
    pub grammar: GrammarFileConfig,

    /// API keys for external services
    #[serde(default)]
    pub api_keys: ApiKeysFileConfig,
}

/// HTTP server configuration
#[derive(Debug, Default, Deserialize)]
pub struct ServerFileConfig {
    /// Bind address
    pub host: Option<String>,

    /// API server port
    pub port: Option<u16>,

    /// Requests per minute across all clients (unset = unlimited)
    pub rate_limit_per_minute: Option<u32>,

    /// Directory of gesture assets served under `/gestures`
    pub assets_dir: Option<String>,

    /// Largest accepted audio upload in bytes
    pub max_upload_bytes: Option<usize>,
}

/// Sign dictionary configuration
#[derive(Debug, Default, Deserialize)]
pub struct DictionaryFileConfig {
    /// Path to the `SQLite` sign database
    pub database: Option<String>,

    /// Longest multi-word phrase tried by the matcher
    pub max_span: Option<usize>,

    /// Seed the built-in vocabulary into an empty database
    pub seed_if_empty: Option<bool>,
}

/// Speech-to-text configuration
#[derive(Debug, Default, Deserialize)]
pub struct SpeechFileConfig {
    /// "whisper" or "deepgram"
    pub provider: Option<String>,

    /// Model identifier (e.g. "whisper-1")
    pub model: Option<String>,

    /// API base URL override
    pub base_url: Option<String>,

    /// Spoken language hint (e.g. "en")
    pub language: Option<String>,
}

/// Grammar correction configuration
#[derive(Debug, Default, Deserialize)]
pub struct GrammarFileConfig {
    /// Chat model identifier
    pub model: Option<String>,

    /// API base URL override
    pub base_url: Option<String>,

    /// Max tokens for the corrected sentence
    pub max_tokens: Option<u32>,
}

/// API keys configuration
#[derive(Debug, Default, Deserialize)]
pub struct ApiKeysFileConfig {
    pub openai: Option<String>,
    pub deepgram: Option<String>,
}

/// Load the TOML config file
///
/// With an explicit path, a missing or malformed file is an error. Otherwise
/// the standard path is tried and `SignConfigFile::default()` is returned if
/// it doesn't exist or can't be parsed.
///
/// # Errors
///
/// Returns error if an explicitly requested file cannot be read or parsed
pub fn load_config_file(explicit: Option<&Path>) -> Result<SignConfigFile> {
    if let Some(path) = explicit {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config = parse(&content)?;
        tracing::info!(path = %path.display(), "loaded config file");
        return Ok(config);
    }

    let Some(path) = config_file_path() else {
        return Ok(SignConfigFile::default());
    };

    if !path.exists() {
        return Ok(SignConfigFile::default());
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match parse(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                Ok(config)
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                Ok(SignConfigFile::default())
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            Ok(SignConfigFile::default())
        }
    }
}

/// Parse config file contents
///
/// # Errors
///
/// Returns error if the TOML is malformed
pub fn parse(content: &str) -> Result<SignConfigFile> {
    Ok(toml::from_str(content)?)
}

/// Return the config file path: `~/.config/sign-gateway/config.toml`
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("sign-gateway").join("config.toml"))
}
