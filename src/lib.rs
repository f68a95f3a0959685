//! Sign Gateway - speech and text to sign language gestures
//!
//! This library provides the core functionality for the sign gateway:
//! - Text-to-gesture translation (greedy phrase matching, fingerspelling)
//! - Sign dictionary storage and seeding
//! - Speech-to-text for uploaded WAV audio
//! - Grammar normalization of transcripts
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                     HTTP API                         │
//! │  /recognize/  │  /grammar/  │  /translate/  │ /ready │
//! └───────┬──────────────┬──────────────┬───────────────┘
//!         │              │              │
//! ┌───────▼─────┐ ┌──────▼──────┐ ┌─────▼───────────────┐
//! │ Transcriber │ │ Normalizer  │ │ Translator          │
//! │ (STT API)   │ │ (chat API)  │ │ Arc<SignDictionary> │
//! └─────────────┘ └─────────────┘ └─────▲───────────────┘
//!                                       │ loaded once
//!                                 ┌─────┴──────┐
//!                                 │ SQLite     │
//!                                 └────────────┘
//! ```

pub mod api;
pub mod config;
pub mod daemon;
pub mod db;
pub mod error;
pub mod grammar;
pub mod speech;
pub mod translate;

pub use config::Config;
pub use daemon::Daemon;
pub use db::{DbConn, DbPool};
pub use error::{Error, Result};
pub use translate::{SignDictionary, TranslatedWord, Translator};
