//! Speech recognition
//!
//! Uploads are validated locally (WAV, PCM, mono, 16-bit) and then handed to a
//! [`Transcriber`]. The bundled implementation calls a hosted STT API.

mod audio;
mod stt;

use async_trait::async_trait;

use crate::Result;

pub use audio::{PCM_REQUIRED, WavAudio};
pub use stt::{SpeechToText, SttProvider};

/// Converts validated audio into text
#[async_trait]
pub trait Transcriber: Send + Sync {
    /// Short backend name for logs and readiness checks
    fn name(&self) -> &'static str;

    /// Transcribe audio to text
    ///
    /// # Errors
    ///
    /// Returns error if the backend fails
    async fn transcribe(&self, audio: &WavAudio) -> Result<String>;
}
