//! WAV upload validation

use std::io::Cursor;
use std::time::Duration;

use crate::{Error, Result};

/// Message returned for uploads that are not mono 16-bit PCM WAV
pub const PCM_REQUIRED: &str = "Audio must be WAV PCM mono";

/// A validated mono, 16-bit integer PCM WAV file
#[derive(Debug, Clone)]
pub struct WavAudio {
    bytes: Vec<u8>,
    sample_rate: u32,
    frames: u32,
}

impl WavAudio {
    /// Validate raw upload bytes
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidAudio` unless the bytes are a RIFF/WAVE file
    /// with one channel of 16-bit integer samples
    pub fn parse(bytes: Vec<u8>) -> Result<Self> {
        let (spec, frames) = {
            let reader = hound::WavReader::new(Cursor::new(bytes.as_slice())).map_err(|e| {
                tracing::debug!(error = %e, "rejecting non-WAV upload");
                Error::InvalidAudio(PCM_REQUIRED.to_string())
            })?;
            (reader.spec(), reader.duration())
        };

        if spec.channels != 1
            || spec.bits_per_sample != 16
            || spec.sample_format != hound::SampleFormat::Int
        {
            tracing::debug!(
                channels = spec.channels,
                bits = spec.bits_per_sample,
                format = ?spec.sample_format,
                "rejecting WAV upload"
            );
            return Err(Error::InvalidAudio(PCM_REQUIRED.to_string()));
        }

        Ok(Self {
            bytes,
            sample_rate: spec.sample_rate,
            frames,
        })
    }

    /// The original file bytes
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Sample rate in Hz
    #[must_use]
    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Playback duration
    #[must_use]
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(f64::from(self.frames) / f64::from(self.sample_rate))
    }
}
