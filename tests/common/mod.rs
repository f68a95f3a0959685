//! Shared test utilities

#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sign_gateway::api::{ApiServer, ApiServerBuilder};
use sign_gateway::grammar::TextNormalizer;
use sign_gateway::speech::{Transcriber, WavAudio};
use sign_gateway::{DbPool, Error, Result, Translator, db};

/// Multipart boundary used by [`multipart_body`]
pub const BOUNDARY: &str = "signgw-test-boundary";

/// Set up an in-memory test database holding the built-in vocabulary
#[must_use]
pub fn setup_seeded_db() -> DbPool {
    let pool = db::init_memory().expect("failed to init test db");
    db::SignRepo::new(pool.clone())
        .seed(&db::seed::entries(), false)
        .expect("failed to seed test db");
    pool
}

/// Translator over the built-in vocabulary
#[must_use]
pub fn seeded_translator() -> Translator {
    let dictionary = db::seed::dictionary().expect("built-in vocabulary is valid");
    Translator::new(Arc::new(dictionary))
}

/// Server with the built-in vocabulary and no optional backends
#[must_use]
pub fn builder() -> ApiServerBuilder {
    ApiServerBuilder::new(seeded_translator())
}

/// Server with both mock backends attached
#[must_use]
pub fn full_server(transcript: &str) -> ApiServer {
    builder()
        .db(setup_seeded_db())
        .transcriber(Arc::new(MockTranscriber::new(transcript)))
        .normalizer(Arc::new(UppercaseNormalizer::default()))
        .build()
}

/// Encode samples as an in-memory WAV file
#[must_use]
pub fn wav_bytes(channels: u16, bits_per_sample: u16, samples: usize) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate: 16_000,
        bits_per_sample,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("wav writer");
        for i in 0..samples * usize::from(channels) {
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let sample = (i % 64) as i8;
            if bits_per_sample == 8 {
                writer.write_sample(sample).expect("write sample");
            } else {
                writer.write_sample(i16::from(sample) * 100).expect("write sample");
            }
        }
        writer.finalize().expect("finalize wav");
    }
    cursor.into_inner()
}

/// One second of mono 16-bit silence-ish audio
#[must_use]
pub fn mono_wav() -> Vec<u8> {
    wav_bytes(1, 16, 16_000)
}

/// Build a `multipart/form-data` body with a single file field
#[must_use]
pub fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: audio/wav\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Transcriber returning a fixed transcript
pub struct MockTranscriber {
    transcript: String,
    pub calls: AtomicUsize,
}

impl MockTranscriber {
    #[must_use]
    pub fn new(transcript: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn transcribe(&self, _audio: &WavAudio) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.transcript.clone())
    }
}

/// Transcriber that always fails
pub struct FailingTranscriber;

#[async_trait]
impl Transcriber for FailingTranscriber {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn transcribe(&self, _audio: &WavAudio) -> Result<String> {
        Err(Error::Stt("upstream unavailable".to_string()))
    }
}

/// Normalizer that uppercases and appends punctuation for the clean-up to strip
#[derive(Default)]
pub struct UppercaseNormalizer {
    pub calls: AtomicUsize,
}

#[async_trait]
impl TextNormalizer for UppercaseNormalizer {
    fn name(&self) -> &'static str {
        "uppercase"
    }

    async fn normalize(&self, text: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("{}.", text.to_uppercase()))
    }
}
