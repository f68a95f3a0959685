//! Speech recognition endpoint

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State},
};
use serde::Serialize;

use super::{ApiError, ApiState};
use crate::speech::{PCM_REQUIRED, WavAudio};

/// Transcription response
#[derive(Debug, Serialize)]
pub struct RecognizeResponse {
    pub transcript: String,
}

/// Transcribe an uploaded WAV file
///
/// The upload must be the multipart field `file`, a mono 16-bit PCM WAV.
pub async fn recognize(
    State(state): State<Arc<ApiState>>,
    mut multipart: Multipart,
) -> Result<Json<RecognizeResponse>, ApiError> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Rejected(e.status(), e.body_text()))?;
            upload = Some(bytes);
            break;
        }
    }

    let bytes = upload.ok_or_else(|| ApiError::BadRequest(PCM_REQUIRED.to_string()))?;
    let audio = WavAudio::parse(bytes.to_vec())?;

    let transcriber = state
        .transcriber
        .as_ref()
        .ok_or(ApiError::NotConfigured("speech recognition not configured"))?;

    tracing::debug!(
        backend = transcriber.name(),
        seconds = audio.duration().as_secs_f64(),
        "transcribing upload"
    );
    let transcript = transcriber.transcribe(&audio).await?;

    Ok(Json(RecognizeResponse { transcript }))
}
