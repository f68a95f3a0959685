//! Text-to-gesture translation endpoint

use std::sync::Arc;

use axum::{
    Form, Json,
    extract::{State, rejection::FormRejection},
};
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiState};
use crate::translate::TranslatedWord;

/// Translation form body
#[derive(Debug, Deserialize)]
pub struct TranslateForm {
    pub text: String,
}

/// Translation response
#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translation: Vec<TranslatedWord>,
}

/// Translate text into sign gestures
pub async fn translate(
    State(state): State<Arc<ApiState>>,
    form: Result<Form<TranslateForm>, FormRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Form(form) = form?;
    let translation = state.translator.translate(&form.text);
    Ok(Json(TranslateResponse { translation }))
}
