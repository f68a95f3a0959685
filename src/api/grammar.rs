//! Grammar correction endpoint

use std::sync::Arc;

use axum::{
    Form,
    extract::{State, rejection::FormRejection},
};
use serde::Deserialize;

use super::{ApiError, ApiState};
use crate::grammar;

/// Grammar form body
#[derive(Debug, Deserialize)]
pub struct GrammarForm {
    pub text: String,
}

/// Correct a transcript, returning plain text
pub async fn correct(
    State(state): State<Arc<ApiState>>,
    form: Result<Form<GrammarForm>, FormRejection>,
) -> Result<String, ApiError> {
    let Form(form) = form?;
    if form.text.trim().is_empty() {
        return Ok(String::new());
    }

    let normalizer = state
        .normalizer
        .as_ref()
        .ok_or(ApiError::NotConfigured("grammar correction not configured"))?;

    Ok(grammar::correct(normalizer.as_ref(), &form.text).await?)
}
