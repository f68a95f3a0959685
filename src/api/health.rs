//! Health check endpoints

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use super::ApiState;
use crate::db;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Detailed readiness response
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub checks: ReadinessChecks,
}

/// Individual readiness checks
#[derive(Serialize)]
pub struct ReadinessChecks {
    pub dictionary: CheckResult,
    pub database: CheckResult,
    pub speech: CheckResult,
    pub grammar: CheckResult,
}

/// Result of a single health check
#[derive(Serialize)]
pub struct CheckResult {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckResult {
    const fn ok() -> Self {
        Self {
            status: "ok",
            message: None,
        }
    }

    fn fail(message: impl Into<String>) -> Self {
        Self {
            status: "fail",
            message: Some(message.into()),
        }
    }

    fn unavailable() -> Self {
        Self {
            status: "unavailable",
            message: Some("not configured".to_string()),
        }
    }

    fn is_ok_or_unavailable(&self) -> bool {
        self.status != "fail"
    }
}

/// Liveness check - is the service running?
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness check - is the service ready to accept traffic?
async fn ready(State(state): State<Arc<ApiState>>) -> (StatusCode, Json<ReadinessResponse>) {
    let checks = ReadinessChecks {
        dictionary: check_dictionary(&state),
        database: check_database(&state),
        speech: state
            .transcriber
            .as_ref()
            .map_or_else(CheckResult::unavailable, |_| CheckResult::ok()),
        grammar: state
            .normalizer
            .as_ref()
            .map_or_else(CheckResult::unavailable, |_| CheckResult::ok()),
    };

    // Optional backends never degrade readiness; the dictionary must be loaded
    let all_ok = checks.dictionary.status == "ok" && checks.database.is_ok_or_unavailable();

    let (status, http_status) = if all_ok {
        ("ok", StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    (http_status, Json(ReadinessResponse { status, checks }))
}

fn check_dictionary(state: &ApiState) -> CheckResult {
    if state.translator.dictionary().is_empty() {
        CheckResult::fail("dictionary is empty")
    } else {
        CheckResult::ok()
    }
}

/// Check database connectivity
fn check_database(state: &ApiState) -> CheckResult {
    match &state.db {
        Some(pool) => match db::ping(pool) {
            Ok(()) => CheckResult::ok(),
            Err(e) => CheckResult::fail(e.to_string()),
        },
        None => CheckResult::unavailable(),
    }
}

/// Build health router
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}
