//! HTTP API server for the sign gateway

mod error;
mod grammar;
pub mod health;
mod recognize;
pub mod rate_limit;
mod translate;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{MethodRouter, post};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::Result;
use crate::config::{DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_PORT};
use crate::db::DbPool;
use crate::grammar::TextNormalizer;
use crate::speech::Transcriber;
use crate::translate::Translator;

pub use error::ApiError;
pub use recognize::RecognizeResponse;
pub use translate::{TranslateForm, TranslateResponse};

/// Shared state for API handlers
pub struct ApiState {
    pub translator: Translator,
    /// Speech backend; `/recognize/` answers 503 without one
    pub transcriber: Option<Arc<dyn Transcriber>>,
    /// Grammar backend; `/grammar/` answers 503 without one
    pub normalizer: Option<Arc<dyn TextNormalizer>>,
    pub db: Option<DbPool>,
    pub rate_limiter: Option<rate_limit::SharedLimiter>,
}

/// Configuration for building an API server
pub struct ApiServerBuilder {
    translator: Translator,
    transcriber: Option<Arc<dyn Transcriber>>,
    normalizer: Option<Arc<dyn TextNormalizer>>,
    db: Option<DbPool>,
    host: String,
    port: u16,
    rate_limit_per_minute: Option<u32>,
    assets_dir: Option<PathBuf>,
    max_upload_bytes: usize,
}

impl ApiServerBuilder {
    /// Create a new API server builder
    #[must_use]
    pub fn new(translator: Translator) -> Self {
        Self {
            translator,
            transcriber: None,
            normalizer: None,
            db: None,
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            rate_limit_per_minute: None,
            assets_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    #[must_use]
    pub fn transcriber(mut self, transcriber: Arc<dyn Transcriber>) -> Self {
        self.transcriber = Some(transcriber);
        self
    }

    #[must_use]
    pub fn normalizer(mut self, normalizer: Arc<dyn TextNormalizer>) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Attach the sign database for readiness checks
    #[must_use]
    pub fn db(mut self, db: DbPool) -> Self {
        self.db = Some(db);
        self
    }

    #[must_use]
    pub fn bind(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    /// Limit requests per minute across all clients
    #[must_use]
    pub const fn rate_limit(mut self, requests_per_minute: Option<u32>) -> Self {
        self.rate_limit_per_minute = requests_per_minute;
        self
    }

    /// Serve gesture assets from this directory under `/gestures`
    #[must_use]
    pub fn assets_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.assets_dir = dir;
        self
    }

    #[must_use]
    pub const fn max_upload_bytes(mut self, bytes: usize) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// Build the API server
    #[must_use]
    pub fn build(self) -> ApiServer {
        let state = Arc::new(ApiState {
            translator: self.translator,
            transcriber: self.transcriber,
            normalizer: self.normalizer,
            db: self.db,
            rate_limiter: self.rate_limit_per_minute.map(rate_limit::create_limiter),
        });

        ApiServer {
            state,
            host: self.host,
            port: self.port,
            assets_dir: self.assets_dir,
            max_upload_bytes: self.max_upload_bytes,
        }
    }
}

/// API server
pub struct ApiServer {
    state: Arc<ApiState>,
    host: String,
    port: u16,
    assets_dir: Option<PathBuf>,
    max_upload_bytes: usize,
}

/// Register a route under both `/path/` and `/path`
fn route_both(
    router: Router<Arc<ApiState>>,
    path: &str,
    method: MethodRouter<Arc<ApiState>>,
) -> Router<Arc<ApiState>> {
    let bare = path.trim_end_matches('/');
    router.route(path, method.clone()).route(bare, method)
}

impl ApiServer {
    /// Shared handler state
    #[must_use]
    pub fn state(&self) -> Arc<ApiState> {
        self.state.clone()
    }

    /// Build the router with all routes
    pub fn router(&self) -> Router {
        let recognize = post(recognize::recognize).layer(DefaultBodyLimit::max(self.max_upload_bytes));

        let mut router = Router::new();
        router = route_both(router, "/translate/", post(translate::translate));
        router = route_both(router, "/recognize/", recognize);
        router = route_both(router, "/grammar/", post(grammar::correct));

        let mut router = router
            .with_state(self.state.clone())
            .merge(health::router(self.state.clone()));

        // Serve gesture assets if configured
        if let Some(dir) = &self.assets_dir {
            router = router.nest_service("/gestures", ServeDir::new(dir));
            tracing::info!(path = %dir.display(), "serving gesture assets");
        }

        let router = router.layer(axum::middleware::from_fn_with_state(
            self.state.clone(),
            rate_limit::rate_limit_middleware,
        ));

        // CORS layer for cross-origin requests from the web client
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        router.layer(cors).layer(TraceLayer::new_for_http())
    }

    /// Run the API server until Ctrl+C
    ///
    /// # Errors
    ///
    /// Returns error if server fails to bind or run
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| crate::Error::Config(format!("failed to bind API server: {e}")))?;

        tracing::info!(
            addr = %addr,
            signs = self.state.translator.dictionary().len(),
            speech = self.state.transcriber.as_ref().map(|t| t.name()),
            grammar = self.state.normalizer.as_ref().map(|n| n.name()),
            "API server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| crate::Error::Config(format!("API server error: {e}")))?;

        tracing::info!("API server stopped");
        Ok(())
    }

    /// Run the API server in a background task
    #[must_use]
    pub fn spawn(self) -> tokio::task::JoinHandle<Result<()>> {
        tokio::spawn(async move { self.run().await })
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("received shutdown signal");
}
