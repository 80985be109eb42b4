//! Application startup and lifecycle management.
//!
//! Wires the model client and session registry into [`AppState`], builds the
//! router, and runs the HTTP server until a shutdown signal arrives.

use crate::config::{ProviderKind, StudyConfig};
use crate::handlers;
use crate::middleware::metrics_middleware;
use crate::services::metrics;
use crate::services::providers::gemini::{GeminiClient, GeminiConfig};
use crate::services::providers::mock::MockModelClient;
use crate::services::{ModelClient, SessionRegistry};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, security_headers_middleware};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// The session registry lives here rather than in a global, so each
/// [`Application`] (and each test) owns its own set of sessions.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn ModelClient>,
    pub sessions: Arc<SessionRegistry>,
}

impl AppState {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        let sessions = Arc::new(SessionRegistry::new(Arc::clone(&model)));
        Self { model, sessions }
    }
}

/// Construct the configured model client.
pub fn build_model_client(config: &StudyConfig) -> Result<Arc<dyn ModelClient>, AppError> {
    match config.provider {
        ProviderKind::Gemini => {
            let client = GeminiClient::new(GeminiConfig {
                api_key: config.gemini.api_key.clone(),
                model: config.gemini.model.clone(),
                api_base: config.gemini.api_base.clone(),
                timeout: Duration::from_secs(config.gemini.timeout_secs),
            })
            .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;

            tracing::info!(model = %client.model(), "Initialized Gemini model client");
            Ok(Arc::new(client))
        }
        ProviderKind::Mock => {
            tracing::warn!("Using mock model client; responses are canned");
            Ok(Arc::new(MockModelClient::new()))
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(handlers::chat))
        .route("/api/study-plan", post(handlers::study_plan))
        .route("/api/quiz", post(handlers::quiz))
        .route("/api/explain", post(handlers::explain))
        .route("/api/code-review", post(handlers::code_review))
        .route("/api/resources", post(handlers::resources))
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics::metrics))
        .layer(from_fn(metrics_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(service_core::middleware::REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the model client named by `config`.
    pub async fn build(config: StudyConfig) -> Result<Self, AppError> {
        let model = build_model_client(&config)?;
        Self::build_with_model(config, model).await
    }

    /// Build the application around an already constructed model client.
    pub async fn build_with_model(
        config: StudyConfig,
        model: Arc<dyn ModelClient>,
    ) -> Result<Self, AppError> {
        metrics::init_metrics()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("Failed to init metrics: {}", e)))?;

        let state = AppState::new(model);

        // Port 0 = random port for testing
        let addr = config.common.socket_addr();
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            port,
            provider = state.model.name(),
            "Study service listening"
        );

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the HTTP port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the application until a shutdown signal is received.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
