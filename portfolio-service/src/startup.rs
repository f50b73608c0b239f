//! Application startup and lifecycle management.

use crate::config::{CorsConfig, PortfolioConfig};
use crate::handlers;
use crate::services::{CompletionProvider, JsonStore, LocalJsonStore, OpenAiProvider};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{request_id_middleware, request_span, REQUEST_ID_HEADER};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: PortfolioConfig,
    /// Built once at startup; `None` when no API key is configured.
    pub provider: Option<Arc<dyn CompletionProvider>>,
    pub store: Arc<dyn JsonStore>,
}

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/chatbot/chat", post(handlers::chat))
        .route(
            "/testimonials/generate-testimonials",
            post(handlers::generate_testimonials),
        )
        .route(
            "/testimonials/view-testimonials",
            get(handlers::view_testimonials),
        );

    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/_healthz", get(handlers::health_check))
        .merge(api.clone())
        // Path prefix the front-end client calls through.
        .nest("/routes", api)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(from_fn(request_id_middleware))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)]);

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", origin, e);
                None
            }
        })
        .collect::<Vec<HeaderValue>>();

    layer.allow_origin(origins)
}

fn build_provider(config: &PortfolioConfig) -> Option<Arc<dyn CompletionProvider>> {
    let Some(api_key) = config.openai.api_key.as_deref() else {
        tracing::warn!(
            "OPENAI_API_KEY not set; chatbot and testimonial generation will report a configuration error"
        );
        return None;
    };

    match OpenAiProvider::new(api_key, &config.openai.model, &config.openai.base_url) {
        Ok(provider) => {
            tracing::info!(
                model = %config.openai.model,
                base_url = %config.openai.base_url,
                "Initialized OpenAI completion provider"
            );
            Some(Arc::new(provider))
        }
        Err(e) => {
            tracing::error!("Failed to initialize OpenAI completion provider: {}", e);
            None
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: PortfolioConfig) -> Result<Self, AppError> {
        let provider = build_provider(&config);

        let store: Arc<dyn JsonStore> = Arc::new(
            LocalJsonStore::new(&config.storage.local_path)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "Failed to initialize JSON store at {}: {}",
                        config.storage.local_path,
                        e
                    );
                    e
                })?,
        );

        Self::build_with(config, provider, store).await
    }

    /// Build the application around an existing provider and store.
    pub async fn build_with(
        config: PortfolioConfig,
        provider: Option<Arc<dyn CompletionProvider>>,
        store: Arc<dyn JsonStore>,
    ) -> Result<Self, AppError> {
        // Port 0 picks a random port (tests)
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Portfolio service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState {
                config,
                provider,
                store,
            },
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Serve until Ctrl+C or SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let app = router(self.state);
        axum::serve(self.listener, app)
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
