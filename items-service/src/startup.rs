//! Application startup and lifecycle management.

use crate::config::ItemsConfig;
use crate::handlers;
use crate::services::{initialize_store, InitOutcome, ItemStore, PgStore};
use axum::{middleware, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::metrics::metrics_middleware;
use service_core::middleware::tracing::{make_request_span, request_id_middleware};
use service_core::observability::metrics_handler;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }
}

/// Build the HTTP router for the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::info::root))
        .route("/api/data", get(handlers::data::list_items))
        .route("/api/count", get(handlers::data::count_items))
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(metrics_handler))
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    init: InitOutcome,
}

impl Application {
    /// Initialize the PostgreSQL store and bind the listener.
    pub async fn build(config: ItemsConfig) -> Result<Self, AppError> {
        let store: Arc<dyn ItemStore> = Arc::new(PgStore::new(config.database.url.clone()));
        Self::build_with_store(config, store).await
    }

    /// Same as [`Application::build`] with a caller-provided store.
    ///
    /// Initialization always completes (successfully or not) before the
    /// listener is bound, so no request can observe a half-seeded table.
    pub async fn build_with_store(
        config: ItemsConfig,
        store: Arc<dyn ItemStore>,
    ) -> Result<Self, AppError> {
        let init = initialize_store(store.as_ref(), &config.init.retry_config()).await;
        if !init.is_ready() {
            tracing::warn!(
                attempts = init.attempts(),
                "Serving without an initialized database; data endpoints will fail"
            );
        }

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(
            service = %config.service_name,
            port = port,
            "Items service listener bound"
        );

        Ok(Self {
            port,
            listener,
            router: build_router(AppState::new(store)),
            init,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// How startup initialization went.
    pub fn init_outcome(&self) -> &InitOutcome {
        &self.init
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            port = self.port,
            "Service ready to accept connections"
        );
        axum::serve(self.listener, self.router).await
    }
}
