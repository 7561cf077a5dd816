//! Application startup and lifecycle management.
//!
//! The startup order is deliberate: both store connections are issued in the
//! background before the listener binds, and neither gates the bind. The
//! single route never touches either store, so the service answers on `/`
//! even when both stores are unreachable; `/ready` is the endpoint that
//! reflects dependency state.

use crate::config::Settings;
use crate::error::AppError;
use crate::services::{CacheService, DocumentDb};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Shared application state. Owns both store handles for the lifetime of the
/// process; the handles are never closed.
#[derive(Clone)]
pub struct AppState {
    pub cache: CacheService,
    pub db: DocumentDb,
}

async fn index() -> &'static str {
    "Hello, Worlds!"
}

/// Readiness probe: 200 only once both backing stores are connected.
async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let cache = state.cache.status();
    let document_store = state.db.status();

    let status = if cache.is_ready() && document_store.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "cache": cache.get().as_str(),
            "document_store": document_store.get().as_str(),
        })),
    )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Store connections are fire-and-forget; only a bind failure (or a
    /// malformed store URL) aborts startup.
    pub async fn build(settings: Settings) -> Result<Self, AppError> {
        let cache = CacheService::new(&settings.redis)?;
        cache.connect_in_background();

        let db = DocumentDb::new(&settings.mongodb).await?;
        db.connect_in_background();

        let state = AppState { cache, db };

        // Bind the listener (port 0 = random port for testing)
        let addr = SocketAddr::from(([0, 0, 0, 0], settings.http.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until the process is terminated externally.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, build_router(self.state)).await
    }
}
