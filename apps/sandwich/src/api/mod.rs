//! # HTTP API
//!
//! axum router over a shared [`Store`].
//!
//! redb is synchronous, so every store call is moved onto the blocking
//! pool with [`AppState::run`]. Handlers stay thin: extract, run, wrap.

pub mod error;
pub mod extract;
pub mod routes;

pub use error::{ApiError, ApiResult};

use axum::routing::get;
use axum::{Json, Router};
use sandwich_core::Store;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::Layer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::NormalizePathLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// STATE
// =============================================================================

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    store: Arc<Store>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Run a store operation on the blocking pool.
    pub async fn run<T, F>(&self, op: F) -> ApiResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Store) -> sandwich_core::Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        Ok(tokio::task::spawn_blocking(move || op(&store)).await??)
    }
}

// =============================================================================
// ROUTER
// =============================================================================

/// Service banner for `/` and `/health`.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

async fn service_info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "Sandwich Maker API",
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/", get(service_info))
        .route("/health", get(service_info))
        .nest("/resources", routes::resources::router())
        .nest("/sandwiches", routes::sandwiches::router())
        .nest("/recipes", routes::recipes::router())
        .nest("/orders", routes::orders::router())
        .nest("/order-details", routes::order_details::router())
        .nest("/payments", routes::payments::router())
        .nest("/promotional-codes", routes::promotional_codes::router())
        .nest("/reviews", routes::reviews::router())
        .nest("/analytics", routes::analytics::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    // Trailing slashes are trimmed before routing, so `/orders/` reaches `/orders`.
    Router::new().fallback_service(NormalizePathLayer::trim_trailing_slash().layer(app))
}

// =============================================================================
// SERVER
// =============================================================================

/// Serve the API until Ctrl-C or SIGTERM.
pub async fn serve(store: Store, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(AppState::new(store));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %listener.local_addr()?, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                tracing::info!("received SIGTERM, shutting down");
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
