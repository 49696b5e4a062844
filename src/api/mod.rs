//! HTTP interface - routes, shared state and server lifecycle.
//!
//! The router exposes the catalog, sale, report and reset operations as the
//! JSON API the browser client polls. CORS is open to any origin.

/// Conversion of crate errors into HTTP responses
pub mod error;
/// Route handlers
pub mod handlers;
/// JSON request and response bodies
pub mod payloads;

use crate::{config::CatalogConfig, errors::Result};
use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use std::{sync::Arc, time::Duration};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info};

/// State shared by all handlers.
///
/// The connection pool is injected here rather than held globally; each
/// request checks out what it needs for the duration of its handler.
#[derive(Clone)]
pub struct AppState {
    /// Connection pool for the catalog and ledger
    pub db: Arc<DatabaseConnection>,
    /// Teams and quotas
    pub catalog: Arc<CatalogConfig>,
}

impl AppState {
    /// Creates the state from an open connection and a loaded catalog.
    #[must_use]
    pub fn new(db: DatabaseConnection, catalog: CatalogConfig) -> Self {
        Self {
            db: Arc::new(db),
            catalog: Arc::new(catalog),
        }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/", get(handlers::health))
        .route("/api/platos", get(handlers::list_dishes))
        .route("/api/platos/{id}", put(handlers::correct_dish))
        .route("/api/ventas", post(handlers::register_sale))
        .route("/api/ventas/equipos", get(handlers::team_totals))
        .route("/api/reset", post(handlers::reset))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `address` and serves the API until Ctrl-C or SIGTERM.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve(state: AppState, address: &str) -> Result<()> {
    let app = router(state);

    info!("Binding to {address}");
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
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
