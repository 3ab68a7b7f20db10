//! Core library for the veterinary clinic website backend: configuration,
//! payload validation, the document store and the HTTP routes.

pub mod config;
pub mod database;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod persistence;
pub mod validation;

pub use config::AppConfig;
pub use database::{open_document_store, DocumentStore, SqliteDocumentStore};
pub use error::{AppError, Result};
pub use handlers::create_routes;
pub use persistence::{Document, Persistence, PersistenceError};

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub persistence: Persistence,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, persistence: Persistence) -> Self {
        Self {
            app_name: "Vet Clinic API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            persistence,
            config: Arc::new(config),
        }
    }

    /// Opens the configured document store. A missing or unreachable store
    /// leaves the adapter in its unavailable mode instead of failing start-up.
    pub async fn connect(config: AppConfig) -> Self {
        let persistence = if config.database.is_configured() {
            match open_document_store(&config.database).await {
                Ok(store) => Persistence::with_store(store),
                Err(e) => {
                    warn!("Failed to open document store, continuing without it: {}", e);
                    Persistence::unavailable()
                }
            }
        } else {
            warn!("Document store not configured, continuing without it");
            Persistence::unavailable()
        };

        Self::new(config, persistence)
    }
}

pub fn create_app(state: AppState) -> Router {
    let cors = middleware::cors_layer_from_config(&state.config.cors);

    let router = create_routes().with_state(state).layer(cors);

    middleware::with_request_tracing(router)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> std::io::Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
