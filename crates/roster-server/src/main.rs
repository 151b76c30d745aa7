//! Roster Server
//!
//! Internal employee directory: list, search, hire, edit and fire employee
//! records stored in PostgreSQL, rendered as plain server-side HTML.

mod handlers;
mod services;
mod settings;
mod storage;
mod telemetry;
mod views;

use anyhow::{Context, Result};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use roster_core::EmployeeStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use services::EmployeeDirectory;
use settings::{Config, StoreBackend};
use storage::{MemoryEmployeeStore, PgEmployeeStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<EmployeeDirectory>,
    /// Present when the Prometheus recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(store: Arc<dyn EmployeeStore>, metrics: Option<PrometheusHandle>) -> Self {
        Self {
            directory: Arc::new(EmployeeDirectory::new(store)),
            metrics,
        }
    }
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[FATAL] {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = telemetry::init_logging(config.log_format) {
        eprintln!("[FATAL] {:#}", e);
        std::process::exit(1);
    }

    info!("Starting Roster Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(config: Config) -> Result<()> {
    info!("Config loaded: {:?}", config);

    let store: Arc<dyn EmployeeStore> = match config.store_backend {
        StoreBackend::Postgres => Arc::new(
            PgEmployeeStore::connect(config.connect_options(), config.db_max_connections)
                .await
                .context("Failed to initialize database")?,
        ),
        StoreBackend::Memory => {
            info!("Using in-memory store; records are lost on exit");
            Arc::new(MemoryEmployeeStore::new())
        }
    };

    let metrics = telemetry::install_recorder()?;
    let app = build_router(AppState::new(store, Some(metrics)));

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::employees::index))
        .route(
            "/hire",
            get(handlers::employees::hire_form).post(handlers::employees::hire),
        )
        .route(
            "/edit/:id",
            get(handlers::employees::edit_form).post(handlers::employees::edit),
        )
        .route("/fire/:id", post(handlers::employees::fire))
        .route("/health", get(handlers::health))
        .route("/metrics", get(telemetry::render))
        .route_layer(middleware::from_fn(telemetry::track_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
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
    info!("Shutdown signal received");
}
