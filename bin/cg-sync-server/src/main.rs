//! CampusGate Access Sync Server
//!
//! Production server exposing the Access System synchronization API to
//! the Events System write and registration paths.
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CG_API_PORT` | `8085` | HTTP API port |
//! | `CG_HEALTH_PORT` | `9095` | Health port |
//! | `CG_ACCESS_STORE_URL` | - | Access System store URL (absent = disabled) |
//! | `CG_ACCESS_SERVICE_KEY` | - | Service credential (absent = disabled) |
//! | `CG_ACCESS_DB` | `campus_access` | Access System database name |
//! | `CG_ACCESS_PUBLIC_URL` | `https://access.campus.example` | Verification base address |
//! | `CG_ACCESS_TIMEOUT_SECS` | `10` | Per-call store deadline |
//! | `RUST_LOG` | `info` | Log level |

use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use cg_sync::api::{passes_router, sync_router, PassesState, SyncApiDoc, SyncState};
use cg_sync::{
    AccessClient, AccessConfig, ApprovalResolver, BackgroundSync, PassIssuer, SuppressionPolicy,
    SyncGateway,
};

fn env_or_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    info!("Starting CampusGate Access Sync Server");

    let api_port: u16 = env_or_parse("CG_API_PORT", 8085);
    let health_port: u16 = env_or_parse("CG_HEALTH_PORT", 9095);

    // Integration on/off is decided here, once per process
    let config = AccessConfig::from_env();
    let client = AccessClient::connect(&config).await?;
    if client.is_enabled() {
        info!("Access System integration enabled");
    }

    // Services (stateless between calls; they share the typed client)
    let gateway = SyncGateway::new(client.clone());
    let sync_state = SyncState {
        client: client.clone(),
        policy: SuppressionPolicy::new(),
        background: BackgroundSync::new(gateway),
        resolver: ApprovalResolver::new(client.clone()),
    };
    let passes_state = PassesState {
        client: client.clone(),
        resolver: ApprovalResolver::new(client.clone()),
        issuer: PassIssuer::new(client),
    };

    let app = Router::new()
        .nest("/sync", sync_router(sync_state))
        .nest("/passes", passes_router(passes_state))
        .merge(SwaggerUi::new("/swagger-ui").url("/q/openapi", SyncApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any));

    let api_addr = format!("0.0.0.0:{}", api_port);
    info!("API server listening on http://{}", api_addr);
    let api_listener = TcpListener::bind(&api_addr).await?;
    let api_task = tokio::spawn(async move {
        axum::serve(api_listener, app).await.unwrap();
    });

    let health_app = Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler));

    let health_addr = format!("0.0.0.0:{}", health_port);
    info!("Health server listening on http://{}/health", health_addr);
    let health_listener = TcpListener::bind(&health_addr).await?;
    let health_task = tokio::spawn(async move {
        axum::serve(health_listener, health_app).await.unwrap();
    });

    info!("CampusGate Access Sync Server started");

    shutdown_signal().await;
    info!("Shutdown signal received...");

    api_task.abort();
    health_task.abort();

    info!("CampusGate Access Sync Server shutdown complete");
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "UP",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn ready_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "READY"
    }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
