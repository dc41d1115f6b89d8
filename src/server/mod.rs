//! HTTP/WebSocket server for the browser frontend
//!
//! Serves the embedded single-page app, the `/api/invoke` command proxy and
//! the `/ws/events` stream of view updates.

mod events;
mod proxy;
pub mod routes;
pub mod state;
mod static_files;

pub use events::{BroadcastEmitter, EventBroadcaster, ServerEvent};
pub use proxy::{invoke_handler, InvokeRequest, InvokeResponse};
pub use state::ServerAppState;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE},
        HeaderValue,
    },
    routing::{get, post},
    Json, Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// Version information for the server
#[derive(serde::Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
}

/// Build the router for `state`
pub fn build_router(state: ServerAppState, cors_origins: &[String]) -> Router {
    // Note: Using explicit headers instead of Any to avoid browser deprecation warnings
    let cors = if cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([CONTENT_TYPE, ACCEPT])
    } else {
        let allowed_origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|o| o.parse().ok()).collect();
        CorsLayer::new()
            .allow_origin(allowed_origins)
            .allow_methods(Any)
            .allow_headers([CONTENT_TYPE, ACCEPT])
    };

    Router::new()
        .route("/api/invoke", post(proxy::invoke_handler))
        .route("/ws/events", get(events::ws_handler))
        .route("/health", get(health_handler))
        .route("/api/version", get(version_handler))
        .fallback(static_files::serve_static)
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP/WebSocket server until shutdown is requested
pub async fn run_server(
    port: u16,
    bind: &str,
    state: ServerAppState,
    cors_origins: Vec<String>,
) -> Result<(), String> {
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .map_err(|e| format!("Invalid address: {}", e))?;

    let cors_display = if cors_origins.is_empty() {
        "*".to_string()
    } else {
        cors_origins.join(", ")
    };
    let frontend_status = if static_files::has_embedded_frontend() {
        "Embedded"
    } else {
        "Missing (dist/ was empty at build time)"
    };

    let shutdown_state = state.shutdown_state.clone();
    let app = build_router(state, &cors_origins);

    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                   DreamBuild Design Server                    ║");
    println!("╠══════════════════════════════════════════════════════════════╣");
    println!("║                                                               ║");
    println!("║  Server URL: http://{}:{:<24}  ║", bind, port);
    println!("║                                                               ║");
    println!("║  CORS Origins: {:<45}║", cors_display);
    println!("║  Frontend: {:<49}║", frontend_status);
    println!("║                                                               ║");
    println!("║  Endpoints:                                                   ║");
    println!("║    POST /api/invoke      - Command proxy                     ║");
    println!("║    GET  /api/version     - Server version info               ║");
    println!("║    GET  /ws/events       - WebSocket view updates            ║");
    println!("║    GET  /health          - Health check                      ║");
    println!("║                                                               ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    log::info!("Server listening on http://{}", addr);

    let shutdown_signal = async move {
        shutdown_state.wait().await;
        log::info!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| format!("Server error: {}", e))
}

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Version endpoint
async fn version_handler() -> Json<VersionInfo> {
    Json(VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}
