//! HTTP server implementation using Axum.

use crate::handler::{handle_health, handle_query, handle_query_all};
use axum::{
    routing::{get, post},
    Router,
};
use sawit_core::{ArgumentPreprocessor, QueryDispatcher};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Application state shared across handlers.
pub struct AppState {
    /// Query dispatcher (connect, evaluate, disconnect per request)
    pub dispatcher: QueryDispatcher,
    /// Name-keyed argument rewrites applied before dispatch
    pub preprocessor: ArgumentPreprocessor,
}

/// Build the gateway router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Permissive CORS for development deployments
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/query", post(handle_query))
        .route("/queryAll", get(handle_query_all))
        .layer(cors)
        .with_state(state)
}

/// Start the query gateway server.
///
/// Returns the actual address the server is bound to (useful when port=0).
pub async fn start_server(
    dispatcher: QueryDispatcher,
    host: &str,
    port: u16,
) -> anyhow::Result<SocketAddr> {
    let state = Arc::new(AppState {
        dispatcher,
        preprocessor: ArgumentPreprocessor::default(),
    });

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let actual_addr = listener.local_addr()?;

    info!("Server listening on {}", actual_addr);

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server error");
    });

    Ok(actual_addr)
}
