//! Query request handlers.
//!
//! Error mapping is deliberately coarse: preprocessing failures are the
//! client's fault and return 400 before any network I/O; everything the
//! dispatcher reports comes back as 500 with the underlying message, matching
//! the gateway's original single error channel.

use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error};

/// Body of a POST /query request.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    pub org: String,
    pub user: String,
    pub func: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

/// Query parameters of a GET /queryAll request.
#[derive(Debug, Deserialize)]
pub struct QueryAllParams {
    pub org: String,
    pub user: String,
    pub func: String,
}

/// Health check endpoint.
pub async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Evaluate a chaincode function with positional arguments.
pub async fn handle_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QueryRequest>,
) -> impl IntoResponse {
    debug!(
        "query: {} as {}@{} ({} args)",
        request.func,
        request.user,
        request.org,
        request.args.len()
    );

    let args = match state.preprocessor.apply(&request.func, request.args) {
        Ok(args) => args,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": e.to_string()})),
            );
        }
    };

    dispatch(&state, &request.org, &request.user, &request.func, &args).await
}

/// Evaluate a zero-argument chaincode function.
pub async fn handle_query_all(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QueryAllParams>,
) -> impl IntoResponse {
    debug!("queryAll: {} as {}@{}", params.func, params.user, params.org);
    dispatch(&state, &params.org, &params.user, &params.func, &[]).await
}

async fn dispatch(
    state: &AppState,
    org: &str,
    user: &str,
    func: &str,
    args: &[Value],
) -> (StatusCode, Json<Value>) {
    match state.dispatcher.dispatch(org, user, func, args).await {
        Ok(result) => (StatusCode::OK, Json(json!({"result": result}))),
        Err(e) => {
            error!("Dispatch of {} failed: {}", func, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
        }
    }
}
