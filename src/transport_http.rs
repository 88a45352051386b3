//! HTTP transport: one POST endpoint for the JSON-RPC envelope plus a
//! liveness probe. Malformed JSON and wrong methods are rejected here, with
//! client-error statuses, before the dispatcher is involved.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::server::Server;
use crate::types::JsonRpcRequest;

/// Create the axum router for the MCP server.
pub fn http_router(server: Server) -> Router {
    Router::new()
        .route("/mcp", post(handle_mcp))
        .route("/health", get(handle_health))
        .with_state(Arc::new(server))
}

async fn handle_health() -> impl IntoResponse {
    Json(json!({"status": "healthy"}))
}

async fn handle_mcp(
    State(server): State<Arc<Server>>,
    Json(req): Json<JsonRpcRequest>,
) -> impl IntoResponse {
    Json(server.handle(req).await)
}
