//! Streamable-HTTP MCP endpoint in JSON response mode: one POST, one
//! JSON-RPC exchange, one transport.

pub mod protocol;
pub mod server;
pub mod transport;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::error;

pub use server::{DispatchError, McpServer};
pub use transport::{Exchange, McpTransport};

use crate::api::ApiError;
use crate::AppState;

pub async fn handle_mcp(State(state): State<AppState>, body: Bytes) -> Response {
    // Lives until this handler returns or is cancelled by a disconnect.
    let transport = McpTransport::open(Arc::clone(&state.mcp));

    respond(transport.handle_request(&body).await)
}

fn respond(outcome: Result<Exchange, DispatchError>) -> Response {
    match outcome {
        Ok(Exchange::Reply { status, body }) => (status, Json(body)).into_response(),
        Ok(Exchange::Accepted) => StatusCode::ACCEPTED.into_response(),
        Err(e) => {
            error!(error = %e, "Error handling MCP request");
            ApiError::Mcp.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn internal_failure_hides_its_detail() {
        let cause = serde_json::from_str::<Value>("[1,").unwrap_err();
        let response = respond(Err(DispatchError::Encode(cause)));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({ "error": "Internal MCP server error" }));
    }

    #[tokio::test]
    async fn accepted_exchange_has_no_body() {
        let response = respond(Ok(Exchange::Accepted));
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }
}
