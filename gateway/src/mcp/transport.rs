use axum::http::StatusCode;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use super::protocol::{JsonRpcResponse, INVALID_REQUEST, JSONRPC_VERSION, PARSE_ERROR};
use super::server::{DispatchError, McpServer};

/// What one exchange produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Exchange {
    Reply {
        status: StatusCode,
        body: JsonRpcResponse,
    },
    /// Notification or client response: nothing to send back.
    Accepted,
}

impl Exchange {
    fn reply(status: StatusCode, body: JsonRpcResponse) -> Self {
        Exchange::Reply { status, body }
    }
}

/// A single-use binding between one HTTP request and the MCP server.
///
/// It holds a handle to the server only while the exchange is alive.
/// Dropping it, whether after the response is built or because the client
/// went away mid-request, releases that handle.
pub struct McpTransport {
    server: Arc<McpServer>,
    opened_at: Instant,
}

impl McpTransport {
    pub fn open(server: Arc<McpServer>) -> Self {
        debug!("MCP transport opened");
        Self {
            server,
            opened_at: Instant::now(),
        }
    }

    /// Processes one JSON-RPC message.
    ///
    /// Caller mistakes become JSON-RPC errors inside `Ok`; `Err` is reserved
    /// for failures on our side.
    pub async fn handle_request(&self, body: &[u8]) -> Result<Exchange, DispatchError> {
        let message: Value = match serde_json::from_slice(body) {
            Ok(message) => message,
            Err(e) => {
                return Ok(Exchange::reply(
                    StatusCode::BAD_REQUEST,
                    JsonRpcResponse::failure(Value::Null, PARSE_ERROR, format!("Parse error: {e}")),
                ))
            }
        };

        let Value::Object(message) = message else {
            return Ok(invalid_request(Value::Null));
        };
        let id = message.get("id").cloned();
        if id.as_ref().is_some_and(|id| !is_valid_id(id)) {
            return Ok(invalid_request(Value::Null));
        }

        if message.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
            return Ok(invalid_request(id.unwrap_or(Value::Null)));
        }

        let Some(method) = message.get("method").and_then(Value::as_str) else {
            if is_client_response(&message) {
                return Ok(Exchange::Accepted);
            }
            return Ok(invalid_request(id.unwrap_or(Value::Null)));
        };

        let Some(id) = id else {
            debug!(method, "MCP notification acknowledged");
            return Ok(Exchange::Accepted);
        };

        let params = message.get("params").cloned();
        match self.server.dispatch(method, params).await {
            Ok(result) => Ok(Exchange::reply(StatusCode::OK, JsonRpcResponse::success(id, result))),
            Err(e) => match e.code() {
                Some(code) => Ok(Exchange::reply(
                    StatusCode::OK,
                    JsonRpcResponse::failure(id, code, e.to_string()),
                )),
                None => Err(e),
            },
        }
    }
}

impl Drop for McpTransport {
    fn drop(&mut self) {
        debug!(
            elapsed_ms = self.opened_at.elapsed().as_millis() as u64,
            "MCP transport closed"
        );
    }
}

// JSON-RPC ids are strings, numbers or null.
fn is_valid_id(id: &Value) -> bool {
    matches!(id, Value::String(_) | Value::Number(_) | Value::Null)
}

fn is_client_response(message: &Map<String, Value>) -> bool {
    message.contains_key("id") && (message.contains_key("result") || message.contains_key("error"))
}

fn invalid_request(id: Value) -> Exchange {
    Exchange::reply(
        StatusCode::BAD_REQUEST,
        JsonRpcResponse::failure(id, INVALID_REQUEST, "Invalid Request"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::protocol::{INVALID_PARAMS, METHOD_NOT_FOUND};
    use form_tools::Registry;
    use serde_json::json;

    fn server() -> Arc<McpServer> {
        Arc::new(McpServer::new(Registry::new("missing-public-dir")))
    }

    async fn exchange(body: Value) -> Exchange {
        let transport = McpTransport::open(server());
        transport
            .handle_request(body.to_string().as_bytes())
            .await
            .unwrap()
    }

    fn reply(exchange: Exchange) -> (StatusCode, JsonRpcResponse) {
        match exchange {
            Exchange::Reply { status, body } => (status, body),
            Exchange::Accepted => panic!("expected a reply"),
        }
    }

    #[tokio::test]
    async fn transport_releases_server_after_exchange() {
        let server = server();
        {
            let transport = McpTransport::open(Arc::clone(&server));
            assert_eq!(Arc::strong_count(&server), 2);
            transport
                .handle_request(br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#)
                .await
                .unwrap();
        }
        assert_eq!(Arc::strong_count(&server), 1);
    }

    #[tokio::test]
    async fn transport_releases_server_when_abandoned() {
        let server = server();
        let transport = McpTransport::open(Arc::clone(&server));
        let pending = transport.handle_request(b"{}");
        drop(pending);
        drop(transport);
        assert_eq!(Arc::strong_count(&server), 1);
    }

    #[tokio::test]
    async fn garbage_is_a_parse_error() {
        let transport = McpTransport::open(server());
        let (status, body) = reply(transport.handle_request(b"{not json").await.unwrap());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.id, Value::Null);
        assert_eq!(body.error.unwrap().code, PARSE_ERROR);
    }

    #[tokio::test]
    async fn wrong_version_is_an_invalid_request() {
        let (status, body) = reply(exchange(json!({ "jsonrpc": "1.0", "id": 7, "method": "ping" })).await);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.id, json!(7));
        assert_eq!(body.error.unwrap().code, INVALID_REQUEST);

        let (status, _) = reply(exchange(json!([1, 2, 3])).await);
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn structured_ids_are_rejected() {
        for id in [json!({ "n": 1 }), json!([1]), json!(true)] {
            let (status, body) =
                reply(exchange(json!({ "jsonrpc": "2.0", "id": id, "method": "ping" })).await);
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body.id, Value::Null);
            assert_eq!(body.error.unwrap().code, INVALID_REQUEST);
        }

        let (status, body) = reply(exchange(json!({ "jsonrpc": "2.0", "id": "abc", "method": "ping" })).await);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.id, json!("abc"));
    }

    #[tokio::test]
    async fn notifications_and_client_responses_are_accepted() {
        assert_eq!(
            exchange(json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })).await,
            Exchange::Accepted
        );
        assert_eq!(
            exchange(json!({ "jsonrpc": "2.0", "id": 3, "result": {} })).await,
            Exchange::Accepted
        );
    }

    #[tokio::test]
    async fn method_errors_keep_http_ok() {
        let (status, body) =
            reply(exchange(json!({ "jsonrpc": "2.0", "id": 1, "method": "sampling/create" })).await);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.error.unwrap().code, METHOD_NOT_FOUND);

        let (status, body) = reply(
            exchange(json!({
                "jsonrpc": "2.0",
                "id": 2,
                "method": "tools/call",
                "params": { "name": "open_application_form", "arguments": { "email": "bad" } }
            }))
            .await,
        );
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.error.unwrap().code, INVALID_PARAMS);
    }
}
