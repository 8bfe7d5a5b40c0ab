use form_tools::{Registry, RegistryError};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use super::protocol::{
    negotiate_version, InitializeParams, ResourceReadParams, ToolCallParams, INVALID_PARAMS,
    METHOD_NOT_FOUND, SERVER_NAME, SERVER_VERSION,
};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Our own result failed to encode. Not the caller's fault.
    #[error("failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),
}

impl DispatchError {
    /// JSON-RPC code for caller-facing failures; `None` means internal.
    pub fn code(&self) -> Option<i64> {
        match self {
            DispatchError::MethodNotFound(_) => Some(METHOD_NOT_FOUND),
            DispatchError::InvalidParams(_) | DispatchError::Registry(_) => Some(INVALID_PARAMS),
            DispatchError::Encode(_) => None,
        }
    }
}

/// Protocol front for the registry. Shared read-only by every transport.
#[derive(Debug)]
pub struct McpServer {
    registry: Registry,
}

impl McpServer {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, DispatchError> {
        debug!(method, "Dispatching MCP request");
        match method {
            "initialize" => {
                let params: InitializeParams = parse_params_or_default(params)?;
                Ok(json!({
                    "protocolVersion": negotiate_version(params.protocol_version.as_deref()),
                    "capabilities": {
                        "tools": { "listChanged": true },
                        "resources": { "listChanged": true },
                    },
                    "serverInfo": { "name": SERVER_NAME, "version": SERVER_VERSION },
                }))
            }
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": encode(self.registry.tools())? })),
            "tools/call" => {
                let call: ToolCallParams = parse_params(params)?;
                let result = self.registry.call_tool(&call.name, call.arguments)?;
                encode(result)
            }
            "resources/list" => Ok(json!({ "resources": encode(self.registry.resources())? })),
            "resources/templates/list" => Ok(json!({ "resourceTemplates": [] })),
            "resources/read" => {
                let read: ResourceReadParams = parse_params(params)?;
                let contents = self.registry.read_resource(&read.uri).await?;
                Ok(json!({ "contents": [encode(contents)?] }))
            }
            other => Err(DispatchError::MethodNotFound(other.to_string())),
        }
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, DispatchError> {
    serde_json::from_value(params.unwrap_or(Value::Null))
        .map_err(|e| DispatchError::InvalidParams(e.to_string()))
}

fn parse_params_or_default<T: DeserializeOwned + Default>(params: Option<Value>) -> Result<T, DispatchError> {
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => parse_params(Some(value)),
    }
}

fn encode<T: serde::Serialize>(value: T) -> Result<Value, DispatchError> {
    serde_json::to_value(value).map_err(DispatchError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_tools::{OPEN_FORM_TOOL, WIDGET_URI};

    fn server() -> McpServer {
        McpServer::new(Registry::new("missing-public-dir"))
    }

    #[tokio::test]
    async fn initialize_reports_identity_and_capabilities() {
        let result = server()
            .dispatch("initialize", Some(json!({ "protocolVersion": "2025-03-26" })))
            .await
            .unwrap();
        assert_eq!(result["protocolVersion"], "2025-03-26");
        assert_eq!(result["serverInfo"]["name"], "form-demo-mcp");
        assert!(result["capabilities"]["tools"].is_object());
        assert!(result["capabilities"]["resources"].is_object());
    }

    #[tokio::test]
    async fn tools_list_exposes_the_form_tool() {
        let result = server().dispatch("tools/list", None).await.unwrap();
        assert_eq!(result["tools"][0]["name"], OPEN_FORM_TOOL);
        assert_eq!(result["tools"][0]["inputSchema"]["type"], "object");
        assert_eq!(
            result["tools"][0]["_meta"]["openai/toolInvocation/invoking"],
            "Opening application form..."
        );
    }

    #[tokio::test]
    async fn tools_call_without_arguments_is_valid() {
        let result = server()
            .dispatch("tools/call", Some(json!({ "name": OPEN_FORM_TOOL })))
            .await
            .unwrap();
        assert_eq!(result["structuredContent"]["country"], "United States");
        assert_eq!(result["structuredContent"]["formType"], Value::Null);
    }

    #[tokio::test]
    async fn bad_params_map_to_invalid_params() {
        let err = server()
            .dispatch("tools/call", Some(json!({ "arguments": {} })))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(INVALID_PARAMS));

        let err = server()
            .dispatch("tools/call", Some(json!({ "name": "nope" })))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(INVALID_PARAMS));
        assert_eq!(err.to_string(), "Tool nope not found");
    }

    #[tokio::test]
    async fn resources_read_falls_back_when_markup_is_missing() {
        let result = server()
            .dispatch("resources/read", Some(json!({ "uri": WIDGET_URI })))
            .await
            .unwrap();
        assert_eq!(result["contents"][0]["uri"], WIDGET_URI);
        assert_eq!(result["contents"][0]["mimeType"], "text/html+skybridge");
        assert_eq!(result["contents"][0]["text"], "<h1>Error loading form</h1>");
    }

    #[test]
    fn encode_failures_are_internal() {
        let cause = serde_json::from_str::<Value>("{").unwrap_err();
        let err = DispatchError::Encode(cause);
        assert_eq!(err.code(), None);

        assert_eq!(DispatchError::InvalidParams("x".to_string()).code(), Some(INVALID_PARAMS));
    }

    #[tokio::test]
    async fn unknown_method_is_reported() {
        let err = server().dispatch("prompts/list", None).await.unwrap_err();
        assert_eq!(err.code(), Some(METHOD_NOT_FOUND));
    }
}
