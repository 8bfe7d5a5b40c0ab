use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use form_core::ValidationError;
use serde::Serialize;
use thiserror::Error;

// Output: accepted application
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub application_id: String,
}

// Output: anything that went wrong
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    pub mcp: &'static str,
    pub form_api: &'static str,
    pub form: &'static str,
}

/// Errors a handler hands back to the caller.
///
/// Only validation failures carry detail; the rest are generic on purpose and
/// must be logged by whoever produces them.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Internal server error")]
    Internal,

    #[error("Internal MCP server error")]
    Mcp,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal | ApiError::Mcp => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
