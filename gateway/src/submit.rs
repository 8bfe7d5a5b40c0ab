use anyhow::{anyhow, Context};
use axum::{
    body::to_bytes,
    extract::{ConnectInfo, Request},
    Json,
};
use form_core::{validate_submission, SubmissionRecord};
use serde_json::{Map, Value};
use std::net::SocketAddr;
use tracing::{error, info, warn};

use crate::api::{ApiError, SubmitResponse};

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// `POST /api/form-submit`
///
/// The body is parsed here rather than by an extractor so that any JSON
/// object is accepted regardless of `Content-Type`, and so malformed input
/// surfaces as our generic 500 instead of an extractor rejection.
pub async fn submit_application(request: Request) -> Result<Json<SubmitResponse>, ApiError> {
    let (parts, body) = request.into_parts();
    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    let body = read_body(body).await.map_err(|e| {
        error!(error = %format!("{e:#}"), "Error processing application");
        ApiError::Internal
    })?;

    let submission = validate_submission(&body).map_err(|e| {
        warn!(reason = %e, "Application rejected");
        e
    })?;

    let record = SubmissionRecord::received(&submission, peer);
    let summary = record.summary(&submission);
    info!(
        id = %summary.id,
        name = %summary.name,
        form_type = %summary.form_type,
        email = %summary.email,
        timestamp = %summary.timestamp,
        "Application received"
    );

    Ok(Json(SubmitResponse {
        success: true,
        message: "Form submitted successfully".to_string(),
        application_id: record.id,
    }))
}

async fn read_body(body: axum::body::Body) -> anyhow::Result<Map<String, Value>> {
    let bytes = to_bytes(body, MAX_BODY_BYTES)
        .await
        .context("failed to read submission body")?;
    parse_body(&bytes)
}

// Empty input reads as {}; other non-object JSON reads as {} too, so the
// caller gets the full missing-fields list. `null` has no fields to look up.
fn parse_body(bytes: &[u8]) -> anyhow::Result<Map<String, Value>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes).context("submission body is not valid JSON")? {
        Value::Object(map) => Ok(map),
        Value::Null => Err(anyhow!("submission body is null")),
        _ => Ok(Map::new()),
    }
}
