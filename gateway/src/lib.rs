pub mod api;
pub mod config;
pub mod mcp;
pub mod submit;

use axum::{
    http::{
        header::{ACCEPT, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS, X_XSS_PROTECTION},
        HeaderName, HeaderValue, Method,
    },
    routing::{get, post},
    Json, Router,
};
use form_tools::Registry;
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::api::{Endpoints, HealthResponse};
use crate::mcp::protocol::{SERVER_NAME, SERVER_VERSION};
use crate::mcp::McpServer;

pub const MCP_PATH: &str = "/mcp";
pub const SUBMIT_PATH: &str = "/api/form-submit";
pub const HEALTH_PATH: &str = "/health";
pub const FORM_PATH: &str = "/credit-card-form.html";

// Application State
// Immutable after startup; every request only reads it.
#[derive(Clone)]
pub struct AppState {
    pub mcp: Arc<McpServer>,
}

impl AppState {
    pub fn new(registry: Registry) -> Self {
        Self {
            mcp: Arc::new(McpServer::new(registry)),
        }
    }
}

/// Builds the full router. Unmatched paths are served from `public_dir`.
pub fn app(state: AppState, public_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            ACCEPT,
            HeaderName::from_static("x-requested-from"),
        ]);

    Router::new()
        .route(HEALTH_PATH, get(health_check))
        .route(MCP_PATH, post(mcp::handle_mcp))
        .route(SUBMIT_PATH, post(submit::submit_application))
        .fallback_service(ServeDir::new(public_dir))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            X_XSS_PROTECTION,
            HeaderValue::from_static("1; mode=block"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// --- HANDLERS ---

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: SERVER_NAME,
        version: SERVER_VERSION,
        endpoints: Endpoints {
            mcp: MCP_PATH,
            form_api: SUBMIT_PATH,
            form: FORM_PATH,
        },
    })
}
