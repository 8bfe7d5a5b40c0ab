use serde::Serialize;
use std::path::Path;
use tracing::error;

pub const WIDGET_URI: &str = "ui://widget/application-form.html";
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";
/// Markup file looked up inside the public directory.
pub const WIDGET_FILE: &str = "credit-card-form.html";
pub const FALLBACK_MARKUP: &str = "<h1>Error loading form</h1>";

/// Entry returned from `resources/list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    pub uri: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

/// One item of a `resources/read` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceContents {
    pub uri: String,
    pub mime_type: &'static str,
    pub text: String,
}

pub(crate) fn widget_descriptor() -> ResourceDescriptor {
    ResourceDescriptor {
        uri: WIDGET_URI,
        name: "application-form-ui",
        title: "Application Form UI",
        description: "Embedded widget to capture basic user details using a form.",
        mime_type: WIDGET_MIME_TYPE,
    }
}

/// Reads the widget markup. Never fails: an unreadable file is logged and
/// replaced by [`FALLBACK_MARKUP`].
pub(crate) async fn load_widget(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(markup) => markup,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to read form HTML");
            FALLBACK_MARKUP.to_string()
        }
    }
}
