use form_core::{compose_prefill, is_valid_email, ToolInvocationArgs};
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::resource::{
    self, ResourceContents, ResourceDescriptor, WIDGET_FILE, WIDGET_MIME_TYPE, WIDGET_URI,
};
use crate::tool::{self, ToolCallResult, ToolContent, ToolDescriptor, OPEN_FORM_TOOL};

/// Errors surfaced to MCP callers as invalid-params.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Tool {0} not found")]
    UnknownTool(String),

    #[error("Resource {0} not found")]
    UnknownResource(String),

    #[error("Invalid arguments for tool open_application_form: {0}")]
    InvalidArguments(String),
}

/// The capability menu. Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct Registry {
    tool: ToolDescriptor,
    resource: ResourceDescriptor,
    widget_path: PathBuf,
}

impl Registry {
    /// Declares the tool and widget; markup is read from `public_dir`.
    pub fn new(public_dir: impl AsRef<Path>) -> Self {
        let widget_path = public_dir.as_ref().join(WIDGET_FILE);

        // Sanity check only: reads fall back to placeholder markup.
        if !widget_path.exists() {
            warn!("Widget registered but markup not found at: {}", widget_path.display());
        }

        let registry = Self {
            tool: tool::open_form_descriptor(),
            resource: resource::widget_descriptor(),
            widget_path,
        };
        info!(
            tool = registry.tool.name,
            resource = registry.resource.uri,
            "Capability registry ready"
        );
        registry
    }

    pub fn tools(&self) -> Vec<ToolDescriptor> {
        vec![self.tool.clone()]
    }

    pub fn resources(&self) -> Vec<ResourceDescriptor> {
        vec![self.resource.clone()]
    }

    /// Runs a tool. `arguments` may be absent; the open-form tool needs none.
    pub fn call_tool(&self, name: &str, arguments: Option<Value>) -> Result<ToolCallResult, RegistryError> {
        if name != OPEN_FORM_TOOL {
            return Err(RegistryError::UnknownTool(name.to_string()));
        }

        let args = parse_arguments(arguments)?;
        let prefill = compose_prefill(&args);

        Ok(ToolCallResult {
            content: vec![ToolContent::Text {
                text: tool::acknowledgement(args.form_type),
            }],
            structured_content: prefill,
        })
    }

    /// Reads a resource by URI. Only the widget exists.
    pub async fn read_resource(&self, uri: &str) -> Result<ResourceContents, RegistryError> {
        if uri != WIDGET_URI {
            return Err(RegistryError::UnknownResource(uri.to_string()));
        }

        Ok(ResourceContents {
            uri: uri.to_string(),
            mime_type: WIDGET_MIME_TYPE,
            text: resource::load_widget(&self.widget_path).await,
        })
    }
}

// Applies the declared input schema before the tool body sees anything.
fn parse_arguments(arguments: Option<Value>) -> Result<ToolInvocationArgs, RegistryError> {
    let args = match arguments {
        None | Some(Value::Null) => ToolInvocationArgs::default(),
        Some(value @ Value::Object(_)) => serde_json::from_value::<ToolInvocationArgs>(value)
            .map_err(|e| RegistryError::InvalidArguments(e.to_string()))?,
        Some(_) => {
            return Err(RegistryError::InvalidArguments(
                "expected an object".to_string(),
            ))
        }
    };

    if let Some(email) = &args.email {
        if !is_valid_email(email) {
            return Err(RegistryError::InvalidArguments(
                "email: Invalid email address".to_string(),
            ));
        }
    }

    Ok(args)
}
