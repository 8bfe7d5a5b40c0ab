//! Capability declarations exposed to MCP callers: one widget resource and
//! one tool that opens it.

pub mod registry;
pub mod resource;
pub mod tool;

pub use registry::{Registry, RegistryError};
pub use resource::{
    ResourceContents, ResourceDescriptor, FALLBACK_MARKUP, WIDGET_FILE, WIDGET_MIME_TYPE, WIDGET_URI,
};
pub use tool::{ToolCallResult, ToolContent, ToolDescriptor, OPEN_FORM_TOOL};
