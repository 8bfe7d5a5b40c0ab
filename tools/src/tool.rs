use form_core::{EmploymentStatus, FormType, PrefillPayload};
use serde::Serialize;
use serde_json::{json, Value};

use crate::resource::WIDGET_URI;

pub const OPEN_FORM_TOOL: &str = "open_application_form";

/// Entry returned from `tools/list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    #[serde(rename = "_meta")]
    pub meta: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    Text { text: String },
}

/// Result of a successful `tools/call`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    pub content: Vec<ToolContent>,
    pub structured_content: PrefillPayload,
}

pub(crate) fn open_form_descriptor() -> ToolDescriptor {
    ToolDescriptor {
        name: OPEN_FORM_TOOL,
        title: "Open Application Form",
        description: "Opens an embedded application form widget and optionally pre-fills user details.",
        input_schema: input_schema(),
        meta: json!({
            "openai/outputTemplate": WIDGET_URI,
            "openai/toolInvocation/invoking": "Opening application form...",
            "openai/toolInvocation/invoked": "Application form is ready. You can review and edit the details.",
        }),
    }
}

// Mirrors ToolInvocationArgs. Nothing is required.
fn input_schema() -> Value {
    let form_types: Vec<&str> = FormType::ALL.iter().map(FormType::as_str).collect();
    let statuses: Vec<&str> = EmploymentStatus::ALL.iter().map(EmploymentStatus::as_str).collect();
    json!({
        "type": "object",
        "properties": {
            "formType": { "type": "string", "enum": form_types },
            "firstName": { "type": "string" },
            "lastName": { "type": "string" },
            "email": { "type": "string", "format": "email" },
            "phone": { "type": "string" },
            "country": { "type": "string" },
            "city": { "type": "string" },
            "state": { "type": "string" },
            "address": { "type": "string" },
            "zipCode": { "type": "string" },
            "annualIncome": { "type": "number" },
            "employmentStatus": { "type": "string", "enum": statuses },
        },
        "$schema": "http://json-schema.org/draft-07/schema#",
    })
}

pub(crate) fn acknowledgement(form_type: Option<FormType>) -> String {
    match form_type {
        Some(form_type) => format!(
            "Opened the application form for {form_type}. Details will be prefilled when available."
        ),
        None => "Opened the application form. Details will be prefilled when available.".to_string(),
    }
}
