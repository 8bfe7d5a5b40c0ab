use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;

/// Country used when the caller does not name one.
pub const DEFAULT_COUNTRY: &str = "United States";

// Card product the applicant is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormType {
    Rewards,
    Cashback,
    Travel,
    Premium,
    Student,
}

impl FormType {
    pub const ALL: [FormType; 5] = [
        FormType::Rewards,
        FormType::Cashback,
        FormType::Travel,
        FormType::Premium,
        FormType::Student,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Rewards => "rewards",
            FormType::Cashback => "cashback",
            FormType::Travel => "travel",
            FormType::Premium => "premium",
            FormType::Student => "student",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Retired,
    Student,
    Other,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 5] = [
        EmploymentStatus::Employed,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::Retired,
        EmploymentStatus::Student,
        EmploymentStatus::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::SelfEmployed => "self-employed",
            EmploymentStatus::Retired => "retired",
            EmploymentStatus::Student => "student",
            EmploymentStatus::Other => "other",
        }
    }
}

/// Arguments accepted by the `open_application_form` tool.
///
/// Every field is optional. Unknown keys are ignored rather than rejected so
/// callers can send a wider object than the tool cares about.
///
/// Keep the field list in lockstep with [`PrefillPayload`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInvocationArgs {
    pub form_type: Option<FormType>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    /// Kept as the caller's JSON number so `1200` stays `1200`.
    pub annual_income: Option<Number>,
    pub employment_status: Option<EmploymentStatus>,
}

/// Structured pre-fill handed back to the widget.
///
/// All keys are always serialized; missing values go out as `null`, except
/// `country` which always carries a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrefillPayload {
    pub form_type: Option<FormType>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub address: Option<String>,
    pub zip_code: Option<String>,
    pub annual_income: Option<Number>,
    pub employment_status: Option<EmploymentStatus>,
}
