use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::error::ValidationError;

/// Fields a submission must carry, in the order they are reported.
pub const REQUIRED_FIELDS: [&str; 12] = [
    "firstName",
    "lastName",
    "email",
    "phone",
    "formType",
    "annualIncome",
    "employmentStatus",
    "address",
    "city",
    "state",
    "zipCode",
    "country",
];

// Shape only: one "@", something before it, a dot somewhere after it.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// A submission that passed every check, lifted out of the untyped body.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub form_type: String,
    pub annual_income: f64,
    pub employment_status: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    /// The body exactly as received.
    pub raw: Map<String, Value>,
}

impl ValidatedSubmission {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_RE.is_match(candidate)
}

/// Runs the submission checks in a fixed order: presence, then email, then
/// income. The first failing stage wins.
pub fn validate_submission(body: &Map<String, Value>) -> Result<ValidatedSubmission, ValidationError> {
    let missing: Vec<&'static str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| !body.get(*field).is_some_and(is_truthy))
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    let email = match body.get("email") {
        Some(Value::String(email)) if is_valid_email(email) => email.clone(),
        _ => return Err(ValidationError::InvalidEmail),
    };

    let annual_income = match body.get("annualIncome") {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(income) if income >= 0.0 => income,
            _ => return Err(ValidationError::InvalidIncome),
        },
        _ => return Err(ValidationError::InvalidIncome),
    };

    Ok(ValidatedSubmission {
        first_name: text(body, "firstName"),
        last_name: text(body, "lastName"),
        email,
        phone: text(body, "phone"),
        form_type: text(body, "formType"),
        annual_income,
        employment_status: text(body, "employmentStatus"),
        address: text(body, "address"),
        city: text(body, "city"),
        state: text(body, "state"),
        zip_code: text(body, "zipCode"),
        country: text(body, "country"),
        raw: body.clone(),
    })
}

// null, false, 0 and "" all count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn text(body: &Map<String, Value>, field: &str) -> String {
    match body.get(field) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
