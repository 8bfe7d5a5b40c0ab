//! Domain layer for the application form service.
//!
//! Everything in here is synchronous and free of I/O: the gateway and the
//! tool registry call into it per request.

pub mod error;
pub mod prefill;
pub mod submission;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use prefill::compose_prefill;
pub use submission::{generate_application_id, ApplicationSummary, SubmissionRecord};
pub use types::{EmploymentStatus, FormType, PrefillPayload, ToolInvocationArgs, DEFAULT_COUNTRY};
pub use validation::{is_valid_email, validate_submission, ValidatedSubmission, REQUIRED_FIELDS};
