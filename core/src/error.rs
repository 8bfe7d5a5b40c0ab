use thiserror::Error;

/// Why a submission was turned away.
///
/// The `Display` text is what the caller sees, so keep it actionable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Annual income must be a positive number")]
    InvalidIncome,
}
