use thiserror::Error;

pub type Result<T> = std::result::Result<T, FincalcError>;

/// Errors raised while turning outside input into calculator parameters.
/// The formula core itself never fails.
#[derive(Debug, Error)]
pub enum FincalcError {
    #[error("invalid input: {field} {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("unknown calculator: {0}")]
    UnknownCalculator(String),

    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl FincalcError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        FincalcError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
