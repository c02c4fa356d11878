use thiserror::Error;

#[derive(Debug, Error)]
pub enum RentalCoreError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RentalCoreError {
    /// Shorthand for the common validation failure.
    pub fn invalid(field: &str, reason: &str) -> Self {
        RentalCoreError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for RentalCoreError {
    fn from(e: serde_json::Error) -> Self {
        RentalCoreError::SerializationError(e.to_string())
    }
}
