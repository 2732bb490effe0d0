use thiserror::Error;

/// Validation failures for listing fields. Every variant names the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
    #[error("status cannot change from {from} to {to}")]
    InvalidTransition { from: String, to: String },
    #[error("unknown field: {0}")]
    UnknownField(String),
}

impl ListingError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Name of the field the error refers to.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField(field) => field,
            Self::InvalidField { field, .. } => field,
            Self::InvalidTransition { .. } => "status",
            Self::UnknownField(field) => field,
        }
    }
}
