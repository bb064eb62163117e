use thiserror::Error;

/// Error taxonomy for the tool engine.
///
/// Validation variants (`UnknownOperation` through `InvalidGeometry`) are
/// always raised before any remote call is made. `ContentFiltered` is an
/// expected moderation outcome, not a defect; the dispatcher reports it
/// with its own status instead of an error.
#[derive(Debug, Error)]
pub enum ImageGenError {
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Missing required field '{field}' for operation '{operation}'")]
    MissingField { operation: String, field: String },

    #[error("Field '{field}' out of range: {message}")]
    OutOfRange { field: String, message: String },

    #[error("Conflicting fields '{first}' and '{second}': supply only one")]
    ConflictingFields { first: String, second: String },

    #[error("Unreadable image in field '{field}': {message}")]
    UnreadableImage { field: String, message: String },

    #[error("Invalid mask geometry: {0}")]
    InvalidGeometry(String),

    #[error("Content filtered: {0}")]
    ContentFiltered(String),

    #[error("Service error ({code}): {message}")]
    Service { code: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ImageGenError {
    pub fn out_of_range(field: impl Into<String>, message: impl Into<String>) -> Self {
        ImageGenError::OutOfRange {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        ImageGenError::Service {
            code: code.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImageGenError>;
