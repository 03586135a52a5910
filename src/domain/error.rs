use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// The persistence backend is unreachable or a query failed
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// An update targeted a negative or unknown id
    #[error("Identity error: {message}")]
    Identity { message: String },

    /// A save collided with an already persisted logical record
    #[error("Duplicate entity: {message}")]
    Duplicate { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl DomainError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn identity(message: impl Into<String>) -> Self {
        Self::Identity {
            message: message.into(),
        }
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error comes from the environment rather than from misuse
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage { .. })
    }
}
