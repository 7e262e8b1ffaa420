//! Error types and handling for `Packwise`

use thiserror::Error;

/// Main error type for the `Packwise` application
#[derive(Error, Debug)]
pub enum PackwiseError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Backend communication errors
    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Persistent storage errors
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// A trip or record that does not exist
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// JSON encoding or decoding errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PackwiseError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
            status: None,
        }
    }

    /// Create a new API error for a non-success HTTP status
    pub fn api_status<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Api {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn not_found<S: Into<String>>(what: S) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PackwiseError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            PackwiseError::Api { .. } => {
                "Unable to reach the wardrobe backend. Please check your connection.".to_string()
            }
            PackwiseError::Validation { message } => format!("Invalid input: {message}"),
            PackwiseError::Storage { .. } => {
                "Local storage failed. You may need to clear the data directory.".to_string()
            }
            PackwiseError::NotFound { what } => format!("Not found: {what}"),
            PackwiseError::Serialization { .. } => {
                "Received data in an unexpected format.".to_string()
            }
            PackwiseError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for PackwiseError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::api_status(status.as_u16(), err.to_string()),
            None => Self::api(err.to_string()),
        }
    }
}

impl From<reqwest_middleware::Error> for PackwiseError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(inner) => inner.into(),
            other => Self::api(other.to_string()),
        }
    }
}

impl From<fjall::Error> for PackwiseError {
    fn from(err: fjall::Error) -> Self {
        Self::storage(err.to_string())
    }
}
