//! Error types for the prodir directory service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for every prodir crate.
///
/// The first five variants form the taxonomy surfaced to callers of the
/// profile operations. The remaining ones are raised by infrastructure and
/// are treated as persistence failures at the HTTP boundary.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ProdirError {
    /// The operation requires a resolved caller identity and none was given.
    #[error("{0}")]
    Unauthenticated(String),

    /// A lookup was issued with an unusable query.
    #[error("{0}")]
    InvalidQuery(String),

    /// Field-level validation failures, aggregated.
    #[error("{}", .messages.join(", "))]
    Validation { messages: Vec<String> },

    /// Entity not found error with type information
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Storage read/write failure (repository layer)
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProdirError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Unauthenticated error
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated(message.into())
    }

    /// Creates an InvalidQuery error
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    /// Creates a Validation error from a list of field messages
    pub fn validation<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Persistence error
    pub fn persistence(message: impl Into<String>) -> Self {
        Self::Persistence(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an Unauthenticated error
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated(_))
    }

    /// Check if this is an InvalidQuery error
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Self::InvalidQuery(_))
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error belongs to the persistence class.
    ///
    /// Io, serialization, config and internal failures all originate below the
    /// operations engine and are reported to callers the same way.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Persistence(_)
                | Self::Io { .. }
                | Self::Serialization { .. }
                | Self::Config(_)
                | Self::Internal(_)
        )
    }

    /// HTTP status code the boundary layer reports for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated(_) => 401,
            Self::InvalidQuery(_) | Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            _ => 500,
        }
    }

    /// Message of the underlying failure, without the variant prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::Persistence(message)
            | Self::Config(message)
            | Self::Internal(message)
            | Self::Io { message } => message.clone(),
            Self::Serialization { format, message } => format!("{format}: {message}"),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ProdirError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ProdirError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ProdirError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ProdirError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for ProdirError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, ProdirError>`.
pub type Result<T> = std::result::Result<T, ProdirError>;
