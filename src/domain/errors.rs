//! Domain error types
//!
//! This module defines the error hierarchy for Careline. All errors are
//! domain-specific and don't expose third-party types. Transport-level
//! failures are classified into structured kinds exactly once, in the REST
//! adapter, so business logic never inspects HTTP wording or status text.

use thiserror::Error;

/// Main Careline error type
///
/// This is the primary error type used throughout the crate.
/// Every aggregate operation returns either a success value or one of
/// these variants; no other error type crosses the aggregate boundary.
#[derive(Debug, Error)]
pub enum CarelineError {
    /// A required field or precondition is missing; lists the field names
    /// so a caller can prompt for exactly what is absent.
    #[error("Validation failed, missing: {}", missing.join(", "))]
    Validation {
        /// Names of the missing fields or unmet gates
        missing: Vec<String>,
    },

    /// Checkout attempted on a cart with no items
    #[error("Cart is empty")]
    EmptyCart,

    /// Action attempted outside its legal state
    #[error("Cannot {action} while status is '{status}'")]
    InvalidState {
        /// The action that was refused
        action: String,
        /// The status that blocked it
        status: String,
    },

    /// No valid session; the caller should re-authenticate and retry
    #[error("Not authenticated")]
    NotAuthenticated,

    /// Referenced entity absent server-side. Read paths may treat this as
    /// an empty result; mutation paths treat it as a hard error.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network-level failure (connection refused, DNS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-2xx API response not covered by a more specific kind
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message body returned by the server
        message: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl CarelineError {
    /// Builds a `Validation` error from field names
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CarelineError::Validation {
            missing: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds an `InvalidState` error for a refused action
    pub fn invalid_state(action: impl Into<String>, status: impl ToString) -> Self {
        CarelineError::InvalidState {
            action: action.into(),
            status: status.to_string(),
        }
    }

    /// True for failures worth retrying from the UI (connectivity only)
    pub fn is_retryable(&self) -> bool {
        matches!(self, CarelineError::Transport(_))
    }
}

impl From<std::io::Error> for CarelineError {
    fn from(err: std::io::Error) -> Self {
        CarelineError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CarelineError {
    fn from(err: serde_json::Error) -> Self {
        CarelineError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CarelineError {
    fn from(err: toml::de::Error) -> Self {
        CarelineError::Configuration(format!("TOML parse error: {err}"))
    }
}
