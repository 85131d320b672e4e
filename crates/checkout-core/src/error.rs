//! # Checkout Error Types
//!
//! Typed error handling for the checkout SDK.
//! Checkout operations return `Result<T, CheckoutError>`; script loading
//! reports the narrower `LoadFailure`.

use thiserror::Error;

/// Failure to fetch or initialise a third-party script.
///
/// Every caller that joined the same in-flight load receives a clone of the
/// same value, so this type is `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    /// The script fetch capability rejected (network or script error)
    #[error("Failed to load script {url}: {message}")]
    Script { url: String, message: String },

    /// The script loaded but did not attach the expected export
    #[error("Script {url} loaded but `{path}` is missing from the host window")]
    MissingExport { url: String, path: String },
}

impl LoadFailure {
    /// Build a fetch failure for `url`
    pub fn script(url: impl Into<String>, message: impl Into<String>) -> Self {
        LoadFailure::Script {
            url: url.into(),
            message: message.into(),
        }
    }

    /// URL of the script that failed
    pub fn url(&self) -> &str {
        match self {
            LoadFailure::Script { url, .. } | LoadFailure::MissingExport { url, .. } => url,
        }
    }
}

/// Core error type for checkout operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing storefront URL, invalid values)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Required state has not been loaded yet
    #[error("Missing data: {resource} is not available")]
    MissingData { resource: String },

    /// Storefront API answered with a non-success status
    #[error("Request failed with status {status}: {message}")]
    RequestFailed { status: u16, message: String },

    /// Network/HTTP error talking to the storefront
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded its timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Third-party script could not be loaded
    #[error(transparent)]
    ScriptLoad(#[from] LoadFailure),

    /// No shipping strategy registered under the requested name
    #[error("Shipping strategy not found: {name}")]
    StrategyNotFound { name: String },

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CheckoutError {
    /// Shorthand for a `MissingData` error
    pub fn missing(resource: impl Into<String>) -> Self {
        CheckoutError::MissingData {
            resource: resource.into(),
        }
    }

    /// Returns true if retrying the same call may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            CheckoutError::Network(_) | CheckoutError::Timeout(_) | CheckoutError::ScriptLoad(_) => {
                true
            }
            CheckoutError::RequestFailed { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for CheckoutError {
    fn from(err: serde_json::Error) -> Self {
        CheckoutError::Serialization(err.to_string())
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

crate::frozen_record!(CheckoutError, LoadFailure);
