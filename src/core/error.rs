use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum CreditsafeError {
    /// The client could not be configured (unknown environment, unusable WSDL,
    /// invalid header or endpoint override).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The remote service rejected the request or reported a business-level failure.
    ///
    /// Raised for SOAP faults, HTTP error statuses, and error-coded `Message`
    /// elements embedded in an otherwise successful response.
    #[error("{message}")]
    Api {
        /// Human-readable description of the failure.
        message: String,
        /// The Creditsafe message code, when the failure came from an embedded message.
        code: Option<String>,
    },

    /// The network layer failed before the service could answer (DNS, connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The response did not have the expected nested structure.
    #[error("Data format unexpected or missing field: {0}")]
    MissingKey(String),

    /// A transport failure that none of the classification rules recognised.
    #[error(transparent)]
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

impl CreditsafeError {
    pub(crate) fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            code: None,
        }
    }

    /// Returns `true` if this error came from the network layer rather than the service.
    ///
    /// These are the only failures where retrying the same request may succeed.
    pub const fn is_http(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, CreditsafeError>;
