//! Error types for the options-chain data crate.

use thiserror::Error;

/// Errors that can occur while selecting a provider or fetching a chain.
///
/// All variants are fatal for the operation that produced them: there is no
/// internal retry, backoff, or fallback to another provider. Row-level defects
/// in vendor payloads (missing strike, unknown option type, unparseable
/// per-row expiry) are not errors; adapters filter or default those rows.
#[derive(Error, Debug)]
pub enum OptionsDataError {
    /// The configured provider value is not one of the accepted set.
    #[error("Unknown data provider: {value}. Expected one of: tradier_sandbox, tradier_production, massive, yahoo")]
    Configuration {
        /// The unrecognized configuration value
        value: String,
    },

    /// A required vendor credential is absent.
    ///
    /// Raised at construction time for Tradier (fail fast) and at first
    /// fetch for Massive (lazy).
    #[error("Missing credential {name} for provider {provider}")]
    MissingCredential {
        /// The provider that requires the credential
        provider: String,
        /// The environment variable name(s) that were consulted
        name: String,
    },

    /// Caller-supplied arguments failed a vendor-specific precondition.
    #[error("Validation failed: {message}")]
    Validation {
        /// Description of the precondition violation
        message: String,
    },

    /// A vendor HTTP call returned a non-success status.
    #[error("Upstream error from {provider}: HTTP {status}: {body}")]
    Upstream {
        /// The provider whose endpoint failed
        provider: String,
        /// HTTP status code
        status: u16,
        /// Response body, carried verbatim
        body: String,
    },

    /// A vendor payload could not be deserialized.
    #[error("Failed to parse {provider} response: {message}")]
    Parse {
        /// The provider whose payload failed to parse
        provider: String,
        /// The deserialization failure
        message: String,
    },

    /// A network error occurred while communicating with a vendor,
    /// including the fixed per-request timeout firing.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}
