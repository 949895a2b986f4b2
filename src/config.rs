//! Configuration surface consumed by the provider selector.
//!
//! Settings are resolved once (typically at process start) and passed by
//! reference to [`resolve_provider`](crate::provider::resolve_provider).
//! Credential-file loading and secret management are the caller's concern;
//! this module only reads the process environment.

use std::env;

/// Environment variable selecting the active provider.
pub const DATA_PROVIDER_VAR: &str = "DATA_PROVIDER";
/// Tradier sandbox access token.
pub const TRADIER_SANDBOX_TOKEN_VAR: &str = "TRADIER_SANDBOX_ACCESS_TOKEN";
/// Tradier production access token.
pub const TRADIER_PRODUCTION_TOKEN_VAR: &str = "TRADIER_PRODUCTION_ACCESS_TOKEN";
/// Massive API key.
pub const MASSIVE_API_KEY_VAR: &str = "MASSIVE_API_KEY";
/// Legacy Massive API key name, kept for Polygon compatibility.
pub const POLYGON_API_KEY_VAR: &str = "POLYGON_API_KEY";

/// Provider selection and credentials, as read from the environment.
///
/// All fields are optional: which ones must be present depends on the
/// selected provider, and that enforcement lives in the adapters so that
/// unrelated missing credentials never block startup.
#[derive(Clone, Debug, Default)]
pub struct ProviderSettings {
    /// Provider selection value. Defaults to `tradier_sandbox` when unset;
    /// matched case-insensitively.
    pub data_provider: Option<String>,
    /// Access token for the Tradier sandbox endpoint.
    pub tradier_sandbox_token: Option<String>,
    /// Access token for the Tradier production endpoint.
    pub tradier_production_token: Option<String>,
    /// Massive API key.
    pub massive_api_key: Option<String>,
    /// Legacy Massive API key; `massive_api_key` wins when both are set.
    pub polygon_api_key: Option<String>,
}

impl ProviderSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self {
            data_provider: env::var(DATA_PROVIDER_VAR).ok(),
            tradier_sandbox_token: env::var(TRADIER_SANDBOX_TOKEN_VAR).ok(),
            tradier_production_token: env::var(TRADIER_PRODUCTION_TOKEN_VAR).ok(),
            massive_api_key: env::var(MASSIVE_API_KEY_VAR).ok(),
            polygon_api_key: env::var(POLYGON_API_KEY_VAR).ok(),
        }
    }
}
