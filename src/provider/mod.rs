//! Vendor adapters and provider selection.
//!
//! This module contains:
//! - The `OptionsProvider` trait that all adapters implement
//! - Concrete adapter implementations (Tradier, Massive, Yahoo)
//! - [`resolve_provider`], the factory that binds the process to exactly
//!   one adapter based on configuration
//!
//! # Provider selection
//!
//! Providers are mutually exclusive alternatives chosen once at startup,
//! not composed at runtime. Only the selected adapter is constructed, so a
//! missing credential for a non-selected vendor can never block startup.
//! There is no fallback between providers and no retry.

mod traits;

pub mod massive;
pub mod tradier;
pub mod yahoo;

pub use traits::OptionsProvider;

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::config::ProviderSettings;
use crate::errors::OptionsDataError;

use massive::MassiveProvider;
use tradier::{TradierMode, TradierProvider};
use yahoo::YahooProvider;

/// Configuration value selecting Tradier sandbox; also the default.
pub const DEFAULT_PROVIDER: &str = "tradier_sandbox";

/// The resolved provider selection.
///
/// Returned alongside the adapter by [`resolve_provider`] so callers can log
/// which vendor the process is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderMode {
    TradierSandbox,
    TradierProduction,
    Massive,
    Yahoo,
}

impl ProviderMode {
    /// The configuration string form of this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TradierSandbox => "tradier_sandbox",
            Self::TradierProduction => "tradier_production",
            Self::Massive => "massive",
            Self::Yahoo => "yahoo",
        }
    }
}

impl fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Select and construct the active provider from configuration.
///
/// Reads `settings.data_provider` (default [`DEFAULT_PROVIDER`], matched
/// case-insensitively) and constructs exactly one adapter:
///
/// - values starting with `tradier` route to [`TradierProvider`], which
///   disambiguates sandbox vs production itself and fails fast on a
///   missing access token
/// - `massive` routes to [`MassiveProvider`] (credential checked lazily
///   at first fetch)
/// - `yahoo` routes to [`YahooProvider`] (no credential)
/// - anything else is an [`OptionsDataError::Configuration`] naming the
///   invalid value and the accepted set
///
/// Idempotent: resolving twice with the same settings yields a consistent
/// binding.
pub fn resolve_provider(
    settings: &ProviderSettings,
) -> Result<(Arc<dyn OptionsProvider>, ProviderMode), OptionsDataError> {
    let value = settings
        .data_provider
        .as_deref()
        .unwrap_or(DEFAULT_PROVIDER)
        .trim()
        .to_lowercase();

    let (provider, mode): (Arc<dyn OptionsProvider>, ProviderMode) =
        if value.starts_with("tradier") {
            let provider = TradierProvider::new(&value, settings)?;
            let mode = match provider.mode() {
                TradierMode::Sandbox => ProviderMode::TradierSandbox,
                TradierMode::Production => ProviderMode::TradierProduction,
            };
            (Arc::new(provider), mode)
        } else {
            match value.as_str() {
                "massive" => (Arc::new(MassiveProvider::new(settings)), ProviderMode::Massive),
                "yahoo" => (Arc::new(YahooProvider::new()), ProviderMode::Yahoo),
                _ => return Err(OptionsDataError::Configuration { value }),
            }
        };

    debug!("resolved options data provider: {}", mode);
    Ok((provider, mode))
}
