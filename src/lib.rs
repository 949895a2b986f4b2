//! Options-Chain Data Crate
//!
//! This crate fetches options-chain market data for one underlying ticker and
//! expiration date from one of several interchangeable vendors, and normalizes
//! the heterogeneous vendor payloads into a single canonical
//! [`OptionContract`] representation.
//!
//! # Overview
//!
//! Supported providers:
//! - Tradier (sandbox and production endpoints)
//! - Massive (REST snapshot API, Polygon-compatible)
//! - Yahoo Finance (public options endpoint, no credentials)
//!
//! Exactly one provider is active per process lifetime, selected once from
//! configuration via [`resolve_provider`]. Providers are mutually exclusive
//! alternatives, never composed or used as fallbacks for each other.
//!
//! # Architecture
//!
//! ```text
//! +-------------------+
//! | ProviderSettings  |  (env-sourced configuration)
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! | resolve_provider  |  (constructs exactly one adapter)
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! | OptionsProvider   |  (Tradier, Massive, Yahoo)
//! +-------------------+
//!          |
//!          v
//! +-------------------+
//! |  OptionContract   |  (canonical normalized record)
//! +-------------------+
//! ```
//!
//! # Core Types
//!
//! - [`OptionContract`] - Canonical, vendor-independent option record
//! - [`OptionType`] - Call/put classification
//! - [`GreeksSource`] - Provenance of analytic greeks (vendor, model, none)
//! - [`OptionsProvider`] - Trait every vendor adapter implements
//! - [`ProviderMode`] - The resolved provider selection, for diagnostics
//! - [`ProviderSettings`] - Configuration surface consumed by the selector

pub mod config;
pub mod errors;
pub mod models;
pub mod provider;

// Re-export all public types from models
pub use models::{GreeksSource, OptionContract, OptionType};

// Re-export configuration and errors
pub use config::ProviderSettings;
pub use errors::OptionsDataError;

// Re-export provider types
pub use provider::massive::MassiveProvider;
pub use provider::tradier::{TradierMode, TradierProvider};
pub use provider::yahoo::YahooProvider;
pub use provider::{resolve_provider, OptionsProvider, ProviderMode};
