//! Tradier options-chain provider implementation.
//!
//! Fetches vendor-computed chains (including greeks) from the Tradier
//! market data API, against either the sandbox or the production endpoint.
//!
//! # API Endpoint
//!
//! - Chains: `GET {base}/markets/options/chains?symbol={TICKER}&expiration={YYYY-MM-DD}&greeks=true`
//!   with Bearer token authentication.
//!
//! # Response Format
//!
//! A nested object `{"options": {"option": [...]}}`; the list is missing or
//! null when the expiry has no contracts.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header, Client};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{
    ProviderSettings, TRADIER_PRODUCTION_TOKEN_VAR, TRADIER_SANDBOX_TOKEN_VAR,
};
use crate::errors::OptionsDataError;
use crate::models::{GreeksSource, OptionContract, OptionType};
use crate::provider::OptionsProvider;

const SANDBOX_BASE_URL: &str = "https://sandbox.tradier.com/v1";
const PRODUCTION_BASE_URL: &str = "https://api.tradier.com/v1";
const PROVIDER_ID: &str = "TRADIER";

/// Fixed HTTP request timeout; there is no configurable override.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Which Tradier endpoint the adapter is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TradierMode {
    Sandbox,
    Production,
}

impl TradierMode {
    fn base_url(&self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_BASE_URL,
            Self::Production => PRODUCTION_BASE_URL,
        }
    }

    fn token_var(&self) -> &'static str {
        match self {
            Self::Sandbox => TRADIER_SANDBOX_TOKEN_VAR,
            Self::Production => TRADIER_PRODUCTION_TOKEN_VAR,
        }
    }
}

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from the chains endpoint.
#[derive(Debug, Deserialize)]
struct ChainResponse {
    /// Null/missing when the expiry has no contracts.
    #[serde(default)]
    options: Option<OptionsRoot>,
}

#[derive(Debug, Deserialize)]
struct OptionsRoot {
    #[serde(default)]
    option: Option<Vec<ChainRow>>,
}

/// One per-contract row as returned by Tradier.
#[derive(Debug, Default, Deserialize)]
struct ChainRow {
    /// OCC option symbol
    symbol: Option<String>,
    option_type: Option<String>,
    expiration_date: Option<String>,
    strike: Option<f64>,
    bid: Option<f64>,
    ask: Option<f64>,
    last: Option<f64>,
    volume: Option<u64>,
    open_interest: Option<u64>,
    greeks: Option<ChainGreeks>,
}

/// Vendor greeks block. Tradier/ORATS publish mid_iv/bid_iv/ask_iv;
/// mid_iv is preferred over the generic iv field.
#[derive(Debug, Default, Deserialize)]
struct ChainGreeks {
    delta: Option<f64>,
    gamma: Option<f64>,
    theta: Option<f64>,
    vega: Option<f64>,
    mid_iv: Option<f64>,
    iv: Option<f64>,
}

// ============================================================================
// Tradier Provider
// ============================================================================

/// Tradier options-chain provider.
///
/// Connection parameters (endpoint, access token) are resolved once at
/// construction and reused for all calls. Construction fails fast when the
/// selected mode's token is absent: a misconfigured Tradier selection must
/// surface immediately, not on first use.
pub struct TradierProvider {
    client: Client,
    mode: TradierMode,
    token: String,
}

impl TradierProvider {
    /// Create a Tradier provider for the given configuration value.
    ///
    /// `mode_value` is the already-lowercased provider selection string; only
    /// `tradier_sandbox` and `tradier_production` are accepted here.
    pub fn new(mode_value: &str, settings: &ProviderSettings) -> Result<Self, OptionsDataError> {
        let mode = match mode_value {
            "tradier_sandbox" => TradierMode::Sandbox,
            "tradier_production" => TradierMode::Production,
            other => {
                return Err(OptionsDataError::Configuration {
                    value: other.to_string(),
                })
            }
        };

        let token = match mode {
            TradierMode::Sandbox => settings.tradier_sandbox_token.clone(),
            TradierMode::Production => settings.tradier_production_token.clone(),
        }
        .ok_or_else(|| OptionsDataError::MissingCredential {
            provider: PROVIDER_ID.to_string(),
            name: mode.token_var().to_string(),
        })?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self { client, mode, token })
    }

    /// The endpoint mode this adapter is bound to.
    pub fn mode(&self) -> TradierMode {
        self.mode
    }

    /// Normalize one vendor row. Returns `None` when the row must be dropped
    /// (unknown option type, or no usable strike).
    fn normalize_row(
        row: ChainRow,
        ticker: &str,
        requested_expiry: NaiveDate,
    ) -> Option<OptionContract> {
        let option_type = OptionType::parse(row.option_type.as_deref()?)?;
        let strike = row.strike.and_then(Decimal::from_f64_retain)?;

        let expiry = row
            .expiration_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .unwrap_or(requested_expiry);

        let greeks = row.greeks.unwrap_or_default();
        let iv = greeks.mid_iv.or(greeks.iv);
        let greeks_source = if greeks.delta.is_some() && iv.is_some() {
            GreeksSource::Vendor
        } else {
            GreeksSource::None
        };

        Some(OptionContract {
            underlying: ticker.to_string(),
            option_ticker: row.symbol.unwrap_or_default(),
            option_type,
            expiry,
            strike,
            bid: row.bid.and_then(Decimal::from_f64_retain),
            ask: row.ask.and_then(Decimal::from_f64_retain),
            last: row.last.and_then(Decimal::from_f64_retain),
            volume: row.volume,
            open_interest: row.open_interest,
            delta: greeks.delta,
            gamma: greeks.gamma,
            theta: greeks.theta,
            vega: greeks.vega,
            implied_vol: iv,
            greeks_source,
        })
    }
}

#[async_trait]
impl OptionsProvider for TradierProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_chain(
        &self,
        ticker: &str,
        expiry: NaiveDate,
    ) -> Result<Vec<OptionContract>, OptionsDataError> {
        let ticker = ticker.trim().to_uppercase();
        let expiration = expiry.format("%Y-%m-%d").to_string();
        let url = format!("{}/markets/options/chains", self.mode.base_url());

        debug!("fetching Tradier chain for {} expiring {}", ticker, expiration);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/json")
            .query(&[
                ("symbol", ticker.as_str()),
                ("expiration", expiration.as_str()),
                ("greeks", "true"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OptionsDataError::Upstream {
                provider: PROVIDER_ID.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let parsed: ChainResponse =
            serde_json::from_str(&text).map_err(|e| OptionsDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        // An empty or missing option list is an empty chain, not an error.
        let rows = parsed
            .options
            .and_then(|root| root.option)
            .unwrap_or_default();

        let mut contracts = Vec::with_capacity(rows.len());
        for (i, row) in rows.into_iter().enumerate() {
            match Self::normalize_row(row, &ticker, expiry) {
                Some(contract) => contracts.push(contract),
                None => warn!("skipping Tradier row {}: no usable strike or option type", i),
            }
        }

        Ok(contracts)
    }
}
