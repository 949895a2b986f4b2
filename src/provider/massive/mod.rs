//! Massive options-chain provider implementation.
//!
//! Fetches per-underlying option snapshots from Massive's REST API. The
//! endpoint is filtered by contract type, so one fetch issues two requests:
//! calls first, then puts, concatenated in that order.
//!
//! # API Endpoint
//!
//! - Snapshot: `GET {base}/v3/snapshot/options/{TICKER}?contract_type={call|put}&expiration_date={YYYY-MM-DD}&limit=200&sort=strike_price&order=asc&apiKey={key}`
//!
//! # Response Format
//!
//! Snapshot rows are loosely shaped: the same logical value may appear under
//! several field names or sub-objects across API versions, so normalization
//! null-coalesces in a fixed priority order per field.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{header, Client};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::config::{ProviderSettings, MASSIVE_API_KEY_VAR, POLYGON_API_KEY_VAR};
use crate::errors::OptionsDataError;
use crate::models::{GreeksSource, OptionContract, OptionType};
use crate::provider::OptionsProvider;

const BASE_URL: &str = "https://api.massive.com";
const PROVIDER_ID: &str = "MASSIVE";

/// Fixed HTTP request timeout; there is no configurable override.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Result-count cap per snapshot request.
const SNAPSHOT_LIMIT: u32 = 200;

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from the per-underlying snapshot endpoint.
#[derive(Debug, Deserialize)]
struct SnapshotResponse {
    #[serde(default)]
    results: Vec<SnapshotRow>,
}

/// One snapshot row. Every field is optional; normalization decides which
/// of the alternative locations wins.
#[derive(Debug, Default, Deserialize)]
struct SnapshotRow {
    details: Option<RowDetails>,
    underlying_asset: Option<UnderlyingAsset>,
    day: Option<DayStats>,
    greeks: Option<SnapshotGreeks>,
    implied_volatility: Option<f64>,
    open_interest: Option<u64>,
    last_quote: Option<LastQuote>,
    last_trade: Option<LastTrade>,
}

#[derive(Debug, Default, Deserialize)]
struct RowDetails {
    ticker: Option<String>,
    /// Alternate name for the contract identifier.
    symbol: Option<String>,
    underlying_ticker: Option<String>,
    expiration_date: Option<String>,
    strike_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct UnderlyingAsset {
    ticker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct DayStats {
    volume: Option<u64>,
    /// Abbreviated volume field used by some snapshot versions.
    v: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct SnapshotGreeks {
    delta: Option<f64>,
    gamma: Option<f64>,
    theta: Option<f64>,
    vega: Option<f64>,
    iv: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct LastQuote {
    bid: Option<f64>,
    bid_price: Option<f64>,
    ask: Option<f64>,
    ask_price: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct LastTrade {
    price: Option<f64>,
    p: Option<f64>,
}

// ============================================================================
// Massive Provider
// ============================================================================

/// Massive options-chain provider.
///
/// The API key is resolved once at construction (`MASSIVE_API_KEY`, then the
/// legacy `POLYGON_API_KEY`), but its presence is only enforced at fetch
/// time: selecting Massive without a key must not block startup.
pub struct MassiveProvider {
    client: Client,
    api_key: Option<String>,
}

impl MassiveProvider {
    /// Create a Massive provider from settings. Never fails; the credential
    /// check is deferred to the first fetch.
    pub fn new(settings: &ProviderSettings) -> Self {
        let api_key = settings
            .massive_api_key
            .clone()
            .or_else(|| settings.polygon_api_key.clone());

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, api_key }
    }

    fn require_key(&self) -> Result<&str, OptionsDataError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| OptionsDataError::MissingCredential {
                provider: PROVIDER_ID.to_string(),
                name: format!("{} / {}", MASSIVE_API_KEY_VAR, POLYGON_API_KEY_VAR),
            })
    }

    /// Fetch and normalize one side (calls or puts) of the chain.
    async fn fetch_side(
        &self,
        ticker: &str,
        expiry: NaiveDate,
        side: OptionType,
    ) -> Result<Vec<OptionContract>, OptionsDataError> {
        let key = self.require_key()?;
        let url = format!("{}/v3/snapshot/options/{}", BASE_URL, encode(ticker));
        let expiration = expiry.format("%Y-%m-%d").to_string();
        let limit = SNAPSHOT_LIMIT.to_string();

        debug!("fetching Massive {} snapshot for {} expiring {}", side.as_str(), ticker, expiration);

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .query(&[
                ("contract_type", side.as_str()),
                ("expiration_date", expiration.as_str()),
                ("limit", limit.as_str()),
                ("sort", "strike_price"),
                ("order", "asc"),
                ("apiKey", key),
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
        let parsed: SnapshotResponse =
            serde_json::from_str(&text).map_err(|e| OptionsDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })?;

        let mut contracts = Vec::with_capacity(parsed.results.len());
        for (i, row) in parsed.results.into_iter().enumerate() {
            match normalize_row(row, side, ticker, expiry) {
                Some(contract) => contracts.push(contract),
                None => warn!("skipping Massive {} row {}: no strike price", side.as_str(), i),
            }
        }

        Ok(contracts)
    }
}

/// Normalize one snapshot row for the given side. Returns `None` when the
/// row has no usable strike. The option type is the requested side: the
/// endpoint is already filtered by `contract_type`.
fn normalize_row(
    row: SnapshotRow,
    side: OptionType,
    ticker: &str,
    requested_expiry: NaiveDate,
) -> Option<OptionContract> {
    let details = row.details.unwrap_or_default();

    let strike = details.strike_price.and_then(Decimal::from_f64_retain)?;

    // First non-null wins, in fixed priority order per field.
    let underlying = row
        .underlying_asset
        .and_then(|u| u.ticker)
        .or(details.underlying_ticker)
        .unwrap_or_else(|| ticker.to_string());

    let option_ticker = details.ticker.or(details.symbol).unwrap_or_default();

    let expiry = details
        .expiration_date
        .as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .unwrap_or(requested_expiry);

    let day = row.day.unwrap_or_default();
    let volume = day.volume.or(day.v);

    let greeks = row.greeks.unwrap_or_default();
    let iv = row.implied_volatility.or(greeks.iv);
    let greeks_source = if greeks.delta.is_some() && iv.is_some() {
        GreeksSource::Vendor
    } else {
        GreeksSource::None
    };

    let quote = row.last_quote.unwrap_or_default();
    let trade = row.last_trade.unwrap_or_default();

    Some(OptionContract {
        underlying,
        option_ticker,
        option_type: side,
        expiry,
        strike,
        bid: quote.bid.or(quote.bid_price).and_then(Decimal::from_f64_retain),
        ask: quote.ask.or(quote.ask_price).and_then(Decimal::from_f64_retain),
        last: trade.price.or(trade.p).and_then(Decimal::from_f64_retain),
        volume,
        open_interest: row.open_interest,
        delta: greeks.delta,
        gamma: greeks.gamma,
        theta: greeks.theta,
        vega: greeks.vega,
        implied_vol: iv,
        greeks_source,
    })
}

#[async_trait]
impl OptionsProvider for MassiveProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_chain(
        &self,
        ticker: &str,
        expiry: NaiveDate,
    ) -> Result<Vec<OptionContract>, OptionsDataError> {
        let ticker = ticker.trim().to_uppercase();

        // Calls then puts; a failure on either side aborts the whole fetch
        // before concatenation, so no partial chain is ever returned.
        let mut contracts = self.fetch_side(&ticker, expiry, OptionType::Call).await?;
        let puts = self.fetch_side(&ticker, expiry, OptionType::Put).await?;
        contracts.extend(puts);

        Ok(contracts)
    }
}
