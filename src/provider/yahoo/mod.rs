//! Yahoo Finance options-chain provider.
//!
//! Fetches chains from the public Yahoo Finance options endpoint. No
//! credentials are required. Unlike the other adapters, the requested expiry
//! is strictly validated against the vendor's published expiration list
//! before any chain data is fetched, and the vendor supplies no greeks
//! beyond implied volatility.

mod models;

use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use reqwest::{header, Client};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use urlencoding::encode;

use crate::errors::OptionsDataError;
use crate::models::{GreeksSource, OptionContract, OptionType};
use crate::provider::OptionsProvider;

use models::{YahooContractRow, YahooOptionChainResult, YahooOptionsBlock, YahooOptionsResponse};

const BASE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/options";
const PROVIDER_ID: &str = "YAHOO";

/// Fixed HTTP request timeout; there is no configurable override.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Yahoo Finance options-chain provider.
pub struct YahooProvider {
    client: Client,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, OptionsDataError> {
        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
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
        serde_json::from_str(&text).map_err(|e| OptionsDataError::Parse {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })
    }

    /// Fetch the options payload for a ticker, optionally scoped to one
    /// expiration timestamp.
    async fn fetch_result(
        &self,
        ticker: &str,
        date: Option<i64>,
    ) -> Result<YahooOptionChainResult, OptionsDataError> {
        let url = match date {
            Some(ts) => format!("{}/{}?date={}", BASE_URL, encode(ticker), ts),
            None => format!("{}/{}", BASE_URL, encode(ticker)),
        };

        let parsed: YahooOptionsResponse = self.fetch_json(&url).await?;
        parsed
            .option_chain
            .result
            .into_iter()
            .next()
            .ok_or_else(|| OptionsDataError::Parse {
                provider: PROVIDER_ID.to_string(),
                message: format!("empty optionChain result for {}", ticker),
            })
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Map the vendor's float-typed count fields to integers, treating the
/// not-a-number sentinel as absent rather than zero.
fn maybe_int(value: Option<f64>) -> Option<u64> {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v as u64)
}

/// Normalize one calls/puts table row. Returns `None` when the row has no
/// usable strike.
fn normalize_row(
    row: YahooContractRow,
    option_type: OptionType,
    ticker: &str,
    expiry: NaiveDate,
) -> Option<OptionContract> {
    let strike = row
        .strike
        .filter(|v| v.is_finite())
        .and_then(Decimal::from_f64_retain)?;

    // This vendor's chain rows carry no delta/gamma/theta/vega, so provenance
    // hinges on implied volatility alone.
    let implied_vol = row.implied_volatility.filter(|v| v.is_finite());
    let greeks_source = if implied_vol.is_some() {
        GreeksSource::Vendor
    } else {
        GreeksSource::None
    };

    Some(OptionContract {
        underlying: ticker.to_string(),
        option_ticker: row.contract_symbol.unwrap_or_default(),
        option_type,
        expiry,
        strike,
        bid: row.bid.and_then(Decimal::from_f64_retain),
        ask: row.ask.and_then(Decimal::from_f64_retain),
        last: row.last_price.and_then(Decimal::from_f64_retain),
        volume: maybe_int(row.volume),
        open_interest: maybe_int(row.open_interest),
        delta: None,
        gamma: None,
        theta: None,
        vega: None,
        implied_vol,
        greeks_source,
    })
}

/// Normalize one expiration's tables: calls in vendor order, then puts.
fn normalize_block(
    block: YahooOptionsBlock,
    ticker: &str,
    expiry: NaiveDate,
) -> Vec<OptionContract> {
    let mut contracts = Vec::with_capacity(block.calls.len() + block.puts.len());

    for (i, row) in block.calls.into_iter().enumerate() {
        match normalize_row(row, OptionType::Call, ticker, expiry) {
            Some(contract) => contracts.push(contract),
            None => warn!("skipping Yahoo call row {}: no strike price", i),
        }
    }
    for (i, row) in block.puts.into_iter().enumerate() {
        match normalize_row(row, OptionType::Put, ticker, expiry) {
            Some(contract) => contracts.push(contract),
            None => warn!("skipping Yahoo put row {}: no strike price", i),
        }
    }

    contracts
}

fn timestamp_to_date(ts: i64) -> Option<NaiveDate> {
    Utc.timestamp_opt(ts, 0).single().map(|dt| dt.date_naive())
}

#[async_trait]
impl OptionsProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_chain(
        &self,
        ticker: &str,
        expiry: NaiveDate,
    ) -> Result<Vec<OptionContract>, OptionsDataError> {
        let ticker = ticker.trim().to_uppercase();

        debug!("fetching Yahoo expirations for {}", ticker);
        let listing = self.fetch_result(&ticker, None).await?;

        // The requested expiry must be one of the vendor's published
        // expirations; violation fails before any chain data is fetched.
        let matching_ts = listing
            .expiration_dates
            .iter()
            .copied()
            .find(|ts| timestamp_to_date(*ts) == Some(expiry));

        let Some(ts) = matching_ts else {
            return Err(OptionsDataError::Validation {
                message: format!(
                    "Expiration {} is not in the Yahoo options list for {}",
                    expiry.format("%Y-%m-%d"),
                    ticker
                ),
            });
        };

        debug!("fetching Yahoo chain for {} expiring {}", ticker, expiry);
        let chain = self.fetch_result(&ticker, Some(ts)).await?;
        let block = chain.options.into_iter().next().unwrap_or_default();

        Ok(normalize_block(block, &ticker, expiry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn requested_expiry() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
    }

    fn row_with_strike(strike: f64) -> YahooContractRow {
        YahooContractRow {
            strike: Some(strike),
            ..YahooContractRow::default()
        }
    }

    #[test]
    fn test_timestamp_to_date() {
        // 2024-06-21 00:00:00 UTC
        assert_eq!(timestamp_to_date(1718928000), Some(requested_expiry()));
    }

    #[test]
    fn test_normalize_row_maps_quote_fields() {
        let row = YahooContractRow {
            contract_symbol: Some("AAPL240621C00150000".to_string()),
            strike: Some(150.0),
            bid: Some(5.0),
            ask: Some(5.2),
            last_price: Some(5.1),
            volume: Some(1200.0),
            open_interest: Some(5400.0),
            implied_volatility: Some(0.25),
        };
        let contract = normalize_row(row, OptionType::Call, "AAPL", requested_expiry()).unwrap();

        assert_eq!(contract.underlying, "AAPL");
        assert_eq!(contract.option_ticker, "AAPL240621C00150000");
        assert_eq!(contract.strike, dec!(150));
        assert_eq!(contract.bid, Some(dec!(5.0)));
        assert_eq!(contract.last, Some(dec!(5.1)));
        assert_eq!(contract.volume, Some(1200));
        assert_eq!(contract.open_interest, Some(5400));
        assert_eq!(contract.implied_vol, Some(0.25));
        assert_eq!(contract.greeks_source, GreeksSource::Vendor);
    }

    #[test]
    fn test_nan_implied_vol_means_no_vendor_greeks() {
        let row = YahooContractRow {
            implied_volatility: Some(f64::NAN),
            ..row_with_strike(150.0)
        };
        let contract = normalize_row(row, OptionType::Call, "AAPL", requested_expiry()).unwrap();
        assert_eq!(contract.implied_vol, None);
        assert_eq!(contract.greeks_source, GreeksSource::None);
    }

    #[test]
    fn test_greeks_are_never_populated() {
        let row = YahooContractRow {
            implied_volatility: Some(0.3),
            ..row_with_strike(150.0)
        };
        let contract = normalize_row(row, OptionType::Put, "AAPL", requested_expiry()).unwrap();
        assert_eq!(contract.delta, None);
        assert_eq!(contract.gamma, None);
        assert_eq!(contract.theta, None);
        assert_eq!(contract.vega, None);
        assert_eq!(contract.greeks_source, GreeksSource::Vendor);
    }

    #[test]
    fn test_maybe_int_tolerates_nan_sentinel() {
        assert_eq!(maybe_int(Some(f64::NAN)), None);
        assert_eq!(maybe_int(Some(42.0)), Some(42));
        assert_eq!(maybe_int(None), None);
    }

    #[test]
    fn test_row_without_strike_is_dropped() {
        let row = YahooContractRow::default();
        assert!(normalize_row(row, OptionType::Call, "AAPL", requested_expiry()).is_none());

        let row = YahooContractRow {
            strike: Some(f64::NAN),
            ..YahooContractRow::default()
        };
        assert!(normalize_row(row, OptionType::Call, "AAPL", requested_expiry()).is_none());
    }

    #[test]
    fn test_block_order_is_calls_then_puts() {
        let block = YahooOptionsBlock {
            calls: vec![row_with_strike(150.0), row_with_strike(155.0)],
            puts: vec![row_with_strike(140.0)],
        };
        let contracts = normalize_block(block, "AAPL", requested_expiry());

        assert_eq!(contracts.len(), 3);
        assert_eq!(contracts[0].option_type, OptionType::Call);
        assert_eq!(contracts[0].strike, dec!(150));
        assert_eq!(contracts[1].option_type, OptionType::Call);
        assert_eq!(contracts[2].option_type, OptionType::Put);
        assert_eq!(contracts[2].strike, dec!(140));
    }

    #[test]
    fn test_block_excludes_exactly_the_strikeless_rows() {
        let block = YahooOptionsBlock {
            calls: vec![row_with_strike(150.0), YahooContractRow::default()],
            puts: vec![YahooContractRow::default(), row_with_strike(140.0)],
        };
        let contracts = normalize_block(block, "AAPL", requested_expiry());
        assert_eq!(contracts.len(), 2);
    }
}
