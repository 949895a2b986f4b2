//! Yahoo Finance options API response models.
//!
//! These models parse the `v7/finance/options` endpoint, which returns the
//! published expiration list and, when a `date` parameter is supplied, the
//! calls/puts tables for that expiration.

use serde::Deserialize;

/// Main response wrapper for the options API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooOptionsResponse {
    pub option_chain: YahooOptionChain,
}

/// Option chain container
#[derive(Debug, Deserialize)]
pub struct YahooOptionChain {
    #[serde(default)]
    pub result: Vec<YahooOptionChainResult>,
    // Note: error field exists in API but we handle errors via HTTP status/empty results
}

/// Individual result from the options API
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooOptionChainResult {
    /// Published valid expirations, as unix timestamps.
    #[serde(default)]
    pub expiration_dates: Vec<i64>,
    /// Chain data for the requested expiration (empty when no `date` param).
    #[serde(default)]
    pub options: Vec<YahooOptionsBlock>,
}

/// Calls/puts tables for one expiration
#[derive(Debug, Default, Deserialize)]
pub struct YahooOptionsBlock {
    #[serde(default)]
    pub calls: Vec<YahooContractRow>,
    #[serde(default)]
    pub puts: Vec<YahooContractRow>,
}

/// One contract row from the calls or puts table.
///
/// Integer-valued fields arrive as floats so the vendor's not-a-number
/// sentinel for missing values can be tolerated.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooContractRow {
    pub contract_symbol: Option<String>,
    pub strike: Option<f64>,
    pub bid: Option<f64>,
    pub ask: Option<f64>,
    pub last_price: Option<f64>,
    pub volume: Option<f64>,
    pub open_interest: Option<f64>,
    pub implied_volatility: Option<f64>,
}
