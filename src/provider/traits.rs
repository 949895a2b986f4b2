//! Options provider trait definition.
//!
//! This module defines the core `OptionsProvider` trait that all
//! vendor adapters must implement.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::OptionsDataError;
use crate::models::OptionContract;

/// Trait for options-chain data providers.
///
/// Implement this trait to add support for a new vendor. Adapters are
/// stateless aside from connection parameters resolved once at construction;
/// `fetch_chain` applied twice against identical vendor responses yields
/// equal result sequences.
///
/// # Shared normalization policy
///
/// - A raw vendor row without a usable strike price is silently dropped.
/// - A raw vendor row whose option-type is neither `call` nor `put` is
///   silently dropped.
/// - A per-row expiry that fails to parse falls back to the requested
///   expiry rather than aborting the fetch.
/// - Vendor fields that are absent stay absent in the canonical record.
#[async_trait]
pub trait OptionsProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// A constant string like "TRADIER", "MASSIVE", "YAHOO", used for
    /// logging and error context.
    fn id(&self) -> &'static str;

    /// Fetch the full option chain (calls and puts) for one underlying and
    /// one expiration date.
    ///
    /// # Arguments
    ///
    /// * `ticker` - Underlying symbol; case-normalized to uppercase internally
    /// * `expiry` - Expiration date, formatted `YYYY-MM-DD` on the wire
    ///
    /// # Returns
    ///
    /// The normalized contracts in the vendor's row order, or an
    /// `OptionsDataError` on failure. An empty chain is an empty `Vec`,
    /// not an error.
    async fn fetch_chain(
        &self,
        ticker: &str,
        expiry: NaiveDate,
    ) -> Result<Vec<OptionContract>, OptionsDataError>;
}
