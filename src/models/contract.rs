use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Call/put classification of an option contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Parse a vendor option-type field.
    ///
    /// Only the exact values `call` and `put` are accepted; anything else
    /// returns `None` and the caller drops the row.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "call" => Some(Self::Call),
            "put" => Some(Self::Put),
            _ => None,
        }
    }

    /// The lowercase wire form of this option type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Put => "put",
        }
    }
}

/// Provenance of the analytic greeks on a contract.
///
/// `Model` is reserved for a locally-computed path and is never produced by
/// the current adapters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GreeksSource {
    Vendor,
    Model,
    #[default]
    None,
}

/// Normalized representation of one tradable option instrument, regardless
/// of which vendor supplied it.
///
/// Instances are immutable, constructed fresh per fetch, and have no
/// persistent identity. Optional fields are absent (not zero) when the vendor
/// did not supply them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OptionContract {
    /// Uppercase ticker symbol of the underlying security.
    pub underlying: String,

    /// Vendor-assigned instrument identifier (OCC-style symbol).
    /// Not validated as non-empty; consumers drop unidentifiable records.
    pub option_ticker: String,

    /// Call or put.
    pub option_type: OptionType,

    /// Contract expiration date.
    pub expiry: NaiveDate,

    /// Strike price. Rows without a usable strike are never constructed.
    pub strike: Decimal,

    /// Best bid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid: Option<Decimal>,

    /// Best ask.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask: Option<Decimal>,

    /// Last trade price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<Decimal>,

    /// Trading volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<u64>,

    /// Open interest.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_interest: Option<u64>,

    /// Greek: delta.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,

    /// Greek: gamma.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,

    /// Greek: theta.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,

    /// Greek: vega.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vega: Option<f64>,

    /// Implied volatility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implied_vol: Option<f64>,

    /// Where the greeks/IV came from.
    pub greeks_source: GreeksSource,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_contract() -> OptionContract {
        OptionContract {
            underlying: "AAPL".to_string(),
            option_ticker: "AAPL240621C00150000".to_string(),
            option_type: OptionType::Call,
            expiry: NaiveDate::from_ymd_opt(2024, 6, 21).unwrap(),
            strike: dec!(150),
            bid: None,
            ask: None,
            last: None,
            volume: None,
            open_interest: None,
            delta: None,
            gamma: None,
            theta: None,
            vega: None,
            implied_vol: None,
            greeks_source: GreeksSource::None,
        }
    }

    #[test]
    fn test_option_type_parse_accepts_exact_values_only() {
        assert_eq!(OptionType::parse("call"), Some(OptionType::Call));
        assert_eq!(OptionType::parse("put"), Some(OptionType::Put));
        assert_eq!(OptionType::parse("CALL"), None);
        assert_eq!(OptionType::parse("straddle"), None);
        assert_eq!(OptionType::parse(""), None);
    }

    #[test]
    fn test_option_type_serde_lowercase() {
        assert_eq!(serde_json::to_string(&OptionType::Call).unwrap(), "\"call\"");
        assert_eq!(serde_json::to_string(&OptionType::Put).unwrap(), "\"put\"");
    }

    #[test]
    fn test_greeks_source_defaults_to_none() {
        assert_eq!(GreeksSource::default(), GreeksSource::None);
        assert_eq!(serde_json::to_string(&GreeksSource::Vendor).unwrap(), "\"vendor\"");
        assert_eq!(serde_json::to_string(&GreeksSource::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_absent_fields_are_skipped_in_serialization() {
        let contract = sample_contract();
        let json = serde_json::to_string(&contract).unwrap();
        assert!(!json.contains("\"bid\""));
        assert!(!json.contains("\"delta\""));
        assert!(json.contains("\"strike\""));
        assert!(json.contains("\"greeks_source\":\"none\""));
    }

    #[test]
    fn test_contract_round_trip() {
        let contract = OptionContract {
            bid: Some(dec!(5.0)),
            ask: Some(dec!(5.2)),
            volume: Some(1200),
            delta: Some(0.6),
            implied_vol: Some(0.25),
            greeks_source: GreeksSource::Vendor,
            ..sample_contract()
        };
        let json = serde_json::to_string(&contract).unwrap();
        let back: OptionContract = serde_json::from_str(&json).unwrap();
        assert_eq!(back, contract);
    }
}
