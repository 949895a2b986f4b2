//! Canonical data model for normalized option contracts.
//!
//! - `contract` - The vendor-independent [`OptionContract`] record plus the
//!   [`OptionType`] and [`GreeksSource`] enumerations.

mod contract;

pub use contract::{GreeksSource, OptionContract, OptionType};
