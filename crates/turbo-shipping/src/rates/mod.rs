//! Rates module.
//!
//! Contains the rate table policy and the quote engine built on it.

mod quote;
mod table;

pub use quote::{quote, QuoteEngine, QuoteOption, QuoteSet};
pub use table::{RateTable, ShippingTier};
