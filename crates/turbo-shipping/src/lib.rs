//! Shipping rate estimation for TurboCommerce storefronts.
//!
//! This crate provides:
//!
//! - **Rates**: the rate table policy and a pure quote engine
//! - **Calculator**: a stateful session that quotes after a simulated latency
//! - **Domain types**: destinations, parcels, zones and money
//!
//! # Example
//!
//! ```rust
//! use turbo_shipping::prelude::*;
//!
//! let destination = Destination::new("90210").unwrap();
//! let parcel = Parcel::new(4.0).unwrap();
//!
//! let options = quote(&destination, parcel);
//! let prices: Vec<i64> = options.iter().map(|o| o.price_units()).collect();
//! assert_eq!(prices, vec![15, 27, 38]);
//! ```

pub mod calculator;
pub mod destination;
pub mod error;
pub mod money;
pub mod rates;

pub use error::ShippingError;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::ShippingError;
    pub use crate::money::{Currency, Money};

    pub use crate::destination::{Destination, Parcel, ZoneClass};

    pub use crate::rates::{quote, QuoteEngine, QuoteOption, QuoteSet, RateTable, ShippingTier};

    pub use crate::calculator::{
        CalculatorConfig, CalculatorPhase, CalculatorSession, InFlightPolicy, SessionSnapshot,
    };
}
