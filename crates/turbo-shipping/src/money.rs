//! Money type for shipping prices.
//!
//! Amounts are kept in the currency's smallest unit so that quote prices,
//! which are always whole currency units, never pass through float
//! formatting on the way to the screen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies a rate table can be denominated in.
///
/// Prices are labels only; no conversion happens between currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    MXN,
    USD,
    CAD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "MXN").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::MXN => "MXN",
            Currency::USD => "USD",
            Currency::CAD => "CAD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol used in front of amounts.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::MXN | Currency::USD => "$",
            Currency::CAD => "CA$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Number of minor units per whole unit.
    pub fn minor_per_unit(&self) -> i64 {
        100
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "MXN" => Some(Currency::MXN),
            "USD" => Some(Currency::USD),
            "CAD" => Some(Currency::CAD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit (e.g., centavos).
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from whole currency units.
    ///
    /// ```
    /// use turbo_shipping::money::{Currency, Money};
    /// let price = Money::from_units(15, Currency::MXN);
    /// assert_eq!(price.amount_minor, 1500);
    /// ```
    pub fn from_units(units: i64, currency: Currency) -> Self {
        Self::new(units.saturating_mul(currency.minor_per_unit()), currency)
    }

    /// Largest whole-unit amount that fits in minor units.
    pub fn max_units(currency: Currency) -> i64 {
        i64::MAX / currency.minor_per_unit()
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Whole currency units, truncating any minor remainder.
    pub fn units(&self) -> i64 {
        self.amount_minor / self.currency.minor_per_unit()
    }

    /// Format as a display string (e.g., "$15").
    ///
    /// Minor units are only printed when the amount is fractional.
    pub fn display(&self) -> String {
        let per_unit = self.currency.minor_per_unit();
        if self.amount_minor % per_unit == 0 {
            format!("{}{}", self.currency.symbol(), self.units())
        } else {
            let decimal = self.amount_minor as f64 / per_unit as f64;
            format!("{}{:.2}", self.currency.symbol(), decimal)
        }
    }

    /// Format with the currency code appended (e.g., "$15 MXN").
    pub fn display_with_code(&self) -> String {
        format!("{} {}", self.display(), self.currency.code())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
