//! Destination, parcel and zone types.

use crate::error::ShippingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leading characters that mark a postal code as a remote zone.
pub const DEFAULT_REMOTE_PREFIXES: [char; 2] = ['8', '9'];

/// A postal/zip code a parcel is shipped to.
///
/// The code is opaque apart from its first character, which decides the
/// delivery zone. No format checks are applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Destination(String);

impl Destination {
    /// Create a destination, rejecting empty codes.
    pub fn new(code: impl Into<String>) -> Result<Self, ShippingError> {
        let code = code.into();
        if code.is_empty() {
            return Err(ShippingError::EmptyDestination);
        }
        Ok(Self(code))
    }

    /// Get the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Zone under the default remote prefixes.
    pub fn zone(&self) -> ZoneClass {
        ZoneClass::classify(&self.0)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Destination {
    type Error = ShippingError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Destination> for String {
    fn from(d: Destination) -> Self {
        d.0
    }
}

impl AsRef<str> for Destination {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single parcel, described by its weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Parcel {
    weight_kg: f64,
}

impl Parcel {
    /// Create a parcel. The weight must be finite and strictly positive.
    pub fn new(weight_kg: f64) -> Result<Self, ShippingError> {
        if !weight_kg.is_finite() || weight_kg <= 0.0 {
            return Err(ShippingError::InvalidWeight(weight_kg));
        }
        Ok(Self { weight_kg })
    }

    /// Weight in kilograms.
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }
}

impl TryFrom<f64> for Parcel {
    type Error = ShippingError;

    fn try_from(weight_kg: f64) -> Result<Self, Self::Error> {
        Self::new(weight_kg)
    }
}

impl From<Parcel> for f64 {
    fn from(p: Parcel) -> Self {
        p.weight_kg
    }
}

/// Delivery zone of a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ZoneClass {
    #[default]
    Standard,
    Remote,
}

impl ZoneClass {
    /// Classify a code using the default remote prefixes ('8' and '9').
    pub fn classify(code: &str) -> Self {
        Self::classify_with(code, &DEFAULT_REMOTE_PREFIXES)
    }

    /// Classify a code against an explicit set of remote prefixes.
    pub fn classify_with(code: &str, remote_prefixes: &[char]) -> Self {
        match code.chars().next() {
            Some(first) if remote_prefixes.contains(&first) => ZoneClass::Remote,
            _ => ZoneClass::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneClass::Standard => "standard",
            ZoneClass::Remote => "remote",
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, ZoneClass::Remote)
    }
}

impl fmt::Display for ZoneClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
