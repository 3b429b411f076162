//! Shipping error types.

use thiserror::Error;

/// Errors that can occur while preparing a shipping quote.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShippingError {
    /// Destination code was empty.
    #[error("Destination code must not be empty")]
    EmptyDestination,

    /// Parcel weight was zero, negative or not a number.
    #[error("Invalid parcel weight: {0} kg (must be greater than 0)")]
    InvalidWeight(f64),

    /// Parcel is so heavy its price cannot be represented.
    #[error("Parcel weight {0} kg is too large to quote")]
    WeightTooLarge(f64),

    /// Rate table or calculator configuration breaks a pricing invariant.
    #[error("Invalid shipping configuration: {0}")]
    InvalidConfig(String),
}

impl ShippingError {
    /// Whether this error came from user input rather than configuration.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ShippingError::EmptyDestination
                | ShippingError::InvalidWeight(_)
                | ShippingError::WeightTooLarge(_)
        )
    }
}
