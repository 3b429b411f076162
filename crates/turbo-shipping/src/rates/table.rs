//! Rate table: pricing policy per zone and tier.

use crate::destination::{Destination, Parcel, ZoneClass, DEFAULT_REMOTE_PREFIXES};
use crate::error::ShippingError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Service tiers offered by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShippingTier {
    /// Free delivery for heavy parcels.
    Free,
    /// Regular ground delivery.
    Standard,
    /// Faster delivery.
    Express,
    /// Next business day.
    Premium,
}

impl ShippingTier {
    /// Paid tiers in the order they are quoted.
    pub const PAID: [ShippingTier; 3] = [
        ShippingTier::Standard,
        ShippingTier::Express,
        ShippingTier::Premium,
    ];

    /// Stable option id.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShippingTier::Free => "free",
            ShippingTier::Standard => "standard",
            ShippingTier::Express => "express",
            ShippingTier::Premium => "premium",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ShippingTier::Free => "Free Shipping",
            ShippingTier::Standard => "Standard Shipping",
            ShippingTier::Express => "Express Shipping",
            ShippingTier::Premium => "Premium Shipping",
        }
    }

    /// Category tag a presentation layer can map to an icon.
    pub fn category(&self) -> &'static str {
        match self {
            ShippingTier::Free => "gift",
            ShippingTier::Standard => "truck",
            ShippingTier::Express => "zap",
            ShippingTier::Premium => "crown",
        }
    }

    /// Estimated delivery label for a zone.
    pub fn delivery_label(&self, zone: ZoneClass) -> &'static str {
        match (self, zone) {
            (ShippingTier::Free, _) => "4-6 days",
            (ShippingTier::Standard, ZoneClass::Remote) => "5-7 days",
            (ShippingTier::Standard, ZoneClass::Standard) => "3-5 days",
            (ShippingTier::Express, ZoneClass::Remote) => "2-3 days",
            (ShippingTier::Express, ZoneClass::Standard) => "1-2 days",
            (ShippingTier::Premium, _) => "next business day",
        }
    }
}

impl std::fmt::Display for ShippingTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pricing constants for quoting.
///
/// `RateTable::default()` is the storefront's published table:
/// 2.5 per kg, remote zones (codes starting with 8 or 9) at 1.5x,
/// express at 1.8x, premium at 2.5x, and free shipping above 10 kg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Currency prices are labelled in.
    #[serde(default)]
    pub currency: Currency,

    /// Currency units charged per kilogram before multipliers.
    #[serde(default = "default_per_kg_rate")]
    pub per_kg_rate: f64,

    /// Multiplier applied to remote-zone destinations.
    #[serde(default = "default_remote_multiplier")]
    pub remote_multiplier: f64,

    /// Leading characters that mark a destination as remote.
    #[serde(default = "default_remote_prefixes")]
    pub remote_prefixes: Vec<char>,

    /// Parcels strictly heavier than this get a free option.
    #[serde(default = "default_free_threshold")]
    pub free_shipping_threshold_kg: f64,

    #[serde(default = "default_standard_multiplier")]
    pub standard_multiplier: f64,

    #[serde(default = "default_express_multiplier")]
    pub express_multiplier: f64,

    #[serde(default = "default_premium_multiplier")]
    pub premium_multiplier: f64,
}

fn default_per_kg_rate() -> f64 {
    2.5
}

fn default_remote_multiplier() -> f64 {
    1.5
}

fn default_remote_prefixes() -> Vec<char> {
    DEFAULT_REMOTE_PREFIXES.to_vec()
}

fn default_free_threshold() -> f64 {
    10.0
}

fn default_standard_multiplier() -> f64 {
    1.0
}

fn default_express_multiplier() -> f64 {
    1.8
}

fn default_premium_multiplier() -> f64 {
    2.5
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            per_kg_rate: default_per_kg_rate(),
            remote_multiplier: default_remote_multiplier(),
            remote_prefixes: default_remote_prefixes(),
            free_shipping_threshold_kg: default_free_threshold(),
            standard_multiplier: default_standard_multiplier(),
            express_multiplier: default_express_multiplier(),
            premium_multiplier: default_premium_multiplier(),
        }
    }
}

impl RateTable {
    /// Check the table keeps prices finite and non-negative.
    pub fn validate(&self) -> Result<(), ShippingError> {
        let positive = [
            ("per_kg_rate", self.per_kg_rate),
            ("remote_multiplier", self.remote_multiplier),
            ("standard_multiplier", self.standard_multiplier),
            ("express_multiplier", self.express_multiplier),
            ("premium_multiplier", self.premium_multiplier),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ShippingError::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }

        if !self.free_shipping_threshold_kg.is_finite() || self.free_shipping_threshold_kg < 0.0 {
            return Err(ShippingError::InvalidConfig(format!(
                "free_shipping_threshold_kg must be zero or more, got {}",
                self.free_shipping_threshold_kg
            )));
        }

        Ok(())
    }

    /// Zone of a destination under this table's remote prefixes.
    pub fn zone_for(&self, destination: &Destination) -> ZoneClass {
        ZoneClass::classify_with(destination.as_str(), &self.remote_prefixes)
    }

    pub fn zone_multiplier(&self, zone: ZoneClass) -> f64 {
        match zone {
            ZoneClass::Remote => self.remote_multiplier,
            ZoneClass::Standard => 1.0,
        }
    }

    pub fn tier_multiplier(&self, tier: ShippingTier) -> f64 {
        match tier {
            ShippingTier::Free => 0.0,
            ShippingTier::Standard => self.standard_multiplier,
            ShippingTier::Express => self.express_multiplier,
            ShippingTier::Premium => self.premium_multiplier,
        }
    }

    /// Unrounded base price for a parcel.
    pub fn base_price(&self, parcel: Parcel) -> f64 {
        parcel.weight_kg() * self.per_kg_rate
    }

    /// Price of one tier, rounded to the nearest whole unit.
    ///
    /// Rounding happens once per option, on the fully multiplied amount.
    pub fn price(&self, tier: ShippingTier, zone: ZoneClass, parcel: Parcel) -> Money {
        if tier == ShippingTier::Free {
            return Money::zero(self.currency);
        }
        let raw = self.base_price(parcel) * self.zone_multiplier(zone) * self.tier_multiplier(tier);
        let max = Money::max_units(self.currency);
        let units = if raw.round() >= max as f64 {
            max
        } else {
            raw.round() as i64
        };
        Money::from_units(units, self.currency)
    }

    /// Check every tier of a parcel can be priced exactly.
    ///
    /// [`RateTable::price`] saturates at [`Money::max_units`]; parcels whose
    /// most expensive option would reach that cap are rejected here.
    pub fn check_parcel(&self, parcel: Parcel) -> Result<(), ShippingError> {
        let top_tier = ShippingTier::PAID
            .iter()
            .map(|&tier| self.tier_multiplier(tier))
            .fold(0.0, f64::max);
        let highest = self.base_price(parcel) * self.remote_multiplier.max(1.0) * top_tier;
        if !highest.is_finite() || highest.round() >= Money::max_units(self.currency) as f64 {
            return Err(ShippingError::WeightTooLarge(parcel.weight_kg()));
        }
        Ok(())
    }

    /// Whether a parcel qualifies for the free tier.
    pub fn qualifies_for_free(&self, parcel: Parcel) -> bool {
        parcel.weight_kg() > self.free_shipping_threshold_kg
    }

    /// Description shown under a tier's name.
    pub fn description(&self, tier: ShippingTier) -> String {
        match tier {
            ShippingTier::Free => {
                format!("On orders over {}kg", self.free_shipping_threshold_kg)
            }
            ShippingTier::Standard => "Delivery on business days".to_string(),
            ShippingTier::Express => "Fast guaranteed delivery".to_string(),
            ShippingTier::Premium => "Next business day delivery".to_string(),
        }
    }
}
