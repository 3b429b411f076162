//! Quote engine: turns a destination and parcel into priced options.

use crate::destination::{Destination, Parcel, ZoneClass};
use crate::money::Money;
use crate::rates::table::{RateTable, ShippingTier};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One priced delivery option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteOption {
    /// Tier this option was priced for; doubles as the option id.
    pub id: ShippingTier,
    /// Display name.
    pub name: String,
    /// Short description.
    pub description: String,
    /// Price, always a whole number of currency units.
    pub price: Money,
    /// Estimated delivery (e.g., "3-5 days").
    pub estimated_delivery: String,
    /// Category tag (e.g., "truck").
    pub category: String,
}

impl QuoteOption {
    fn priced(table: &RateTable, tier: ShippingTier, zone: ZoneClass, parcel: Parcel) -> Self {
        Self {
            id: tier,
            name: tier.display_name().to_string(),
            description: table.description(tier),
            price: table.price(tier, zone, parcel),
            estimated_delivery: tier.delivery_label(zone).to_string(),
            category: tier.category().to_string(),
        }
    }

    /// Price in whole currency units.
    pub fn price_units(&self) -> i64 {
        self.price.units()
    }

    /// Check if this option ships for free.
    pub fn is_free(&self) -> bool {
        self.price.is_zero()
    }
}

/// Ordered set of options from a single quote.
///
/// The free option, when present, is always first; paid tiers follow in
/// standard, express, premium order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteSet(Vec<QuoteOption>);

impl QuoteSet {
    /// An empty set, as held by a session before its first quote.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuoteOption> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[QuoteOption] {
        &self.0
    }

    /// Find the option for a tier.
    pub fn get(&self, tier: ShippingTier) -> Option<&QuoteOption> {
        self.0.iter().find(|o| o.id == tier)
    }

    pub fn has_free_tier(&self) -> bool {
        self.get(ShippingTier::Free).is_some()
    }

    /// Lowest-priced option; the earliest one wins ties.
    pub fn cheapest(&self) -> Option<&QuoteOption> {
        self.0.iter().reduce(|best, o| {
            if o.price.amount_minor < best.price.amount_minor {
                o
            } else {
                best
            }
        })
    }
}

impl<'a> IntoIterator for &'a QuoteSet {
    type Item = &'a QuoteOption;
    type IntoIter = std::slice::Iter<'a, QuoteOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Stateless quoting over a rate table.
#[derive(Debug, Clone, Default)]
pub struct QuoteEngine {
    table: RateTable,
}

impl QuoteEngine {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Price every tier for a destination and parcel.
    ///
    /// Pure: the same inputs always produce an equal, freshly built set.
    pub fn quote(&self, destination: &Destination, parcel: Parcel) -> QuoteSet {
        let zone = self.table.zone_for(destination);
        let free = self.table.qualifies_for_free(parcel);

        let mut options = Vec::with_capacity(4);
        if free {
            options.push(QuoteOption::priced(&self.table, ShippingTier::Free, zone, parcel));
        }
        options.extend(
            ShippingTier::PAID
                .iter()
                .map(|&tier| QuoteOption::priced(&self.table, tier, zone, parcel)),
        );

        debug!(
            destination = %destination,
            weight_kg = parcel.weight_kg(),
            zone = %zone,
            free_tier = free,
            options = options.len(),
            "quoted shipping options"
        );

        QuoteSet(options)
    }
}

/// Quote against the default rate table.
pub fn quote(destination: &Destination, parcel: Parcel) -> QuoteSet {
    QuoteEngine::default().quote(destination, parcel)
}
