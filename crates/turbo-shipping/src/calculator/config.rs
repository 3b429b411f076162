//! Calculator configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ShippingError;
use crate::rates::RateTable;

/// How a session treats a quote that is still pending when new commands arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InFlightPolicy {
    /// One pending quote per session. A new submit or a reset cancels the
    /// pending timer, and superseded completions are discarded.
    #[default]
    LatestWins,
    /// Every submit runs its own timer and nothing is cancelled. The last
    /// timer to fire wins, even after a reset.
    Overlapping,
}

impl InFlightPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InFlightPolicy::LatestWins => "latest_wins",
            InFlightPolicy::Overlapping => "overlapping",
        }
    }
}

/// Settings for a [`CalculatorSession`](crate::calculator::CalculatorSession).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorConfig {
    /// Simulated quoting latency in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,

    /// Handling of pending quotes.
    #[serde(default)]
    pub in_flight: InFlightPolicy,

    /// Pricing table.
    #[serde(default)]
    pub rates: RateTable,
}

fn default_latency_ms() -> u64 {
    1500
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            in_flight: InFlightPolicy::default(),
            rates: RateTable::default(),
        }
    }
}

impl CalculatorConfig {
    /// Simulated latency as a duration.
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Set the simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the in-flight policy.
    pub fn with_in_flight(mut self, policy: InFlightPolicy) -> Self {
        self.in_flight = policy;
        self
    }

    /// Set the rate table.
    pub fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = rates;
        self
    }

    pub fn validate(&self) -> Result<(), ShippingError> {
        self.rates.validate()
    }
}
