//! Observable calculator state.

use serde::{Deserialize, Serialize};

use crate::rates::QuoteSet;

/// Weight a fresh or reset session starts with, in kilograms.
pub const DEFAULT_WEIGHT_KG: f64 = 1.0;

/// Phases of a calculator session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculatorPhase {
    /// Nothing submitted since creation or the last reset.
    Idle,
    /// A quote is pending.
    Quoting,
    /// A quote set is ready for display.
    Settled,
}

impl CalculatorPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorPhase::Idle => "idle",
            CalculatorPhase::Quoting => "quoting",
            CalculatorPhase::Settled => "settled",
        }
    }
}

/// Point-in-time view of a session, as consumed by a presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub destination: String,
    pub weight: f64,
    pub quote_set: QuoteSet,
    pub is_quoting: bool,
    pub has_settled: bool,
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            destination: String::new(),
            weight: DEFAULT_WEIGHT_KG,
            quote_set: QuoteSet::empty(),
            is_quoting: false,
            has_settled: false,
        }
    }
}

impl SessionSnapshot {
    /// Derive the phase; a pending quote takes precedence over a settled one.
    pub fn phase(&self) -> CalculatorPhase {
        if self.is_quoting {
            CalculatorPhase::Quoting
        } else if self.has_settled {
            CalculatorPhase::Settled
        } else {
            CalculatorPhase::Idle
        }
    }

    /// Inputs are quotable and no quote is pending.
    pub fn can_submit(&self) -> bool {
        !self.destination.is_empty() && self.weight > 0.0 && !self.is_quoting
    }

    /// Whether a "clear" action makes sense.
    pub fn can_reset(&self) -> bool {
        self.has_settled
    }

    /// Options worth rendering: only once settled.
    pub fn visible_options(&self) -> Option<&QuoteSet> {
        if self.has_settled && !self.quote_set.is_empty() {
            Some(&self.quote_set)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot() {
        let snap = SessionSnapshot::default();
        assert_eq!(snap.phase(), CalculatorPhase::Idle);
        assert_eq!(snap.weight, 1.0);
        assert!(!snap.can_submit());
        assert!(!snap.can_reset());
        assert!(snap.visible_options().is_none());
    }

    #[test]
    fn test_quoting_wins_over_settled() {
        let snap = SessionSnapshot {
            is_quoting: true,
            has_settled: true,
            destination: "10001".into(),
            ..SessionSnapshot::default()
        };
        assert_eq!(snap.phase(), CalculatorPhase::Quoting);
        assert!(!snap.can_submit());
    }

    #[test]
    fn test_snapshot_field_names() {
        let json = serde_json::to_value(SessionSnapshot::default()).unwrap();
        assert_eq!(json["destination"], "");
        assert_eq!(json["weight"], 1.0);
        assert_eq!(json["quoteSet"], serde_json::json!([]));
        assert_eq!(json["isQuoting"], false);
        assert_eq!(json["hasSettled"], false);
    }
}
