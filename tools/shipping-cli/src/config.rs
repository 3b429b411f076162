//! CLI configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_shipping::calculator::CalculatorConfig;

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Calculator settings, including the rate table.
    #[serde(default)]
    pub calculator: CalculatorConfig,

    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Check the calculator settings.
    pub fn validate(&self) -> Result<()> {
        self.calculator
            .validate()
            .context("Invalid [calculator] section")
    }
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Print the shipping policy notes after the options.
    #[serde(default = "default_true")]
    pub policy_notes: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { policy_notes: true }
    }
}

/// Generate a default shipping.toml content.
pub fn generate_default_config() -> String {
    r#"# Turbo Ship configuration

[calculator]
# Simulated quoting delay in milliseconds
latency_ms = 1500
# What happens to a pending quote on a new submit or reset:
# "latest_wins" cancels it, "overlapping" lets every quote land
in_flight = "latest_wins"

[calculator.rates]
currency = "MXN"
per_kg_rate = 2.5
remote_multiplier = 1.5
remote_prefixes = ["8", "9"]
free_shipping_threshold_kg = 10.0
standard_multiplier = 1.0
express_multiplier = 1.8
premium_multiplier = 2.5

[display]
policy_notes = true
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_shipping::calculator::InFlightPolicy;

    #[test]
    fn test_generated_config_matches_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.calculator, CalculatorConfig::default());
        assert!(config.display.policy_notes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_override() {
        let config: CliConfig = toml::from_str(
            r#"
            [calculator]
            in_flight = "overlapping"

            [calculator.rates]
            per_kg_rate = 4.0
            "#,
        )
        .unwrap();
        assert_eq!(config.calculator.in_flight, InFlightPolicy::Overlapping);
        assert_eq!(config.calculator.latency_ms, 1500);
        assert_eq!(config.calculator.rates.per_kg_rate, 4.0);
        assert_eq!(config.calculator.rates.express_multiplier, 1.8);
    }

    #[test]
    fn test_invalid_rates_fail_validation() {
        let config: CliConfig = toml::from_str(
            r#"
            [calculator.rates]
            remote_multiplier = 0.0
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_round_trips_through_toml() {
        let text = toml::to_string_pretty(&CliConfig::default()).unwrap();
        let back: CliConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.calculator, CalculatorConfig::default());
    }
}
