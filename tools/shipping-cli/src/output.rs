//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use turbo_shipping::calculator::SessionSnapshot;
use turbo_shipping::rates::{QuoteOption, RateTable};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", json_error(msg));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Print the options of a settled session.
    pub fn quote_options(&self, snapshot: &SessionSnapshot) {
        if self.json {
            self.json(snapshot);
            return;
        }

        let Some(options) = snapshot.visible_options() else {
            self.warn("No shipping options available");
            return;
        };

        self.header("Available Shipping Options");
        for option in options {
            println!();
            println!("  {} {}", category_icon(&option.category), option_title(option));
            println!("    {}", style(&option.description).dim());
            println!(
                "    Delivery: {}",
                style(&option.estimated_delivery).green()
            );
            println!("    {}", format_price(option));
        }
    }

    /// Print the shipping policy notes.
    pub fn policy_notes(&self, rates: &RateTable) {
        if self.json {
            return;
        }
        self.header("Important Information");
        self.list_item("Delivery times are business days (Mon-Fri)");
        self.list_item("Orders are processed within 24-48 hours");
        self.list_item("Remote zones may take additional days");
        self.list_item(&format!(
            "Free shipping on parcels over {}kg",
            rates.free_shipping_threshold_kg
        ));
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

fn json_error(msg: &str) -> serde_json::Value {
    serde_json::json!({ "error": msg })
}

fn option_title(option: &QuoteOption) -> String {
    let name = style(&option.name).bold().to_string();
    if option.is_free() {
        format!("{} {}", name, style(" FREE! ").black().on_yellow())
    } else {
        name
    }
}

/// Format an option's price, e.g. "$27 MXN" or "FREE".
pub fn format_price(option: &QuoteOption) -> String {
    if option.is_free() {
        style("FREE").green().bold().to_string()
    } else {
        style(option.price.display_with_code()).bold().to_string()
    }
}

/// Terminal glyph for an option category.
pub fn category_icon(category: &str) -> &'static str {
    match category {
        "gift" => "🎁",
        "truck" => "🚚",
        "zap" => "⚡",
        "crown" => "👑",
        _ => "📦",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_shipping::prelude::*;

    #[test]
    fn test_format_price() {
        console::set_colors_enabled(false);
        let set = quote(&Destination::new("10001").unwrap(), Parcel::new(12.0).unwrap());
        let free = set.get(ShippingTier::Free).unwrap();
        let express = set.get(ShippingTier::Express).unwrap();
        assert_eq!(format_price(free), "FREE");
        assert_eq!(format_price(express), "$54 MXN");
    }

    #[test]
    fn test_json_error_escapes_message() {
        let msg = "Failed to parse TOML config: ./shipping.toml\n  bad value \"fast\" at C:\\orders";
        let line = json_error(msg).to_string();
        let back: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(back["error"], msg);
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_category_icons() {
        assert_eq!(category_icon("truck"), "🚚");
        assert_eq!(category_icon("unknown"), "📦");
    }
}
