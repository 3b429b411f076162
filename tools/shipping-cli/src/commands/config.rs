//! Configuration management commands.

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CliConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("source", &path.display().to_string()),
        None => ctx.output.kv("source", "built-in defaults"),
    }

    let calculator = &ctx.config.calculator;
    ctx.output.info("[calculator]");
    ctx.output.kv("latency_ms", &calculator.latency_ms.to_string());
    ctx.output.kv("in_flight", calculator.in_flight.as_str());

    let rates = &calculator.rates;
    ctx.output.info("[calculator.rates]");
    ctx.output.kv("currency", rates.currency.code());
    ctx.output.kv("per_kg_rate", &rates.per_kg_rate.to_string());
    ctx.output.kv("remote_multiplier", &rates.remote_multiplier.to_string());
    let prefixes: Vec<String> = rates.remote_prefixes.iter().map(|c| c.to_string()).collect();
    ctx.output.kv("remote_prefixes", &prefixes.join(", "));
    ctx.output.kv(
        "free_shipping_threshold_kg",
        &rates.free_shipping_threshold_kg.to_string(),
    );
    ctx.output.kv("standard_multiplier", &rates.standard_multiplier.to_string());
    ctx.output.kv("express_multiplier", &rates.express_multiplier.to_string());
    ctx.output.kv("premium_multiplier", &rates.premium_multiplier.to_string());

    ctx.output.info("[display]");
    ctx.output.kv("policy_notes", &ctx.config.display.policy_notes.to_string());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.default_config_path();

    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, generate_default_config())?;
    ctx.output.success(&format!("Created {}", path.display()));

    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let config = match ctx.config_path {
        Some(ref path) => CliConfig::load(&path.to_string_lossy())?,
        None => {
            ctx.output.warn("No config file found, validating built-in defaults");
            ctx.config.clone()
        }
    };

    config.validate()?;
    ctx.output.success("Configuration is valid");

    Ok(())
}
