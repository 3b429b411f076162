//! CLI command implementations.

pub mod config;
pub mod interactive;
pub mod quote;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use turbo_shipping::calculator::{CalculatorSession, SessionSnapshot};

use crate::context::Context;

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Destination postal/zip code.
    pub destination: String,

    /// Parcel weight in kilograms.
    #[arg(short, long, default_value = "1")]
    pub weight: f64,

    /// Skip the shipping policy notes.
    #[arg(long)]
    pub no_notes: bool,
}

/// Arguments for the interactive command.
#[derive(Args)]
pub struct InteractiveArgs {
    /// Pre-fill the destination prompt.
    #[arg(short, long)]
    pub destination: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write a default config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}

/// Submit the session's current inputs and wait for the quote.
///
/// Fails when the session rejects the inputs.
pub(crate) async fn submit_and_wait(
    session: &CalculatorSession,
    ctx: &Context,
) -> Result<SessionSnapshot> {
    if !session.submit() {
        bail!("Enter a postal code and a weight greater than 0 kg");
    }

    let spinner = ctx.output.spinner("Calculating shipping...");
    let snapshot = session.settled().await;
    spinner.finish_and_clear();

    Ok(snapshot)
}
