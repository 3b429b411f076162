//! One-shot shipping quote.

use anyhow::Result;

use super::{submit_and_wait, QuoteArgs};
use crate::context::Context;

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let session = ctx.new_session()?;
    if let Some(ref path) = ctx.config_path {
        ctx.output.debug(&format!("Using config: {}", path.display()));
    }

    session.set_destination(args.destination);
    session.set_weight(args.weight);

    let snapshot = submit_and_wait(&session, ctx).await?;
    ctx.output.quote_options(&snapshot);

    if ctx.config.display.policy_notes && !args.no_notes {
        ctx.output.policy_notes(&ctx.config.calculator.rates);
    }

    Ok(())
}
