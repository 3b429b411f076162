//! Interactive shipping calculator.

use anyhow::{bail, Result};
use dialoguer::{Input, Select};

use super::{submit_and_wait, InteractiveArgs};
use crate::context::Context;

const ACTIONS: [&str; 3] = ["Calculate again", "Clear", "Quit"];

/// Run the interactive command.
pub async fn run(args: InteractiveArgs, ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        bail!("Interactive mode does not support --json");
    }

    let session = ctx.new_session()?;
    if let Some(destination) = args.destination {
        session.set_destination(destination);
    }

    ctx.output.header("Shipping Calculator");

    loop {
        let current = session.snapshot();

        let destination: String = Input::new()
            .with_prompt("Postal code")
            .with_initial_text(current.destination)
            .allow_empty(true)
            .interact_text()?;
        session.set_destination(destination);

        let weight: f64 = Input::new()
            .with_prompt("Weight (kg)")
            .default(current.weight)
            .interact_text()?;
        session.set_weight(weight);

        match submit_and_wait(&session, ctx).await {
            Ok(snapshot) => ctx.output.quote_options(&snapshot),
            Err(e) => {
                ctx.output.warn(&e.to_string());
                continue;
            }
        }

        if ctx.config.display.policy_notes {
            ctx.output.policy_notes(&ctx.config.calculator.rates);
        }

        // "Clear" is only offered once there is something to clear.
        let without_clear = [ACTIONS[0], ACTIONS[2]];
        let actions: &[&str] = if session.can_reset() {
            &ACTIONS
        } else {
            &without_clear
        };
        let choice = Select::new()
            .with_prompt("What next?")
            .items(actions)
            .default(0)
            .interact()?;

        match actions[choice] {
            "Clear" => {
                session.reset();
                ctx.output.success("Calculator cleared");
            }
            "Quit" => break,
            _ => {}
        }
    }

    Ok(())
}
