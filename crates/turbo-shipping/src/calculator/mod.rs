//! Calculator module.
//!
//! Contains the stateful shipping calculator session, its configuration
//! and the snapshot type it publishes.

mod config;
mod session;
mod state;

pub use config::{CalculatorConfig, InFlightPolicy};
pub use session::CalculatorSession;
pub use state::{CalculatorPhase, SessionSnapshot, DEFAULT_WEIGHT_KG};
