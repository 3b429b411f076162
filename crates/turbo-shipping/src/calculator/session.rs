//! Calculator session state machine.

use std::sync::{Arc, Weak};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::calculator::config::{CalculatorConfig, InFlightPolicy};
use crate::calculator::state::{CalculatorPhase, SessionSnapshot, DEFAULT_WEIGHT_KG};
use crate::destination::{Destination, Parcel};
use crate::error::ShippingError;
use crate::rates::{QuoteEngine, QuoteSet, RateTable};

/// A scheduled quote completion.
struct PendingQuote {
    generation: u64,
    handle: JoinHandle<()>,
}

struct SessionState {
    destination: String,
    weight: f64,
    quote_set: QuoteSet,
    is_quoting: bool,
    has_settled: bool,
    /// Bumped by every accepted submit and every reset.
    generation: u64,
    pending: Vec<PendingQuote>,
}

impl SessionState {
    fn new() -> Self {
        Self {
            destination: String::new(),
            weight: DEFAULT_WEIGHT_KG,
            quote_set: QuoteSet::empty(),
            is_quoting: false,
            has_settled: false,
            generation: 0,
            pending: Vec::new(),
        }
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            destination: self.destination.clone(),
            weight: self.weight,
            quote_set: self.quote_set.clone(),
            is_quoting: self.is_quoting,
            has_settled: self.has_settled,
        }
    }

    fn frozen_inputs(&self, table: &RateTable) -> Result<(Destination, Parcel), ShippingError> {
        let destination = Destination::new(self.destination.clone())?;
        let parcel = Parcel::new(self.weight)?;
        table.check_parcel(parcel)?;
        Ok((destination, parcel))
    }

    fn cancel_pending(&mut self) -> usize {
        let cancelled = self.pending.len();
        for pending in self.pending.drain(..) {
            pending.handle.abort();
        }
        cancelled
    }
}

struct Inner {
    engine: QuoteEngine,
    latency: Duration,
    policy: InFlightPolicy,
    state: Mutex<SessionState>,
    updates: watch::Sender<SessionSnapshot>,
}

impl Inner {
    fn publish(&self, state: &SessionState) {
        self.updates.send_replace(state.snapshot());
    }

    fn complete(&self, generation: u64, destination: &Destination, parcel: Parcel) {
        let quote_set = self.engine.quote(destination, parcel);

        let mut state = self.state.lock();
        state.pending.retain(|p| p.generation != generation);

        let stale = generation != state.generation;
        match (self.policy, stale) {
            (InFlightPolicy::LatestWins, true) => {
                debug!(generation, current = state.generation, "discarding superseded quote");
                return;
            }
            (InFlightPolicy::Overlapping, true) => {
                warn!(
                    generation,
                    current = state.generation,
                    destination = %destination,
                    "stale quote landed over newer session state"
                );
            }
            (_, false) => {}
        }

        info!(
            destination = %destination,
            weight_kg = parcel.weight_kg(),
            options = quote_set.len(),
            "shipping quote settled"
        );

        state.quote_set = quote_set;
        state.is_quoting = false;
        state.has_settled = true;
        self.publish(&state);
    }

    /// A scheduled quote ended without landing.
    fn abandon(&self, generation: u64) {
        let mut state = self.state.lock();
        state.pending.retain(|p| p.generation != generation);
        if generation != state.generation || !state.is_quoting {
            return;
        }

        warn!(generation, "shipping quote was dropped before it settled");
        state.is_quoting = false;
        self.publish(&state);
    }
}

/// Owned by a scheduled quote task. Clears `is_quoting` if the task is
/// dropped before its quote lands, e.g. on runtime shutdown.
struct CompletionGuard {
    inner: Weak<Inner>,
    generation: u64,
    landed: bool,
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if self.landed {
            return;
        }
        if let Some(inner) = self.inner.upgrade() {
            inner.abandon(self.generation);
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.state.get_mut().cancel_pending();
    }
}

/// A shipping calculator session.
///
/// Holds the user's inputs and the latest quote. `submit` freezes the
/// current inputs and schedules the quote after the configured latency,
/// so it must be called from within a Tokio runtime. Cloning yields
/// another handle to the same session.
///
/// # Example
///
/// ```rust,ignore
/// use turbo_shipping::calculator::CalculatorSession;
///
/// let session = CalculatorSession::default();
/// session.set_destination("90210");
/// session.set_weight(4.0);
/// session.submit();
///
/// let settled = session.settled().await;
/// for option in settled.quote_set.iter() {
///     println!("{}: {}", option.name, option.price);
/// }
/// ```
#[derive(Clone)]
pub struct CalculatorSession {
    inner: Arc<Inner>,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::build(CalculatorConfig::default())
    }
}

impl std::fmt::Debug for CalculatorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorSession")
            .field("policy", &self.inner.policy)
            .field("latency", &self.inner.latency)
            .field("state", &self.snapshot())
            .finish()
    }
}

impl CalculatorSession {
    /// Create a session from a validated configuration.
    pub fn new(config: CalculatorConfig) -> Result<Self, ShippingError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: CalculatorConfig) -> Self {
        let (updates, _) = watch::channel(SessionSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                latency: config.latency(),
                policy: config.in_flight,
                engine: QuoteEngine::new(config.rates),
                state: Mutex::new(SessionState::new()),
                updates,
            }),
        }
    }

    /// Update the destination code. Never affects a pending quote.
    pub fn set_destination(&self, code: impl Into<String>) {
        let mut state = self.inner.state.lock();
        state.destination = code.into();
        debug!(destination = %state.destination, "destination updated");
        self.inner.publish(&state);
    }

    /// Update the parcel weight in kilograms. Never affects a pending quote.
    pub fn set_weight(&self, weight_kg: f64) {
        let mut state = self.inner.state.lock();
        state.weight = weight_kg;
        debug!(weight_kg, "weight updated");
        self.inner.publish(&state);
    }

    /// Request a quote for the current inputs.
    ///
    /// Returns `false` and leaves the session untouched when the inputs
    /// are not quotable or there is no runtime to schedule on.
    pub fn submit(&self) -> bool {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "cannot schedule shipping quote outside a Tokio runtime");
                return false;
            }
        };

        let mut state = self.inner.state.lock();
        let (destination, parcel) = match state.frozen_inputs(self.inner.engine.table()) {
            Ok(inputs) => inputs,
            Err(e) => {
                warn!(
                    destination = %state.destination,
                    weight_kg = state.weight,
                    error = %e,
                    "ignoring shipping quote request with invalid input"
                );
                return false;
            }
        };

        let Some(deadline) = Instant::now().checked_add(self.inner.latency) else {
            warn!(
                latency_ms = u64::try_from(self.inner.latency.as_millis()).unwrap_or(u64::MAX),
                "shipping quote latency is out of range"
            );
            return false;
        };

        if self.inner.policy == InFlightPolicy::LatestWins {
            let cancelled = state.cancel_pending();
            if cancelled > 0 {
                debug!(cancelled, "superseding pending shipping quote");
            }
        }

        state.generation += 1;
        let generation = state.generation;
        state.is_quoting = true;

        debug!(
            generation,
            destination = %destination,
            weight_kg = parcel.weight_kg(),
            latency_ms = u64::try_from(self.inner.latency.as_millis()).unwrap_or(u64::MAX),
            "scheduling shipping quote"
        );

        let mut guard = CompletionGuard {
            inner: Arc::downgrade(&self.inner),
            generation,
            landed: false,
        };
        let handle = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            if let Some(inner) = guard.inner.upgrade() {
                inner.complete(generation, &destination, parcel);
            }
            guard.landed = true;
        });
        state.pending.push(PendingQuote { generation, handle });

        self.inner.publish(&state);
        true
    }

    /// Return to the initial empty state.
    ///
    /// Under [`InFlightPolicy::LatestWins`] a pending quote is cancelled;
    /// under [`InFlightPolicy::Overlapping`] it keeps running and may still
    /// land afterwards.
    pub fn reset(&self) {
        let mut state = self.inner.state.lock();

        let cancelled = match self.inner.policy {
            InFlightPolicy::LatestWins => state.cancel_pending(),
            InFlightPolicy::Overlapping => 0,
        };

        state.generation += 1;
        state.destination.clear();
        state.weight = DEFAULT_WEIGHT_KG;
        state.quote_set = QuoteSet::empty();
        state.is_quoting = false;
        state.has_settled = false;

        debug!(cancelled, "calculator reset");
        self.inner.publish(&state);
    }

    /// Current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.inner.state.lock().snapshot()
    }

    pub fn phase(&self) -> CalculatorPhase {
        self.snapshot().phase()
    }

    pub fn can_submit(&self) -> bool {
        self.snapshot().can_submit()
    }

    pub fn can_reset(&self) -> bool {
        self.inner.state.lock().has_settled
    }

    pub fn policy(&self) -> InFlightPolicy {
        self.inner.policy
    }

    pub fn latency(&self) -> Duration {
        self.inner.latency
    }

    /// Receive every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.inner.updates.subscribe()
    }

    /// Wait until no quote is pending and return the resulting state.
    pub async fn settled(&self) -> SessionSnapshot {
        let mut updates = self.subscribe();
        let result = updates.wait_for(|snap| !snap.is_quoting).await.map(|snap| snap.clone());
        match result {
            Ok(snap) => snap,
            Err(_) => self.snapshot(),
        }
    }
}
