//! End-to-end calculator session scenarios on a paused clock.

use std::time::Duration;

use turbo_shipping::prelude::*;

const LATENCY: Duration = Duration::from_millis(1500);

/// Let spawned timer tasks observe the advanced clock.
async fn advance(by: Duration) {
    tokio::time::advance(by).await;
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

fn overlapping() -> CalculatorSession {
    CalculatorSession::new(CalculatorConfig::default().with_in_flight(InFlightPolicy::Overlapping))
        .unwrap()
}

fn tiers(snap: &SessionSnapshot) -> Vec<(ShippingTier, i64)> {
    snap.quote_set
        .iter()
        .map(|o| (o.id, o.price_units()))
        .collect()
}

#[tokio::test(start_paused = true)]
async fn remote_destination_settles_with_three_options() {
    let session = CalculatorSession::default();
    session.set_destination("90210");
    session.set_weight(4.0);
    assert!(session.submit());

    let snap = session.settled().await;
    assert!(snap.has_settled);
    assert!(!snap.is_quoting);
    assert_eq!(
        tiers(&snap),
        vec![
            (ShippingTier::Standard, 15),
            (ShippingTier::Express, 27),
            (ShippingTier::Premium, 38),
        ]
    );
    let labels: Vec<&str> = snap
        .quote_set
        .iter()
        .map(|o| o.estimated_delivery.as_str())
        .collect();
    assert_eq!(labels, vec!["5-7 days", "2-3 days", "next business day"]);
}

#[tokio::test(start_paused = true)]
async fn heavy_parcel_settles_with_free_tier_first() {
    let session = CalculatorSession::default();
    session.set_destination("10001");
    session.set_weight(12.0);
    assert!(session.submit());

    let snap = session.settled().await;
    assert_eq!(
        tiers(&snap),
        vec![
            (ShippingTier::Free, 0),
            (ShippingTier::Standard, 30),
            (ShippingTier::Express, 54),
            (ShippingTier::Premium, 75),
        ]
    );
    assert_eq!(snap.quote_set.as_slice()[0].estimated_delivery, "4-6 days");
}

#[tokio::test(start_paused = true)]
async fn empty_destination_stays_idle() {
    let session = CalculatorSession::default();
    session.set_destination("");
    session.set_weight(2.0);
    assert!(!session.submit());

    advance(LATENCY * 2).await;
    let snap = session.snapshot();
    assert_eq!(snap.phase(), CalculatorPhase::Idle);
    assert!(snap.quote_set.is_empty());
}

#[tokio::test(start_paused = true)]
async fn negative_and_nan_weights_stay_idle() {
    let session = CalculatorSession::default();
    session.set_destination("10001");

    for weight in [-1.0, f64::NAN] {
        session.set_weight(weight);
        assert!(!session.submit(), "{weight}");
        advance(LATENCY * 2).await;
        let snap = session.snapshot();
        assert_eq!(snap.phase(), CalculatorPhase::Idle, "{weight}");
        assert!(snap.quote_set.is_empty());
    }
}

#[tokio::test(start_paused = true)]
async fn huge_weight_never_leaves_session_quoting() {
    let session = CalculatorSession::default();
    session.set_destination("10001");
    session.set_weight(1e17);
    assert!(!session.submit());

    advance(LATENCY * 2).await;
    assert_eq!(session.phase(), CalculatorPhase::Idle);

    // The session still quotes normally afterwards.
    session.set_weight(2.0);
    assert!(session.submit());
    let snap = tokio::time::timeout(LATENCY * 2, session.settled())
        .await
        .expect("quote should settle");
    assert_eq!(snap.phase(), CalculatorPhase::Settled);
    assert_eq!(tiers(&snap)[0], (ShippingTier::Standard, 5));
}

#[tokio::test(start_paused = true)]
async fn quote_is_pending_until_latency_elapses() {
    let session = CalculatorSession::default();
    session.set_destination("10001");
    assert!(session.submit());

    advance(LATENCY - Duration::from_millis(1)).await;
    assert_eq!(session.phase(), CalculatorPhase::Quoting);

    advance(Duration::from_millis(1)).await;
    assert_eq!(session.phase(), CalculatorPhase::Settled);
}

#[tokio::test(start_paused = true)]
async fn edits_during_quoting_use_frozen_inputs() {
    let session = CalculatorSession::default();
    session.set_destination("90210");
    session.set_weight(4.0);
    assert!(session.submit());

    session.set_destination("10001");
    session.set_weight(12.0);

    let snap = session.settled().await;
    assert_eq!(snap.destination, "10001");
    assert_eq!(snap.weight, 12.0);
    // Priced for the remote 4 kg parcel captured at submit time.
    assert_eq!(snap.quote_set.len(), 3);
    assert_eq!(snap.quote_set.get(ShippingTier::Standard).unwrap().price_units(), 15);
}

#[tokio::test(start_paused = true)]
async fn input_edits_keep_settled_quotes() {
    let session = CalculatorSession::default();
    session.set_destination("90210");
    session.set_weight(4.0);
    session.submit();
    session.settled().await;

    session.set_weight(20.0);
    let snap = session.snapshot();
    assert!(snap.has_settled);
    assert_eq!(snap.quote_set.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn reset_returns_to_initial_state() {
    let session = CalculatorSession::default();
    session.set_destination("90210");
    session.set_weight(4.0);
    session.submit();
    session.settled().await;

    session.reset();
    assert_eq!(session.snapshot(), SessionSnapshot::default());
    assert!(!session.can_reset());
}

#[tokio::test(start_paused = true)]
async fn latest_submission_wins() {
    let session = CalculatorSession::default();
    session.set_destination("90210");
    session.set_weight(4.0);
    assert!(session.submit());

    advance(Duration::from_millis(1000)).await;
    session.set_destination("10001");
    session.set_weight(12.0);
    assert!(session.submit());

    // The first timer would have fired here.
    advance(Duration::from_millis(600)).await;
    let snap = session.snapshot();
    assert!(snap.is_quoting);
    assert!(!snap.has_settled);

    let snap = session.settled().await;
    assert_eq!(snap.quote_set.len(), 4);
    assert!(snap.quote_set.has_free_tier());
}

#[tokio::test(start_paused = true)]
async fn reset_cancels_pending_quote() {
    let session = CalculatorSession::default();
    session.set_destination("90210");
    session.set_weight(4.0);
    assert!(session.submit());

    advance(Duration::from_millis(500)).await;
    session.reset();

    advance(LATENCY * 2).await;
    assert_eq!(session.snapshot(), SessionSnapshot::default());
}

#[tokio::test(start_paused = true)]
async fn overlapping_completion_lands_after_reset() {
    let session = overlapping();
    session.set_destination("90210");
    session.set_weight(4.0);
    assert!(session.submit());

    advance(Duration::from_millis(500)).await;
    session.reset();
    assert_eq!(session.phase(), CalculatorPhase::Idle);

    advance(LATENCY).await;
    let snap = session.snapshot();
    assert!(snap.has_settled);
    assert_eq!(snap.destination, "");
    assert_eq!(snap.quote_set.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn overlapping_last_to_complete_wins() {
    let session = overlapping();
    session.set_destination("10001");
    session.set_weight(12.0);
    assert!(session.submit());

    advance(Duration::from_millis(100)).await;
    session.set_destination("90210");
    session.set_weight(4.0);
    assert!(session.submit());

    // First timer lands with the first inputs.
    advance(LATENCY - Duration::from_millis(100)).await;
    assert_eq!(session.snapshot().quote_set.len(), 4);

    // Second timer overwrites it.
    advance(Duration::from_millis(100)).await;
    let snap = session.snapshot();
    assert_eq!(snap.quote_set.len(), 3);
    assert!(!snap.quote_set.has_free_tier());
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_each_phase() {
    let session = CalculatorSession::default();
    let mut updates = session.subscribe();

    session.set_destination("10001");
    session.submit();
    updates.changed().await.unwrap();
    assert!(updates.borrow_and_update().is_quoting);

    updates.changed().await.unwrap();
    let snap = updates.borrow_and_update().clone();
    assert_eq!(snap.phase(), CalculatorPhase::Settled);
}

#[tokio::test(start_paused = true)]
async fn custom_latency_and_rates() {
    let config = CalculatorConfig::default()
        .with_latency(Duration::from_millis(10))
        .with_rates(RateTable {
            per_kg_rate: 5.0,
            ..RateTable::default()
        });
    let session = CalculatorSession::new(config).unwrap();
    session.set_destination("10001");
    session.set_weight(2.0);
    session.submit();

    advance(Duration::from_millis(10)).await;
    let snap = session.snapshot();
    assert!(snap.has_settled);
    assert_eq!(snap.quote_set.get(ShippingTier::Standard).unwrap().price_units(), 10);
}
