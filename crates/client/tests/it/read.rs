use alloy_primitives::U256;
use std::time::Duration;
use waveportal_client::{ClientError, ClientView, ContractError};
use waveportal_test_utils::{
    ALICE, BOB, MockPortal, MockProvider, init_tracing, raw_wave, view, wait_until,
};

async fn loaded(portal: MockPortal) -> ClientView<MockProvider> {
    init_tracing();
    let view = view(Some(MockProvider::authorized(portal, vec![ALICE])));
    assert_eq!(view.detect_session().await.unwrap(), Some(ALICE));
    view
}

#[tokio::test]
async fn live_event_appends_after_bulk_load() {
    let portal = MockPortal::with_waves(vec![raw_wave(ALICE, 10, "first"), raw_wave(BOB, 20, "second")]);
    let view = loaded(portal.clone()).await;
    assert_eq!(view.snapshot().messages.len(), 2);

    assert_eq!(portal.emit(raw_wave(BOB, 5, "live")), 1);
    wait_until(|| view.snapshot().messages.len() == 3).await;

    let messages = view.snapshot().messages;
    let last = messages.last().unwrap();
    assert_eq!(last.text, "live");
    assert_eq!(last.address, BOB);
    // appended, not sorted by time
    assert_eq!(last.timestamp.timestamp(), 5);
}

#[tokio::test]
async fn duplicate_delivery_is_not_deduplicated() {
    let wave = raw_wave(ALICE, 10, "gm");
    let portal = MockPortal::with_waves(vec![wave.clone()]);
    let view = loaded(portal.clone()).await;

    portal.emit(wave.clone());
    portal.emit(wave);
    wait_until(|| view.snapshot().messages.len() == 3).await;

    let messages = view.snapshot().messages;
    assert!(messages.iter().all(|m| m.text == "gm"));
}

#[tokio::test]
async fn reload_releases_previous_subscription() {
    let portal = MockPortal::with_waves(vec![raw_wave(ALICE, 10, "gm")]);
    let view = loaded(portal.clone()).await;

    view.load_all().await.unwrap();
    wait_until(|| portal.active_subscribers() == 1).await;

    assert_eq!(portal.emit(raw_wave(BOB, 20, "once")), 1);
    wait_until(|| view.snapshot().messages.len() == 2).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(view.snapshot().messages.len(), 2);
}

#[tokio::test]
async fn dropping_the_view_releases_the_subscription() {
    let portal = MockPortal::new();
    let view = loaded(portal.clone()).await;
    assert_eq!(portal.active_subscribers(), 1);

    drop(view);
    wait_until(|| portal.active_subscribers() == 0).await;
}

#[tokio::test]
async fn teardown_releases_the_subscription() {
    let portal = MockPortal::new();
    let view = loaded(portal.clone()).await;
    assert!(view.is_subscribed());

    view.teardown();
    assert!(!view.is_subscribed());
    wait_until(|| portal.active_subscribers() == 0).await;
    assert_eq!(portal.emit(raw_wave(ALICE, 1, "lost")), 0);
}

#[tokio::test]
async fn failed_bulk_load_keeps_messages() {
    let portal = MockPortal::with_waves(vec![raw_wave(ALICE, 10, "gm")]);
    let view = loaded(portal.clone()).await;

    portal.fail_reads(true);
    let err = view.load_all().await.unwrap_err();
    assert!(matches!(err, ClientError::Contract(ContractError::Other(_))), "{err:?}");

    let state = view.snapshot();
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.alert, Some(err.to_string()));
}

#[tokio::test]
async fn successful_reload_clears_the_alert() {
    let portal = MockPortal::with_waves(vec![raw_wave(ALICE, 10, "gm")]);
    let view = loaded(portal.clone()).await;

    portal.fail_reads(true);
    view.load_all().await.unwrap_err();
    assert!(view.snapshot().alert.is_some());

    portal.fail_reads(false);
    view.load_all().await.unwrap();
    let state = view.snapshot();
    assert_eq!(state.alert, None);
    assert_eq!(state.messages.len(), 1);
}

#[tokio::test]
async fn out_of_range_timestamp_fails_bulk_load() {
    let portal = MockPortal::with_waves(vec![raw_wave(ALICE, 10, "ok"), raw_wave(BOB, u64::MAX, "bad")]);
    let view = view(Some(MockProvider::authorized(portal, vec![ALICE])));

    let err = view.detect_session().await.unwrap_err();
    assert!(
        matches!(err, ClientError::InvalidTimestamp(ts) if ts == U256::from(u64::MAX)),
        "{err:?}"
    );
    assert!(view.snapshot().messages.is_empty());
    assert!(!view.is_subscribed());
}

#[tokio::test]
async fn bad_events_are_skipped() {
    let portal = MockPortal::new();
    let view = loaded(portal.clone()).await;

    portal.emit(raw_wave(BOB, u64::MAX, "far future"));
    portal.emit_error("invalid log data");
    portal.emit(raw_wave(BOB, 30, "fine"));
    wait_until(|| !view.snapshot().messages.is_empty()).await;

    let messages = view.snapshot().messages;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, "fine");
    assert!(view.is_subscribed());
}

#[tokio::test]
async fn nothing_to_bind_without_a_session() {
    let provider = MockProvider::new(MockPortal::with_waves(vec![raw_wave(ALICE, 10, "gm")]));
    let view = view(Some(provider.clone()));

    assert!(view.bind().is_none());
    view.load_all().await.unwrap();
    assert!(view.snapshot().messages.is_empty());
    assert!(provider.bindings().is_empty());

    assert!(waveportal_test_utils::view(None).bind().is_none());
}

#[tokio::test]
async fn handle_is_bound_once_per_session() {
    let provider = MockProvider::authorized(MockPortal::new(), vec![ALICE]);
    let view = view(Some(provider.clone()));
    view.detect_session().await.unwrap();

    view.load_all().await.unwrap();
    view.refresh_wave_count().await.unwrap();
    assert_eq!(provider.bindings().len(), 1);
}
