use alloy_primitives::U256;
use std::{sync::Arc, time::Duration};
use tokio::sync::Notify;
use waveportal_client::{
    ClientError, ClientView, Controls, ContractError, FileStore, KeyValueStore, MemoryStore,
    WriteState,
};
use waveportal_config::DEFAULT_GAS_LIMIT;
use waveportal_test_utils::{
    ALICE, MockPortal, MockProvider, WaveOutcome, init_tracing, raw_wave, view, view_with_store,
};

async fn connected(portal: MockPortal, store: Arc<dyn KeyValueStore>) -> ClientView<MockProvider> {
    init_tracing();
    let view = view_with_store(Some(MockProvider::authorized(portal, vec![ALICE])), store);
    view.detect_session().await.unwrap();
    view
}

#[tokio::test]
async fn submit_confirms_and_refreshes_count() {
    let portal = MockPortal::with_waves(vec![raw_wave(ALICE, 10, "a"), raw_wave(ALICE, 20, "b")]);
    let store = Arc::new(MemoryStore::new());
    let view = connected(portal.clone(), store.clone()).await;

    let submitted = view.submit("hi".into()).await.unwrap();
    assert_eq!(submitted.total_waves, U256::from(3));
    assert_eq!(portal.sent(), vec![("hi".to_string(), DEFAULT_GAS_LIMIT)]);

    let state = view.snapshot();
    assert_eq!(state.write, WriteState::Idle);
    assert!(!state.is_pending());
    assert_eq!(state.wave_count, U256::from(3));
    assert_eq!(state.alert, None);
    assert_eq!(store.get("waveCount").unwrap().as_deref(), Some("3"));
}

#[tokio::test]
async fn failed_send_resets_pending() {
    let portal = MockPortal::with_waves(vec![raw_wave(ALICE, 10, "a")]);
    portal.set_outcome(WaveOutcome::FailSend);
    let store = Arc::new(MemoryStore::new());
    let view = connected(portal, store.clone()).await;

    let err = view.submit("hi".into()).await.unwrap_err();
    assert!(matches!(err, ClientError::Contract(ContractError::Other(_))), "{err:?}");

    let state = view.snapshot();
    assert_eq!(state.write, WriteState::Idle);
    assert_eq!(state.alert, Some(err.to_string()));
    // the count read before sending is kept
    assert_eq!(state.wave_count, U256::from(1));
    assert_eq!(store.get("waveCount").unwrap().as_deref(), Some("1"));
}

#[tokio::test]
async fn failed_confirmation_resets_pending() {
    let portal = MockPortal::new();
    portal.set_outcome(WaveOutcome::FailConfirm);
    let view = connected(portal.clone(), Arc::new(MemoryStore::new())).await;

    let err = view.submit("hi".into()).await.unwrap_err();
    assert!(matches!(err, ClientError::Contract(ContractError::Reverted(_))), "{err:?}");
    assert_eq!(view.snapshot().write, WriteState::Idle);
    assert_eq!(portal.total(), U256::ZERO);
}

#[tokio::test]
async fn second_submission_is_rejected_while_confirming() {
    let notify = Arc::new(Notify::new());
    let portal = MockPortal::new();
    portal.set_outcome(WaveOutcome::Hold(notify.clone()));
    let view = connected(portal.clone(), Arc::new(MemoryStore::new())).await;

    let first = view.submit("first".into());
    let second = async {
        let mut rx = view.watch();
        rx.wait_for(|state| state.is_pending()).await.unwrap();
        assert!(matches!(view.render().controls, Controls::Busy { .. }));

        let err = view.submit("second".into()).await.unwrap_err();
        assert!(matches!(err, ClientError::SubmissionInFlight), "{err:?}");
        assert!(view.snapshot().is_pending());

        notify.notify_one();
    };
    let (first, ()) = tokio::join!(first, second);

    assert_eq!(first.unwrap().total_waves, U256::from(1));
    assert_eq!(view.snapshot().write, WriteState::Idle);
    assert_eq!(portal.sent().len(), 1);
}

#[tokio::test]
async fn cancelled_submission_resets_pending() {
    let portal = MockPortal::new();
    portal.set_outcome(WaveOutcome::Hold(Arc::new(Notify::new())));
    let view = connected(portal, Arc::new(MemoryStore::new())).await;

    let res = tokio::time::timeout(Duration::from_millis(20), view.submit("hi".into())).await;
    assert!(res.is_err());
    assert_eq!(view.snapshot().write, WriteState::Idle);
}

#[tokio::test]
async fn submit_requires_a_session() {
    let view = view(Some(MockProvider::new(MockPortal::new())));
    let err = view.submit("hi".into()).await.unwrap_err();
    assert!(matches!(err, ClientError::NotConnected), "{err:?}");
    assert_eq!(view.snapshot().write, WriteState::Idle);

    let view = waveportal_test_utils::view(None);
    let err = view.submit("hi".into()).await.unwrap_err();
    assert!(matches!(err, ClientError::ProviderUnavailable), "{err:?}");
}

#[tokio::test]
async fn count_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    let portal = MockPortal::with_waves(vec![raw_wave(ALICE, 10, "a")]);
    let view = connected(portal, Arc::new(FileStore::new(&path))).await;
    view.submit("hi".into()).await.unwrap();
    drop(view);

    let restarted = view_with_store(None, Arc::new(FileStore::new(&path)));
    assert_eq!(restarted.snapshot().wave_count, U256::from(2));
    assert_eq!(restarted.detect_session().await.unwrap(), None);
    assert_eq!(restarted.snapshot().wave_count, U256::from(2));

    std::fs::write(&path, r#"{"waveCount":"many"}"#).unwrap();
    let restarted = view_with_store(None, Arc::new(FileStore::new(&path)));
    assert_eq!(restarted.snapshot().wave_count, U256::ZERO);

    let empty = view_with_store(None, Arc::new(FileStore::new(dir.path().join("missing.json"))));
    assert_eq!(empty.snapshot().wave_count, U256::ZERO);
}

#[tokio::test]
async fn refresh_wave_count_persists_and_publishes() {
    let portal = MockPortal::new();
    let store = Arc::new(MemoryStore::new());
    let view = connected(portal.clone(), store.clone()).await;
    let mut rx = view.watch();

    portal.set_total(42);
    assert_eq!(view.refresh_wave_count().await.unwrap(), U256::from(42));
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().wave_count, U256::from(42));
    assert_eq!(store.get("waveCount").unwrap().as_deref(), Some("42"));

    portal.fail_reads(true);
    assert!(view.refresh_wave_count().await.is_err());
    assert_eq!(view.snapshot().wave_count, U256::from(42));
}
