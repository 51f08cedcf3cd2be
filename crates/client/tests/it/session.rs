use alloy_primitives::U256;
use std::sync::Arc;
use tracing::Level;
use waveportal_client::{ClientError, KeyValueStore, MemoryStore};
use waveportal_config::WAVE_PORTAL_ADDRESS;
use waveportal_test_utils::{
    ALICE, BOB, MockPortal, MockProvider, capture_logs, raw_wave, view, view_with_store,
};
use waveportal_wallets::WalletError;

#[tokio::test]
async fn no_provider_is_a_silent_no_op() {
    let (_guard, logs) = capture_logs(Level::WARN);
    let view = view(None);

    assert_eq!(view.detect_session().await.unwrap(), None);

    let state = view.snapshot();
    assert_eq!(state.account, None);
    assert_eq!(state.alert, None);
    assert!(state.messages.is_empty());

    let lines = logs.lines();
    assert_eq!(lines.len(), 1, "{lines:#?}");
    assert!(lines[0].contains("no wallet provider detected"), "{}", lines[0]);
}

#[tokio::test]
async fn detects_authorized_account_and_loads() {
    let portal =
        MockPortal::with_waves(vec![raw_wave(ALICE, 10, "first"), raw_wave(BOB, 20, "second")]);
    let provider = MockProvider::authorized(portal, vec![BOB, ALICE]);
    let store = Arc::new(MemoryStore::new());
    store.set("waveCount", "5").unwrap();
    let view = view_with_store(Some(provider.clone()), store);
    assert_eq!(view.snapshot().wave_count, U256::from(5));

    assert_eq!(view.detect_session().await.unwrap(), Some(BOB));

    let state = view.snapshot();
    assert_eq!(state.account, Some(BOB));
    let texts: Vec<_> = state.messages.iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, ["first", "second"]);
    // the cached count is not reconciled with the list
    assert_eq!(state.wave_count, U256::from(5));
    assert!(view.is_subscribed());
    assert_eq!(provider.bindings(), vec![(WAVE_PORTAL_ADDRESS, BOB)]);
    assert_eq!(provider.access_requests(), 0);
}

#[tokio::test]
async fn no_authorized_account_does_not_prompt() {
    let provider = MockProvider::new(MockPortal::new()).grant(vec![ALICE]);
    let view = view(Some(provider.clone()));

    assert_eq!(view.detect_session().await.unwrap(), None);
    assert_eq!(view.snapshot().account, None);
    assert_eq!(provider.access_requests(), 0);
    assert!(provider.bindings().is_empty());
    assert!(!view.is_subscribed());
}

#[tokio::test]
async fn connect_grants_account_and_loads() {
    let portal = MockPortal::with_waves(vec![raw_wave(ALICE, 10, "gm")]);
    let provider = MockProvider::new(portal).grant(vec![ALICE]);
    let view = view(Some(provider.clone()));

    assert_eq!(view.connect().await.unwrap(), ALICE);

    let state = view.snapshot();
    assert_eq!(state.account, Some(ALICE));
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.alert, None);
    assert_eq!(provider.access_requests(), 1);

    // the account is authorized from now on
    let restarted = waveportal_test_utils::view(Some(provider));
    assert_eq!(restarted.detect_session().await.unwrap(), Some(ALICE));
}

#[tokio::test]
async fn rejected_connect_leaves_session_empty() {
    let portal = MockPortal::with_waves(vec![raw_wave(ALICE, 10, "gm")]);
    let provider = MockProvider::new(portal).grant(vec![ALICE]).reject_access();
    let view = view(Some(provider.clone()));

    let err = view.connect().await.unwrap_err();
    assert!(
        matches!(err, ClientError::Wallet(WalletError::Rejected { .. })),
        "unexpected error: {err:?}"
    );

    let state = view.snapshot();
    assert_eq!(state.account, None);
    assert!(state.messages.is_empty());
    assert_eq!(state.alert, Some(err.to_string()));
    assert!(provider.bindings().is_empty());
}

#[tokio::test]
async fn connect_without_provider_is_reported() {
    let view = view(None);

    let err = view.connect().await.unwrap_err();
    assert!(matches!(err, ClientError::ProviderUnavailable), "{err:?}");
    assert_eq!(view.snapshot().account, None);
    assert_eq!(
        view.snapshot().alert.as_deref(),
        Some("no wallet provider detected, install a wallet to continue")
    );
}

#[tokio::test]
async fn connect_without_granted_account_fails() {
    let view = view(Some(MockProvider::new(MockPortal::new())));

    let err = view.connect().await.unwrap_err();
    assert!(matches!(err, ClientError::NoAccounts), "{err:?}");
    assert_eq!(view.snapshot().account, None);
}

#[tokio::test]
async fn switching_accounts_releases_the_previous_subscription() {
    let portal = MockPortal::with_waves(vec![raw_wave(ALICE, 10, "gm")]);
    let provider = MockProvider::authorized(portal.clone(), vec![ALICE]).grant(vec![BOB]);
    let view = view(Some(provider.clone()));
    assert_eq!(view.detect_session().await.unwrap(), Some(ALICE));
    assert_eq!(portal.active_subscribers(), 1);

    portal.fail_reads(true);
    view.connect().await.unwrap_err();

    assert_eq!(view.snapshot().account, Some(BOB));
    assert!(!view.is_subscribed());
    waveportal_test_utils::wait_until(|| portal.active_subscribers() == 0).await;
    assert_eq!(portal.emit(raw_wave(ALICE, 20, "stale")), 0);
    assert_eq!(view.snapshot().messages.len(), 1);
    assert_eq!(provider.bindings(), vec![(WAVE_PORTAL_ADDRESS, ALICE), (WAVE_PORTAL_ADDRESS, BOB)]);
}
