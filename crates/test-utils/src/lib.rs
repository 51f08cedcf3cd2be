#![warn(unused_crate_dependencies, unreachable_pub)]

use alloy_primitives::{Address, U256, address};
use std::{sync::Arc, time::Duration};
use waveportal_client::{ClientView, KeyValueStore, MemoryStore, RawWave};
use waveportal_config::Config;

mod logs;
pub use logs::{LogCapture, capture_logs};

mod portal;
pub use portal::{MockPortal, WaveOutcome};

mod provider;
pub use provider::MockProvider;

/// First default anvil account.
pub const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

/// Second default anvil account.
pub const BOB: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

/// Initializes tracing for tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Creates a view over `provider` with the default config and `store`.
pub fn view_with_store(
    provider: Option<MockProvider>,
    store: Arc<dyn KeyValueStore>,
) -> ClientView<MockProvider> {
    ClientView::new(provider, &Config::default(), store)
}

/// Creates a view over `provider` with the default config and an empty in-memory store.
pub fn view(provider: Option<MockProvider>) -> ClientView<MockProvider> {
    view_with_store(provider, Arc::new(MemoryStore::new()))
}

/// A wave from `waver` sent at `timestamp` seconds.
pub fn raw_wave(waver: Address, timestamp: u64, message: &str) -> RawWave {
    RawWave { waver, timestamp: U256::from(timestamp), message: message.to_string() }
}

/// Polls `cond` until it holds, panicking after one second.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    while !cond() {
        assert!(tokio::time::Instant::now() < deadline, "condition not met in time");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
