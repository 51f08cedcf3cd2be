use crate::{
    Bind, ClientError, KeyValueStore, ViewState, ViewTree, WaveCountCache, WaveSubscription,
    render,
};
use alloy_primitives::Address;
use parking_lot::Mutex;
use std::{fmt, sync::Arc};
use tokio::sync::watch;
use waveportal_config::Config;

/// The wave portal client view.
///
/// Owns the session, the contract handle, the live subscription and the [`ViewState`] every
/// renderer observes. Operations are spread over the `session`, `read` and `write` modules.
pub struct ClientView<P: Bind> {
    pub(crate) provider: Option<P>,
    pub(crate) contract_address: Address,
    pub(crate) gas_limit: u64,
    pub(crate) count_cache: WaveCountCache,
    pub(crate) state: Arc<watch::Sender<ViewState>>,
    /// Contract handle bound to the session account.
    pub(crate) portal: Mutex<Option<Arc<P::Portal>>>,
    pub(crate) subscription: Mutex<Option<WaveSubscription>>,
}

impl<P: Bind> ClientView<P> {
    /// Creates a view over an optional wallet provider.
    ///
    /// The wave count is hydrated from `store`.
    pub fn new(provider: Option<P>, config: &Config, store: Arc<dyn KeyValueStore>) -> Self {
        let count_cache = WaveCountCache::new(store, config.storage_key.clone());
        let state = ViewState { wave_count: count_cache.load(), ..Default::default() };
        Self {
            provider,
            contract_address: config.contract_address,
            gas_limit: config.gas_limit,
            count_cache,
            state: Arc::new(watch::Sender::new(state)),
            portal: Mutex::new(None),
            subscription: Mutex::new(None),
        }
    }

    /// Whether a wallet provider is installed.
    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    /// Returns a receiver notified on every state change.
    pub fn watch(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Renders the current state in the local time zone.
    pub fn render(&self) -> ViewTree {
        render::render(&self.state.borrow())
    }

    /// Whether a live `NewWave` subscription is installed.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.lock().as_ref().is_some_and(WaveSubscription::is_active)
    }

    /// Releases the live subscription.
    pub fn teardown(&self) {
        if self.subscription.lock().take().is_some() {
            debug!("released NewWave subscription");
        }
    }

    /// Records `err` as the alert and hands it back.
    pub(crate) fn report(&self, err: ClientError) -> ClientError {
        error!(%err, "operation failed");
        let alert = err.to_string();
        self.state.send_modify(|state| state.alert = Some(alert));
        err
    }
}

impl<P: Bind> fmt::Debug for ClientView<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientView")
            .field("has_provider", &self.provider.is_some())
            .field("contract_address", &self.contract_address)
            .field("gas_limit", &self.gas_limit)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
