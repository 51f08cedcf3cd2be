use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use futures::{StreamExt, channel::mpsc};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Notify;
use waveportal_client::{ContractError, PendingWave, RawWave, WavePortal, WaveStream};

/// How the next `wave` calls end.
#[derive(Clone, Debug, Default)]
pub enum WaveOutcome {
    /// Mined: the wave is recorded and the total incremented.
    #[default]
    Confirm,
    /// The call itself fails, nothing is sent.
    FailSend,
    /// Sent, but the transaction reverts.
    FailConfirm,
    /// Sent, confirmation waits for the notification.
    Hold(Arc<Notify>),
}

#[derive(Debug, Default)]
struct PortalState {
    waves: Vec<RawWave>,
    total: U256,
    outcome: WaveOutcome,
    fail_reads: bool,
    sent: Vec<(String, u64)>,
    subscribers: Vec<mpsc::UnboundedSender<Result<RawWave, ContractError>>>,
    nonce: u8,
}

/// An in-memory wave portal.
///
/// Confirmed waves are recorded but not emitted; use [`emit`](Self::emit) to deliver events.
#[derive(Clone, Debug, Default)]
pub struct MockPortal {
    inner: Arc<Mutex<PortalState>>,
}

impl MockPortal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `waves`, with a total equal to their number.
    pub fn with_waves(waves: Vec<RawWave>) -> Self {
        let portal = Self::new();
        {
            let mut state = portal.inner.lock();
            state.total = U256::from(waves.len());
            state.waves = waves;
        }
        portal
    }

    pub fn set_total(&self, total: u64) {
        self.inner.lock().total = U256::from(total);
    }

    pub fn total(&self) -> U256 {
        self.inner.lock().total
    }

    pub fn waves(&self) -> Vec<RawWave> {
        self.inner.lock().waves.clone()
    }

    pub fn set_outcome(&self, outcome: WaveOutcome) {
        self.inner.lock().outcome = outcome;
    }

    /// Makes every read fail.
    pub fn fail_reads(&self, fail: bool) {
        self.inner.lock().fail_reads = fail;
    }

    /// The message and gas limit of every sent `wave`.
    pub fn sent(&self) -> Vec<(String, u64)> {
        self.inner.lock().sent.clone()
    }

    /// Delivers `wave` to every open subscription, returning how many received it.
    pub fn emit(&self, wave: RawWave) -> usize {
        self.deliver(|| Ok(wave.clone()))
    }

    /// Delivers an undecodable event to every open subscription.
    pub fn emit_error(&self, msg: &str) -> usize {
        self.deliver(|| Err(ContractError::other(msg)))
    }

    fn deliver(&self, item: impl Fn() -> Result<RawWave, ContractError>) -> usize {
        let mut state = self.inner.lock();
        state.subscribers.retain(|tx| !tx.is_closed());
        state.subscribers.iter().filter(|tx| tx.unbounded_send(item()).is_ok()).count()
    }

    /// Number of subscriptions whose receiving end is still alive.
    pub fn active_subscribers(&self) -> usize {
        self.inner.lock().subscribers.iter().filter(|tx| !tx.is_closed()).count()
    }

    fn read_guard(&self) -> Result<(), ContractError> {
        if self.inner.lock().fail_reads {
            return Err(ContractError::other("execution reverted"));
        }
        Ok(())
    }
}

#[async_trait]
impl WavePortal for MockPortal {
    async fn get_all_waves(&self) -> Result<Vec<RawWave>, ContractError> {
        self.read_guard()?;
        Ok(self.waves())
    }

    async fn get_total_waves(&self) -> Result<U256, ContractError> {
        self.read_guard()?;
        Ok(self.total())
    }

    async fn wave(&self, message: &str, gas_limit: u64) -> Result<PendingWave, ContractError> {
        let (outcome, tx_hash) = {
            let mut state = self.inner.lock();
            state.sent.push((message.to_string(), gas_limit));
            if matches!(state.outcome, WaveOutcome::FailSend) {
                return Err(ContractError::other("insufficient funds for gas"));
            }
            state.nonce = state.nonce.wrapping_add(1);
            (state.outcome.clone(), TxHash::with_last_byte(state.nonce))
        };

        let inner = self.inner.clone();
        let wave =
            RawWave { waver: Address::ZERO, timestamp: U256::ZERO, message: message.to_string() };
        Ok(PendingWave::new(tx_hash, async move {
            match outcome {
                WaveOutcome::FailConfirm => return Err(ContractError::Reverted(tx_hash)),
                WaveOutcome::Hold(notify) => notify.notified().await,
                WaveOutcome::Confirm | WaveOutcome::FailSend => {}
            }
            let mut state = inner.lock();
            state.waves.push(wave);
            state.total += U256::from(1);
            Ok(())
        }))
    }

    async fn subscribe(&self) -> Result<WaveStream, ContractError> {
        self.read_guard()?;
        let (tx, rx) = mpsc::unbounded();
        self.inner.lock().subscribers.push(tx);
        Ok(rx.boxed())
    }
}
