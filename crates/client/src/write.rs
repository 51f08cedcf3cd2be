//! The write path.

use crate::{
    Bind, ClientError, ClientView, SubmissionInput, Submitted, ViewState, WavePortal, WriteState,
};
use alloy_primitives::{TxHash, U256};
use tokio::sync::watch;

/// Exclusive access to the write path.
///
/// Resets the write state to [`WriteState::Idle`] when dropped, whatever the outcome.
struct WriteGuard<'a> {
    state: &'a watch::Sender<ViewState>,
}

impl<'a> WriteGuard<'a> {
    /// Moves `Idle` to `Sending`, or returns `None` if a submission is in flight.
    fn acquire(state: &'a watch::Sender<ViewState>) -> Option<Self> {
        let acquired = state.send_if_modified(|state| {
            if !state.write.is_idle() {
                return false;
            }
            state.write = WriteState::Sending;
            state.alert = None;
            true
        });
        acquired.then_some(Self { state })
    }

    fn confirming(&self, tx_hash: TxHash) {
        self.state.send_modify(|state| state.write = WriteState::Confirming { tx_hash });
    }
}

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|state| state.write = WriteState::Idle);
    }
}

impl<P: Bind> ClientView<P> {
    /// Waves at the portal with `input`, waiting for confirmation.
    ///
    /// Refreshes the wave count before sending and after confirmation. Fails with
    /// [`ClientError::SubmissionInFlight`] while another wave is being submitted.
    pub async fn submit(&self, input: SubmissionInput) -> Result<Submitted, ClientError> {
        let portal = self.require_portal()?;
        let Some(guard) = WriteGuard::acquire(&self.state) else {
            return Err(self.report(ClientError::SubmissionInFlight));
        };

        let sent = self.send_and_confirm(&*portal, &input, &guard).await;
        drop(guard);
        let tx_hash = sent.map_err(|err| self.report(err))?;

        let total_waves = self.refresh_with(&*portal).await.map_err(|err| self.report(err))?;
        info!(%tx_hash, %total_waves, "wave confirmed");
        Ok(Submitted { tx_hash, total_waves })
    }

    async fn send_and_confirm(
        &self,
        portal: &P::Portal,
        input: &SubmissionInput,
        guard: &WriteGuard<'_>,
    ) -> Result<TxHash, ClientError> {
        let count = self.refresh_with(portal).await?;
        debug!(%count, "received total wave count");

        let pending = portal.wave(input.as_str(), self.gas_limit).await?;
        let tx_hash = pending.tx_hash();
        guard.confirming(tx_hash);
        info!(%tx_hash, "mining");

        pending.wait().await?;
        debug!(%tx_hash, "mined");
        Ok(tx_hash)
    }

    /// Reads the total wave count, persists it and publishes it.
    pub async fn refresh_wave_count(&self) -> Result<U256, ClientError> {
        let portal = self.require_portal()?;
        self.refresh_with(&*portal).await.map_err(|err| self.report(err))
    }

    async fn refresh_with(&self, portal: &P::Portal) -> Result<U256, ClientError> {
        let count = portal.get_total_waves().await?;
        self.count_cache.store(count)?;
        self.state.send_modify(|state| state.wave_count = count);
        Ok(count)
    }
}
