//! Contract binding and the read path.

use crate::{Bind, ClientError, ClientView, WavePortal, WaveSubscription, message::normalize};
use std::sync::Arc;

impl<P: Bind> ClientView<P> {
    /// Returns the contract handle bound to the session account, binding it on first use.
    ///
    /// Returns `None` if there is no provider or no account.
    pub fn bind(&self) -> Option<Arc<P::Portal>> {
        let mut portal = self.portal.lock();
        if let Some(portal) = portal.as_ref() {
            return Some(portal.clone());
        }

        let Some(provider) = &self.provider else {
            warn!("cannot bind the wave portal without a wallet provider");
            return None;
        };
        let Some(account) = self.state.borrow().account else {
            warn!("cannot bind the wave portal without an account");
            return None;
        };

        let bound = Arc::new(provider.bind(self.contract_address, account));
        debug!(address = %self.contract_address, %account, "bound wave portal");
        *portal = Some(bound.clone());
        Some(bound)
    }

    /// Like [`bind`](Self::bind), but fails with the reason the handle is missing.
    pub(crate) fn require_portal(&self) -> Result<Arc<P::Portal>, ClientError> {
        self.bind().ok_or_else(|| {
            self.report(if self.provider.is_none() {
                ClientError::ProviderUnavailable
            } else {
                ClientError::NotConnected
            })
        })
    }

    /// Replaces the messages with every wave recorded on chain, then subscribes to new ones.
    ///
    /// A no-op without a contract handle. Nothing is replaced if the bulk read fails.
    pub async fn load_all(&self) -> Result<(), ClientError> {
        let Some(portal) = self.bind() else { return Ok(()) };

        let raw = portal.get_all_waves().await.map_err(|err| self.report(err.into()))?;
        let messages = normalize(raw).map_err(|err| self.report(err))?;
        let count = messages.len();

        // the previous subscription would append onto the new snapshot
        self.teardown();
        self.state.send_modify(|state| {
            state.messages = messages;
            state.alert = None;
        });
        debug!(count, "loaded waves");

        let stream = portal.subscribe().await.map_err(|err| self.report(err.into()))?;
        *self.subscription.lock() = Some(WaveSubscription::spawn(stream, self.state.clone()));
        trace!("subscribed to NewWave");
        Ok(())
    }
}
