//! Wallet detection and account access.

use crate::{Bind, ClientError, ClientView};
use alloy_primitives::Address;
use waveportal_wallets::WalletProvider;

impl<P: WalletProvider + Bind> ClientView<P> {
    /// Looks for an already authorized account and loads the waves if one is found.
    ///
    /// Never prompts. Without a wallet provider this only logs and returns `Ok(None)`.
    pub async fn detect_session(&self) -> Result<Option<Address>, ClientError> {
        let Some(provider) = &self.provider else {
            warn!("no wallet provider detected, install a wallet to continue");
            return Ok(None);
        };

        let accounts = provider.request_accounts().await.map_err(|err| self.report(err.into()))?;
        let Some(account) = accounts.first().copied() else {
            info!("no authorized account found");
            return Ok(None);
        };
        debug!(%account, "found an authorized account");

        let wave_count = self.count_cache.load();
        self.state.send_modify(|state| state.wave_count = wave_count);

        self.establish(account).await?;
        Ok(Some(account))
    }

    /// Asks the wallet for account access and loads the waves.
    pub async fn connect(&self) -> Result<Address, ClientError> {
        let Some(provider) = &self.provider else {
            return Err(self.report(ClientError::ProviderUnavailable));
        };

        let accounts = provider.request_access().await.map_err(|err| self.report(err.into()))?;
        let Some(account) = accounts.first().copied() else {
            return Err(self.report(ClientError::NoAccounts));
        };
        info!(%account, "connected");

        self.establish(account).await?;
        Ok(account)
    }

    async fn establish(&self, account: Address) -> Result<(), ClientError> {
        // neither the handle nor the live subscription may outlive the previous account
        self.portal.lock().take();
        self.teardown();
        self.state.send_modify(|state| {
            state.account = Some(account);
            state.alert = None;
        });
        self.load_all().await
    }
}
