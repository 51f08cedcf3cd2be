//! The wave portal contract binding.

use crate::{ContractError, RawWave};
use alloy_contract::SolCallBuilder;
use alloy_network::ReceiptResponse;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::{PendingTransactionError, Provider};
use alloy_sol_types::sol;
use async_trait::async_trait;
use futures::{FutureExt, StreamExt, future::BoxFuture, stream::BoxStream};
use std::{fmt, future::Future, sync::Arc};
use waveportal_wallets::RpcWallet;

sol! {
    #[sol(rpc)]
    interface IWavePortal {
        #[derive(Debug)]
        struct Wave {
            address waver;
            string message;
            uint256 timestamp;
        }

        #[derive(Debug)]
        event NewWave(address indexed from, uint256 timestamp, string message);

        function wave(string memory _message) external;
        function getAllWaves() external view returns (Wave[] memory);
        function getTotalWaves() external view returns (uint256);
    }
}

/// A stream of `NewWave` deliveries.
pub type WaveStream = BoxStream<'static, Result<RawWave, ContractError>>;

/// The contract surface the client view depends on.
#[async_trait]
pub trait WavePortal: Send + Sync {
    /// Returns every wave ever recorded, in contract order.
    async fn get_all_waves(&self) -> Result<Vec<RawWave>, ContractError>;

    /// Returns the total number of waves.
    async fn get_total_waves(&self) -> Result<U256, ContractError>;

    /// Sends a `wave` transaction carrying `message`, with `gas_limit` as gas ceiling.
    async fn wave(&self, message: &str, gas_limit: u64) -> Result<PendingWave, ContractError>;

    /// Subscribes to `NewWave` events emitted from now on.
    async fn subscribe(&self) -> Result<WaveStream, ContractError>;
}

#[async_trait]
impl<T: WavePortal + ?Sized> WavePortal for Arc<T> {
    async fn get_all_waves(&self) -> Result<Vec<RawWave>, ContractError> {
        (**self).get_all_waves().await
    }

    async fn get_total_waves(&self) -> Result<U256, ContractError> {
        (**self).get_total_waves().await
    }

    async fn wave(&self, message: &str, gas_limit: u64) -> Result<PendingWave, ContractError> {
        (**self).wave(message, gas_limit).await
    }

    async fn subscribe(&self) -> Result<WaveStream, ContractError> {
        (**self).subscribe().await
    }
}

/// A sent `wave` transaction awaiting confirmation.
#[must_use = "a pending wave does nothing unless waited on"]
pub struct PendingWave {
    tx_hash: TxHash,
    confirmation: BoxFuture<'static, Result<(), ContractError>>,
}

impl PendingWave {
    pub fn new(
        tx_hash: TxHash,
        confirmation: impl Future<Output = Result<(), ContractError>> + Send + 'static,
    ) -> Self {
        Self { tx_hash, confirmation: confirmation.boxed() }
    }

    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Waits until the transaction is included, failing if it reverted.
    pub async fn wait(self) -> Result<TxHash, ContractError> {
        self.confirmation.await?;
        Ok(self.tx_hash)
    }
}

impl fmt::Debug for PendingWave {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingWave").field("tx_hash", &self.tx_hash).finish_non_exhaustive()
    }
}

/// Produces contract handles bound to an account.
pub trait Bind {
    type Portal: WavePortal + 'static;

    /// Binds the contract at `address` to `account`, which signs every state-changing call.
    fn bind(&self, address: Address, account: Address) -> Self::Portal;
}

impl<P: Provider + Clone + 'static> Bind for RpcWallet<P> {
    type Portal = WavePortalContract<P>;

    fn bind(&self, address: Address, account: Address) -> Self::Portal {
        WavePortalContract::new(address, account, self.provider().clone())
    }
}

/// [`WavePortal`] over a JSON-RPC provider.
#[derive(Clone, Debug)]
pub struct WavePortalContract<P> {
    instance: IWavePortal::IWavePortalInstance<P>,
    account: Address,
}

impl<P: Provider + Clone + 'static> WavePortalContract<P> {
    pub fn new(address: Address, account: Address, provider: P) -> Self {
        Self { instance: IWavePortal::new(address, provider), account }
    }

    pub fn address(&self) -> &Address {
        self.instance.address()
    }

    pub fn account(&self) -> Address {
        self.account
    }

    fn wave_call(
        &self,
        message: &str,
        gas_limit: u64,
    ) -> SolCallBuilder<&P, IWavePortal::waveCall> {
        self.instance.wave(message.to_string()).from(self.account).gas(gas_limit)
    }
}

impl From<IWavePortal::Wave> for RawWave {
    fn from(wave: IWavePortal::Wave) -> Self {
        Self { waver: wave.waver, timestamp: wave.timestamp, message: wave.message }
    }
}

impl From<IWavePortal::NewWave> for RawWave {
    fn from(event: IWavePortal::NewWave) -> Self {
        Self { waver: event.from, timestamp: event.timestamp, message: event.message }
    }
}

#[async_trait]
impl<P: Provider + Clone + 'static> WavePortal for WavePortalContract<P> {
    async fn get_all_waves(&self) -> Result<Vec<RawWave>, ContractError> {
        let waves = self.instance.getAllWaves().call().await?;
        Ok(waves.into_iter().map(Into::into).collect())
    }

    async fn get_total_waves(&self) -> Result<U256, ContractError> {
        Ok(self.instance.getTotalWaves().call().await?)
    }

    async fn wave(&self, message: &str, gas_limit: u64) -> Result<PendingWave, ContractError> {
        let pending = self.wave_call(message, gas_limit).send().await?;
        let tx_hash = *pending.tx_hash();
        trace!(%tx_hash, gas_limit, "sent wave");

        let provider = self.instance.provider().clone();
        Ok(PendingWave::new(tx_hash, async move {
            // automining nodes have the receipt before any block is watched
            let receipt = match provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(PendingTransactionError::from)?
            {
                Some(receipt) => receipt,
                None => pending.get_receipt().await?,
            };
            if !receipt.status() {
                return Err(ContractError::Reverted(tx_hash));
            }
            Ok(())
        }))
    }

    async fn subscribe(&self) -> Result<WaveStream, ContractError> {
        let poller =
            self.instance.NewWave_filter().watch().await.map_err(ContractError::Subscription)?;
        let stream = poller.into_stream().map(|item| -> Result<RawWave, ContractError> {
            let (event, _log) = item?;
            Ok(RawWave::from(event))
        });
        Ok(stream.boxed())
    }
}
