use alloy_primitives::{TxHash, U256};
use alloy_provider::PendingTransactionError;
use alloy_transport::TransportError;
use waveportal_wallets::WalletError;

/// Errors raised at the contract boundary.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("contract call failed: {0}")]
    Call(#[from] alloy_contract::Error),
    #[error("failed to confirm transaction: {0}")]
    Pending(#[from] PendingTransactionError),
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error("failed to subscribe to NewWave: {0}")]
    Subscription(#[source] TransportError),
    #[error("failed to decode NewWave: {0}")]
    Decode(#[from] alloy_sol_types::Error),
    #[error("{0}")]
    Other(String),
}

impl ContractError {
    /// Creates an error from a plain message.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}

/// Errors raised by the durable key/value store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to access storage at {path:?}: {source}")]
    Io { path: std::path::PathBuf, source: std::io::Error },
    #[error("storage at {path:?} is not a JSON object: {source}")]
    Json { path: std::path::PathBuf, source: serde_json::Error },
}

/// Errors surfaced by the client view.
///
/// Every error returned by a [`ClientView`](crate::ClientView) operation is also recorded as the
/// view's alert.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("no wallet provider detected, install a wallet to continue")]
    ProviderUnavailable,
    #[error("the wallet did not return any account")]
    NoAccounts,
    #[error("no account is connected")]
    NotConnected,
    #[error("a wave is already being submitted")]
    SubmissionInFlight,
    #[error("timestamp {0} does not fit a date-time")]
    InvalidTimestamp(U256),
    #[error(transparent)]
    Wallet(#[from] WalletError),
    #[error(transparent)]
    Contract(#[from] ContractError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
