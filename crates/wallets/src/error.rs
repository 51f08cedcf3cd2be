use alloy_primitives::hex::FromHexError;
use alloy_signer_local::LocalSignerError;
use alloy_transport::TransportError;

#[derive(Debug, thiserror::Error)]
pub enum PrivateKeyError {
    #[error("Failed to create wallet from private key. Private key is invalid hex: {0}")]
    InvalidHex(#[from] FromHexError),
    #[error(
        "Failed to create wallet from private key. Invalid private key. But env var {0} exists. Is the `$` anchor missing?"
    )]
    ExistsAsEnvVar(String),
    #[error("Failed to create wallet from private key: {0}")]
    Signer(#[from] LocalSignerError),
}

/// Errors raised at the wallet provider boundary.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// The user (or the wallet on their behalf) declined the request.
    #[error("{operation} request rejected: {reason}")]
    Rejected { operation: &'static str, reason: String },
    #[error("invalid provider URL {url:?}: {source}")]
    InvalidUrl { url: String, source: url::ParseError },
    #[error(transparent)]
    PrivateKey(#[from] PrivateKeyError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl WalletError {
    /// Returns `true` if the wallet declined the request.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
