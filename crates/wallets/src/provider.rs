use crate::WalletError;
use alloy_json_rpc::ErrorPayload;
use alloy_primitives::Address;
use alloy_provider::Provider;
use async_trait::async_trait;
use std::sync::Arc;

/// EIP-1193 error code for a request the user rejected.
const USER_REJECTED_REQUEST: i64 = 4001;

/// JSON-RPC error code for a method the node does not implement.
const METHOD_NOT_FOUND: i64 = -32601;

/// Account access on a wallet provider.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Returns the accounts the user already authorized, without prompting (`eth_accounts`).
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError>;

    /// Asks the user for account access, possibly prompting (`eth_requestAccounts`).
    async fn request_access(&self) -> Result<Vec<Address>, WalletError>;
}

#[async_trait]
impl<T: WalletProvider + ?Sized> WalletProvider for Arc<T> {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        (**self).request_accounts().await
    }

    async fn request_access(&self) -> Result<Vec<Address>, WalletError> {
        (**self).request_access().await
    }
}

/// A wallet provider reached over JSON-RPC.
#[derive(Clone, Debug)]
pub struct RpcWallet<P> {
    provider: P,
    /// Account of the local signer filler, if the provider carries one.
    signer: Option<Address>,
}

impl<P: Provider> RpcWallet<P> {
    /// Wraps a provider whose accounts are managed by the node.
    pub fn new(provider: P) -> Self {
        Self { provider, signer: None }
    }

    /// Wraps a provider that signs locally as `signer`.
    pub fn with_signer(provider: P, signer: Address) -> Self {
        Self { provider, signer: Some(signer) }
    }

    /// Returns the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the local signer's account, if any.
    pub fn signer(&self) -> Option<Address> {
        self.signer
    }
}

#[async_trait]
impl<P: Provider> WalletProvider for RpcWallet<P> {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        if let Some(signer) = self.signer {
            return Ok(vec![signer]);
        }
        let accounts = self.provider.get_accounts().await?;
        trace!(count = accounts.len(), "eth_accounts");
        Ok(accounts)
    }

    async fn request_access(&self) -> Result<Vec<Address>, WalletError> {
        if let Some(signer) = self.signer {
            return Ok(vec![signer]);
        }
        let err = match self
            .provider
            .raw_request::<_, Vec<Address>>("eth_requestAccounts".into(), ())
            .await
        {
            Ok(accounts) => return Ok(accounts),
            Err(err) => err,
        };
        match err.as_error_resp() {
            Some(ErrorPayload { code: USER_REJECTED_REQUEST, message, .. }) => {
                Err(WalletError::Rejected {
                    operation: "Account access",
                    reason: message.to_string(),
                })
            }
            Some(ErrorPayload { code: METHOD_NOT_FOUND, .. }) => {
                debug!("eth_requestAccounts not supported, falling back to eth_accounts");
                self.request_accounts().await
            }
            _ => Err(err.into()),
        }
    }
}
