use crate::MockPortal;
use alloy_primitives::Address;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use waveportal_client::Bind;
use waveportal_wallets::{WalletError, WalletProvider};

#[derive(Debug, Default)]
struct ProviderState {
    authorized: Vec<Address>,
    grantable: Vec<Address>,
    reject_access: bool,
    access_requests: usize,
    bindings: Vec<(Address, Address)>,
}

/// An in-memory wallet provider whose contract handles all point to one [`MockPortal`].
#[derive(Clone, Debug, Default)]
pub struct MockProvider {
    inner: Arc<Mutex<ProviderState>>,
    portal: MockPortal,
}

impl MockProvider {
    /// A provider with no authorized account, granting none.
    pub fn new(portal: MockPortal) -> Self {
        Self { inner: Default::default(), portal }
    }

    /// A provider where `accounts` are already authorized.
    pub fn authorized(portal: MockPortal, accounts: Vec<Address>) -> Self {
        let provider = Self::new(portal);
        provider.inner.lock().authorized = accounts;
        provider
    }

    /// Accounts returned, and then authorized, by the next access request.
    pub fn grant(self, accounts: Vec<Address>) -> Self {
        self.inner.lock().grantable = accounts;
        self
    }

    /// Makes access requests fail as if the user rejected them.
    pub fn reject_access(self) -> Self {
        self.inner.lock().reject_access = true;
        self
    }

    pub fn portal(&self) -> &MockPortal {
        &self.portal
    }

    pub fn access_requests(&self) -> usize {
        self.inner.lock().access_requests
    }

    /// Every `(contract, account)` pair a handle was bound to.
    pub fn bindings(&self) -> Vec<(Address, Address)> {
        self.inner.lock().bindings.clone()
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        Ok(self.inner.lock().authorized.clone())
    }

    async fn request_access(&self) -> Result<Vec<Address>, WalletError> {
        let mut state = self.inner.lock();
        state.access_requests += 1;
        if state.reject_access {
            return Err(WalletError::Rejected {
                operation: "Account access",
                reason: "User rejected the request.".to_string(),
            });
        }
        state.authorized = state.grantable.clone();
        Ok(state.authorized.clone())
    }
}

impl Bind for MockProvider {
    type Portal = MockPortal;

    fn bind(&self, address: Address, account: Address) -> Self::Portal {
        self.inner.lock().bindings.push((address, account));
        self.portal.clone()
    }
}
