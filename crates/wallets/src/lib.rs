//! # waveportal-wallets
//!
//! Wallet provider capability for the wave portal client.
//!
//! A wallet provider follows the account half of
//! [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193): `eth_accounts` lists the accounts the
//! user already authorized, `eth_requestAccounts` asks for access and may be rejected with code
//! `4001`. The provider is reached over JSON-RPC; when the RPC stack carries a local signer, the
//! signer's account is the only authorized account.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod error;
pub use error::{PrivateKeyError, WalletError};

mod provider;
pub use provider::{RpcWallet, WalletProvider};

pub mod utils;
