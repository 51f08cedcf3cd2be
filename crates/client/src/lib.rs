//! # waveportal-client
//!
//! The wave portal client view.
//!
//! [`ClientView`] connects to a wallet provider, binds the wave portal contract to the session
//! account, loads every recorded wave, follows `NewWave` events and submits new waves. Its state
//! is published through a [`tokio::sync::watch`] channel and rendered with [`render`].

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod contract;
pub use contract::{Bind, IWavePortal, PendingWave, WavePortal, WavePortalContract, WaveStream};

mod error;
pub use error::{ClientError, ContractError, StorageError};

pub mod message;
pub use message::{Message, RawWave};

pub mod render;
pub use render::{Controls, ViewTree, WaveCard};

mod state;
pub use state::{SubmissionInput, Submitted, ViewState, WriteState};

pub mod storage;
pub use storage::{FileStore, KeyValueStore, MemoryStore, WaveCountCache};

mod subscription;
pub use subscription::WaveSubscription;

mod view;
pub use view::ClientView;

mod read;
mod session;
mod write;

pub use waveportal_wallets::WalletProvider;
