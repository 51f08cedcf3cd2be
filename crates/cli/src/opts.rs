use alloy_primitives::Address;
use alloy_provider::DynProvider;
use alloy_signer_local::PrivateKeySigner;
use clap::{Parser, ValueHint};
use eyre::Result;
use serde::Serialize;
use std::{path::PathBuf, sync::Arc};
use waveportal_client::{ClientView, FileStore, KeyValueStore, MemoryStore};
use waveportal_config::{
    Config,
    figment::{
        self, Figment, Metadata, Profile, Provider,
        providers::Serialized,
        value::{Dict, Map},
    },
};
use waveportal_wallets::{
    RpcWallet,
    utils::{connect_wallet, create_private_key_signer},
};

/// The view the commands drive.
pub type View = ClientView<RpcWallet<DynProvider>>;

/// Options shared by every command.
#[derive(Clone, Debug, Default, Serialize, Parser)]
pub struct WaveportalOpts {
    /// The JSON-RPC endpoint of the wallet provider.
    ///
    /// Without one, no wallet provider is available.
    #[arg(long, short, global = true, visible_alias = "rpc", value_name = "URL")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,

    /// The address of the wave portal contract.
    #[arg(long, global = true, value_name = "ADDRESS")]
    #[serde(rename = "contract_address", skip_serializing_if = "Option::is_none")]
    pub contract: Option<Address>,

    /// Gas limit of the `wave` transaction.
    #[arg(long, global = true, value_name = "GAS")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,

    /// Path of the file caching the wave count.
    #[arg(long, global = true, value_name = "PATH", value_hint = ValueHint::FilePath)]
    #[serde(rename = "storage_path", skip_serializing_if = "Option::is_none")]
    pub storage: Option<PathBuf>,

    /// Sign transactions locally with this private key instead of the node's accounts.
    #[arg(
        long,
        global = true,
        value_name = "RAW_PRIVATE_KEY",
        env = "WAVEPORTAL_PRIVATE_KEY",
        hide_env_values = true
    )]
    #[serde(skip)]
    pub private_key: Option<String>,
}

impl Provider for WaveportalOpts {
    fn metadata(&self) -> Metadata {
        Metadata::named("WaveportalOpts")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}

impl WaveportalOpts {
    /// Returns the figment of the loaded config with these options merged on top.
    pub fn figment(&self) -> Figment {
        Config::figment().merge(self)
    }

    /// Loads the config, with these options taking precedence.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::try_from(self.figment())?)
    }

    /// Returns the local signer, if a private key was given.
    pub fn signer(&self) -> Result<Option<PrivateKeySigner>> {
        self.private_key
            .as_deref()
            .map(|pk| create_private_key_signer(pk).map_err(Into::into))
            .transpose()
    }

    /// Builds the client view described by `config`.
    pub fn view(&self, config: &Config) -> Result<View> {
        let provider = match config.rpc_url() {
            Some(url) => Some(connect_wallet(url, self.signer()?)?),
            None => None,
        };
        let store: Arc<dyn KeyValueStore> = match config.storage_path() {
            Some(path) => Arc::new(FileStore::new(path)),
            None => {
                warn!("no home directory, the wave count is not persisted");
                Arc::new(MemoryStore::new())
            }
        };
        Ok(ClientView::new(provider, config, store))
    }
}
