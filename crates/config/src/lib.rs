//! # waveportal-config
//!
//! Wave portal configuration.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

use alloy_primitives::{Address, address};
use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod error;
pub use error::ExtractConfigError;

// reexport so cli types can implement `figment::Provider` to easily merge compiler arguments
pub use figment;

/// The address of the deployed wave portal contract.
pub const WAVE_PORTAL_ADDRESS: Address = address!("0x99Df854c146B9010Ef6C14B40BC1b31fEB8EC3f6");

/// Gas ceiling attached to every `wave` call.
pub const DEFAULT_GAS_LIMIT: u64 = 300_000;

/// Storage key holding the last known total wave count.
pub const DEFAULT_STORAGE_KEY: &str = "waveCount";

/// Wave portal configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// The JSON-RPC endpoint of the wallet provider.
    ///
    /// `None` means no provider is installed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc_url: Option<String>,
    /// The contract every call is bound to.
    pub contract_address: Address,
    /// Gas ceiling passed as a call option to `wave`.
    pub gas_limit: u64,
    /// Path of the durable key/value store file.
    ///
    /// Defaults to `~/.waveportal/storage.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
    /// Key under which the wave count is cached.
    pub storage_key: String,
}

impl Config {
    /// The name of the config file.
    pub const FILE_NAME: &'static str = "waveportal.toml";

    /// The name of the directory waveportal reserves for itself under the user's home directory.
    pub const WAVEPORTAL_DIR_NAME: &'static str = ".waveportal";

    /// Environment variable prefix.
    pub const ENV_PREFIX: &'static str = "WAVEPORTAL_";

    /// Loads the `Config` from the current directory, the global config file and the
    /// environment.
    pub fn load() -> Result<Self, ExtractConfigError> {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::load_with_root(root)
    }

    /// Loads the `Config` using `root` to locate the local `waveportal.toml`.
    pub fn load_with_root(root: impl AsRef<Path>) -> Result<Self, ExtractConfigError> {
        Self::try_from(Self::figment_with_root(root))
    }

    /// Extracts a `Config` from `provider`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use waveportal_config::{Config, figment::providers::{Format, Toml}};
    ///
    /// let figment = Config::figment().merge(Toml::file("other.toml"));
    /// let config = Config::try_from(figment);
    /// ```
    pub fn try_from<T: Provider>(provider: T) -> Result<Self, ExtractConfigError> {
        trace!("load config with provider: {:?}", provider.metadata());
        let figment = Figment::from(provider);
        figment.extract::<Self>().map_err(ExtractConfigError::new)
    }

    /// Returns the default figment, rooted at the current directory.
    pub fn figment() -> Figment {
        let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::figment_with_root(root)
    }

    /// Returns the figment merging, in order of increasing precedence: defaults, the global
    /// `~/.waveportal/waveportal.toml`, `<root>/waveportal.toml`, `ETH_RPC_URL` and the
    /// `WAVEPORTAL_` prefixed environment variables.
    pub fn figment_with_root(root: impl AsRef<Path>) -> Figment {
        let mut figment = Figment::from(Self::default());

        if let Some(global_toml) = Self::waveportal_dir_toml().filter(|p| p.exists()) {
            figment = figment.merge(Toml::file(global_toml));
        }

        figment
            .merge(Toml::file(root.as_ref().join(Self::FILE_NAME)))
            .merge(Env::raw().only(&["ETH_RPC_URL"]).map(|_| "rpc_url".into()))
            .merge(Env::prefixed(Self::ENV_PREFIX).ignore(&["PRIVATE_KEY", "DEBUG"]))
    }

    /// Returns the configured RPC URL, if any provider is installed.
    pub fn rpc_url(&self) -> Option<&str> {
        self.rpc_url.as_deref().map(str::trim).filter(|url| !url.is_empty())
    }

    /// Returns the storage path, falling back to `~/.waveportal/storage.json`.
    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage_path.clone().or_else(Self::default_storage_path)
    }

    /// Returns the path to the global config file: `~/.waveportal/waveportal.toml`.
    pub fn waveportal_dir_toml() -> Option<PathBuf> {
        Self::waveportal_dir().map(|p| p.join(Self::FILE_NAME))
    }

    /// Returns the path to waveportal's config dir: `~/.waveportal/`.
    pub fn waveportal_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(Self::WAVEPORTAL_DIR_NAME))
    }

    /// Returns the path to the default storage file: `~/.waveportal/storage.json`.
    pub fn default_storage_path() -> Option<PathBuf> {
        Self::waveportal_dir().map(|p| p.join("storage.json"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: None,
            contract_address: WAVE_PORTAL_ADDRESS,
            gas_limit: DEFAULT_GAS_LIMIT,
            storage_path: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Provider for Config {
    fn metadata(&self) -> Metadata {
        Metadata::named("Wave Portal Config")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(self).data()
    }
}
