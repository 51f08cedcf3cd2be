use crate::{PrivateKeyError, RpcWallet, WalletError};
use alloy_network::EthereumWallet;
use alloy_primitives::{B256, hex::FromHex};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_signer_local::{LocalSignerError, PrivateKeySigner};
use url::Url;

fn ensure_pk_not_env(pk: &str) -> Result<(), PrivateKeyError> {
    if !pk.starts_with("0x") && std::env::var(pk).is_ok() {
        return Err(PrivateKeyError::ExistsAsEnvVar(pk.to_string()));
    }
    Ok(())
}

/// Validates and sanitizes user inputs, returning a local [PrivateKeySigner].
pub fn create_private_key_signer(private_key_str: &str) -> Result<PrivateKeySigner, PrivateKeyError> {
    let private_key = match B256::from_hex(private_key_str.trim()) {
        Ok(private_key) => private_key,
        Err(err) => {
            ensure_pk_not_env(private_key_str)?;
            return Err(err.into());
        }
    };
    match PrivateKeySigner::from_bytes(&private_key) {
        Ok(pk) => Ok(pk),
        Err(err) => {
            ensure_pk_not_env(private_key_str)?;
            Err(LocalSignerError::from(err).into())
        }
    }
}

/// Parses a provider URL, prepending `http://` to bare `localhost:<port>` endpoints.
pub fn parse_provider_url(url_str: &str) -> Result<Url, WalletError> {
    let url_str = url_str.trim();
    let prefixed;
    let url_str = if url_str.starts_with("localhost:") {
        prefixed = format!("http://{url_str}");
        prefixed.as_str()
    } else {
        url_str
    };

    Url::parse(url_str)
        .map_err(|source| WalletError::InvalidUrl { url: url_str.to_string(), source })
}

/// Connects to the JSON-RPC endpoint at `url`, signing locally with `signer` if given.
///
/// No request is sent until the wallet is used.
pub fn connect_wallet(
    url: &str,
    signer: Option<PrivateKeySigner>,
) -> Result<RpcWallet<DynProvider>, WalletError> {
    let url = parse_provider_url(url)?;
    let wallet = match signer {
        Some(signer) => {
            let account = signer.address();
            debug!(%url, %account, "connecting with local signer");
            let provider =
                ProviderBuilder::new().wallet(EthereumWallet::from(signer)).connect_http(url);
            RpcWallet::with_signer(provider.erased(), account)
        }
        None => {
            debug!(%url, "connecting to node managed accounts");
            RpcWallet::new(ProviderBuilder::new().connect_http(url).erased())
        }
    };
    Ok(wallet)
}
