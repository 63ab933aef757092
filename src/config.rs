use anyhow::{Context, Result};
use std::env;

use crate::entity::WalletKind;
use crate::solana::tokens::constants::DEVNET_RPC_URL;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Solana JSON-RPC endpoint
    pub rpc_url: String,

    /// Base58 keypair installed as a local wallet extension, if any
    pub wallet_keypair: Option<String>,

    /// Kind the local wallet presents itself as
    pub wallet_kind: WalletKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEVNET_RPC_URL.to_string(),
            wallet_keypair: None,
            wallet_kind: WalletKind::Phantom,
        }
    }
}

impl Config {
    /// Reads `SOLANA_RPC_URL`, `WALLET_KEYPAIR` and `WALLET_KIND`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let wallet_kind = match lookup("WALLET_KIND") {
            Some(kind) => kind.parse().context("WALLET_KIND is invalid")?,
            None => defaults.wallet_kind,
        };

        Ok(Self {
            rpc_url: lookup("SOLANA_RPC_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.rpc_url),
            wallet_keypair: lookup("WALLET_KEYPAIR").filter(|key| !key.trim().is_empty()),
            wallet_kind,
        })
    }
}
