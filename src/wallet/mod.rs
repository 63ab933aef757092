//! Wallet extension boundary.
//!
//! A wallet extension is whatever the host environment injects for a given
//! [`WalletKind`]: it hands out a public key on `connect` and signs transactions.
//! The session never touches private keys itself.

mod injected;
mod keypair_wallet;

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::{pubkey::Pubkey, transaction::Transaction};
use std::sync::Arc;

use crate::entity::WalletKind;

pub use injected::InjectedWallets;
pub use keypair_wallet::KeypairWallet;

/// Capability interface of an injected wallet.
#[async_trait]
pub trait WalletExtension: Send + Sync {
    fn kind(&self) -> WalletKind;

    fn is_connected(&self) -> bool;

    /// Ask the user to approve the connection. Rejection is an `Err`.
    async fn connect(&self) -> Result<Pubkey>;

    async fn disconnect(&self) -> Result<()>;

    /// Add the wallet's signature to an otherwise prepared transaction.
    async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction>;
}

/// Detects which wallet extensions are installed.
pub trait WalletEnvironment: Send + Sync {
    fn probe(&self, kind: WalletKind) -> Option<Arc<dyn WalletExtension>>;

    fn available(&self) -> Vec<WalletKind> {
        WalletKind::ALL
            .into_iter()
            .filter(|kind| self.probe(*kind).is_some())
            .collect()
    }
}
