use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::info;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signer},
    transaction::Transaction,
};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::entity::WalletKind;
use crate::solana::keypair_from_base58;
use crate::wallet::WalletExtension;

/// Wallet extension backed by a local keypair, presented as `kind`.
pub struct KeypairWallet {
    kind: WalletKind,
    keypair: Keypair,
    connected: AtomicBool,
}

impl KeypairWallet {
    pub fn new(kind: WalletKind, keypair: Keypair) -> Self {
        Self {
            kind,
            keypair,
            connected: AtomicBool::new(false),
        }
    }

    pub fn from_base58(kind: WalletKind, keypair_base58: &str) -> Result<Self> {
        Ok(Self::new(kind, keypair_from_base58(keypair_base58)?))
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

#[async_trait]
impl WalletExtension for KeypairWallet {
    fn kind(&self) -> WalletKind {
        self.kind
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    async fn connect(&self) -> Result<Pubkey> {
        self.connected.store(true, Ordering::Release);
        info!("{} keypair wallet connected", self.kind.display_name());
        Ok(self.keypair.pubkey())
    }

    async fn disconnect(&self) -> Result<()> {
        self.connected.store(false, Ordering::Release);
        Ok(())
    }

    async fn sign_transaction(&self, mut transaction: Transaction) -> Result<Transaction> {
        if !self.is_connected() {
            return Err(anyhow!("{} wallet is not connected", self.kind.display_name()));
        }

        let blockhash = transaction.message.recent_blockhash;
        transaction
            .try_partial_sign(&[&self.keypair], blockhash)
            .map_err(|e| anyhow!("Failed to sign transaction: {}", e))?;

        Ok(transaction)
    }
}
