// Re-export submodules
pub mod constants;
pub mod mint;
pub mod spl;
pub mod transaction;

use anyhow::Result;
use async_trait::async_trait;
use solana_sdk::{pubkey::Pubkey, signature::Signature};

use crate::solana::client::RpcChainClient;
use crate::wallet::WalletExtension;

// Re-export commonly used items
pub use constants::MAX_DECIMALS;
pub use mint::{create_mint, mint_to};
pub use spl::{get_or_create_associated_token_account, transfer_spl_token};

/// Token-program mutations. Every call is signed by `wallet`.
#[async_trait]
pub trait TokenProgram: Send + Sync {
    async fn create_mint(
        &self,
        wallet: &dyn WalletExtension,
        authority: &Pubkey,
        decimals: u8,
    ) -> Result<Pubkey>;

    async fn get_or_create_associated_account(
        &self,
        wallet: &dyn WalletExtension,
        payer: &Pubkey,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<Pubkey>;

    async fn mint_to(
        &self,
        wallet: &dyn WalletExtension,
        authority: &Pubkey,
        mint: &Pubkey,
        destination: &Pubkey,
        amount: u64,
    ) -> Result<Signature>;

    #[allow(clippy::too_many_arguments)]
    async fn transfer(
        &self,
        wallet: &dyn WalletExtension,
        owner: &Pubkey,
        mint: &Pubkey,
        source: &Pubkey,
        destination: &Pubkey,
        amount: u64,
        decimals: u8,
    ) -> Result<Signature>;
}

#[async_trait]
impl TokenProgram for RpcChainClient {
    async fn create_mint(
        &self,
        wallet: &dyn WalletExtension,
        authority: &Pubkey,
        decimals: u8,
    ) -> Result<Pubkey> {
        mint::create_mint(self.rpc(), wallet, authority, decimals).await
    }

    async fn get_or_create_associated_account(
        &self,
        wallet: &dyn WalletExtension,
        payer: &Pubkey,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<Pubkey> {
        spl::get_or_create_associated_token_account(self.rpc(), wallet, payer, mint, owner).await
    }

    async fn mint_to(
        &self,
        wallet: &dyn WalletExtension,
        authority: &Pubkey,
        mint: &Pubkey,
        destination: &Pubkey,
        amount: u64,
    ) -> Result<Signature> {
        mint::mint_to(self.rpc(), wallet, authority, mint, destination, amount).await
    }

    async fn transfer(
        &self,
        wallet: &dyn WalletExtension,
        owner: &Pubkey,
        mint: &Pubkey,
        source: &Pubkey,
        destination: &Pubkey,
        amount: u64,
        decimals: u8,
    ) -> Result<Signature> {
        spl::transfer_spl_token(
            self.rpc(),
            wallet,
            owner,
            mint,
            source,
            destination,
            amount,
            decimals,
        )
        .await
    }
}
