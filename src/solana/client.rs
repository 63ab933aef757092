use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::warn;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::TokenAccountsFilter;
use solana_sdk::commitment_config::CommitmentConfig;
use std::sync::Arc;

use crate::entity::TokenBalance;
use crate::solana::utils::lamports_to_sol;
use crate::solana::wallet::parse_pubkey;

/// Create a Solana client with confirmed commitment
pub fn create_solana_client(rpc_url: &str) -> Result<Arc<RpcClient>> {
    if rpc_url.trim().is_empty() {
        return Err(anyhow!("Solana RPC URL is empty"));
    }

    let client = RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed());

    Ok(Arc::new(client))
}

/// Read-only ledger queries used by the wallet session.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Native balance in SOL.
    async fn get_native_balance(&self, address: &str) -> Result<f64>;

    /// SPL token accounts owned by `address`. Symbols are left as `Unknown`.
    async fn get_token_balances(&self, address: &str) -> Result<Vec<TokenBalance>>;
}

/// RPC-backed chain client. Also implements [`crate::solana::tokens::TokenProgram`].
pub struct RpcChainClient {
    client: Arc<RpcClient>,
}

impl RpcChainClient {
    pub fn new(client: Arc<RpcClient>) -> Self {
        Self { client }
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.client
    }
}

#[async_trait]
impl ChainClient for RpcChainClient {
    async fn get_native_balance(&self, address: &str) -> Result<f64> {
        let pubkey = parse_pubkey(address)?;

        let balance = self
            .client
            .get_balance(&pubkey)
            .await
            .map_err(|e| anyhow!("Failed to get balance: {}", e))?;

        Ok(lamports_to_sol(balance))
    }

    async fn get_token_balances(&self, address: &str) -> Result<Vec<TokenBalance>> {
        let pubkey = parse_pubkey(address)?;

        let token_accounts = self
            .client
            .get_token_accounts_by_owner(&pubkey, TokenAccountsFilter::ProgramId(spl_token::ID))
            .await
            .map_err(|e| anyhow!("Failed to get token accounts: {}", e))?;

        let mut balances = Vec::with_capacity(token_accounts.len());

        for keyed_account in token_accounts {
            let token_account_pubkey = parse_pubkey(&keyed_account.pubkey)?;

            let token_account = match self.client.get_token_account(&token_account_pubkey).await {
                Ok(Some(token_account)) => token_account,
                // Closed between the two calls
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping token account {}: {}", keyed_account.pubkey, e);
                    continue;
                }
            };

            balances.push(TokenBalance {
                symbol: "Unknown".to_string(),
                amount: token_account.token_amount.ui_amount.unwrap_or(0.0),
                mint_address: token_account.mint,
            });
        }

        Ok(balances)
    }
}
