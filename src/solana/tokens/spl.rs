use anyhow::{anyhow, Result};
use log::info;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{pubkey::Pubkey, signature::Signature};
use spl_associated_token_account::{
    get_associated_token_address, instruction::create_associated_token_account_idempotent,
};
use spl_token::{instruction as token_instruction, ID as TOKEN_PROGRAM_ID};

use crate::solana::tokens::transaction::send_wallet_transaction;
use crate::wallet::WalletExtension;

/// Return the associated token account of `owner` for `mint`, creating it when missing.
pub async fn get_or_create_associated_token_account(
    client: &RpcClient,
    wallet: &dyn WalletExtension,
    payer: &Pubkey,
    mint: &Pubkey,
    owner: &Pubkey,
) -> Result<Pubkey> {
    let token_account = get_associated_token_address(owner, mint);

    let existing = client
        .get_account_with_commitment(&token_account, client.commitment())
        .await
        .map_err(|e| anyhow!("Failed to look up token account {}: {}", token_account, e))?
        .value;

    if existing.is_none() {
        let instruction =
            create_associated_token_account_idempotent(payer, owner, mint, &TOKEN_PROGRAM_ID);
        send_wallet_transaction(client, wallet, payer, &[instruction], &[]).await?;
        info!("Created token account {} for owner {}", token_account, owner);
    }

    Ok(token_account)
}

/// Send SPL token between two token accounts of the same mint
#[allow(clippy::too_many_arguments)]
pub async fn transfer_spl_token(
    client: &RpcClient,
    wallet: &dyn WalletExtension,
    owner: &Pubkey,
    mint: &Pubkey,
    source: &Pubkey,
    destination: &Pubkey,
    amount: u64,
    decimals: u8,
) -> Result<Signature> {
    let instruction = token_instruction::transfer_checked(
        &TOKEN_PROGRAM_ID,
        source,
        mint,
        destination,
        owner,
        &[],
        amount,
        decimals,
    )
    .map_err(|e| anyhow!("Failed to create token transfer instruction: {}", e))?;

    send_wallet_transaction(client, wallet, owner, &[instruction], &[]).await
}
