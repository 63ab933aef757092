use anyhow::{anyhow, Result};
use log::info;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    system_instruction,
};
use spl_token::solana_program::program_pack::Pack;
use spl_token::{instruction as token_instruction, state::Mint, ID as TOKEN_PROGRAM_ID};

use crate::solana::tokens::transaction::send_wallet_transaction;
use crate::wallet::WalletExtension;

/// Create a new mint owned by `authority`, which is also the freeze authority and payer.
pub async fn create_mint(
    client: &RpcClient,
    wallet: &dyn WalletExtension,
    authority: &Pubkey,
    decimals: u8,
) -> Result<Pubkey> {
    let mint = Keypair::new();

    let rent = client
        .get_minimum_balance_for_rent_exemption(Mint::LEN)
        .await
        .map_err(|e| anyhow!("Failed to get rent exemption for mint: {}", e))?;

    let instructions = vec![
        system_instruction::create_account(
            authority,
            &mint.pubkey(),
            rent,
            Mint::LEN as u64,
            &TOKEN_PROGRAM_ID,
        ),
        token_instruction::initialize_mint2(
            &TOKEN_PROGRAM_ID,
            &mint.pubkey(),
            authority,
            Some(authority),
            decimals,
        )
        .map_err(|e| anyhow!("Failed to create initialize mint instruction: {}", e))?,
    ];

    let signature =
        send_wallet_transaction(client, wallet, authority, &instructions, &[&mint]).await?;
    info!("Created mint {} ({})", mint.pubkey(), signature);

    Ok(mint.pubkey())
}

/// Mint `amount` base units of `mint` into `destination`.
pub async fn mint_to(
    client: &RpcClient,
    wallet: &dyn WalletExtension,
    authority: &Pubkey,
    mint: &Pubkey,
    destination: &Pubkey,
    amount: u64,
) -> Result<Signature> {
    let instruction = token_instruction::mint_to(
        &TOKEN_PROGRAM_ID,
        mint,
        destination,
        authority,
        &[],
        amount,
    )
    .map_err(|e| anyhow!("Failed to create mint-to instruction: {}", e))?;

    send_wallet_transaction(client, wallet, authority, &[instruction], &[]).await
}
