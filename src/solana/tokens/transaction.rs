use anyhow::{anyhow, Result};
use log::debug;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    instruction::Instruction,
    message::Message,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    transaction::Transaction as SolanaTransaction,
};

use crate::wallet::WalletExtension;

/// Build a transaction paid by `payer`, have the wallet sign it and submit it.
///
/// `extra_signers` sign first, e.g. a freshly generated mint account.
pub async fn send_wallet_transaction(
    client: &RpcClient,
    wallet: &dyn WalletExtension,
    payer: &Pubkey,
    instructions: &[Instruction],
    extra_signers: &[&Keypair],
) -> Result<Signature> {
    // Get recent blockhash
    let recent_blockhash = client
        .get_latest_blockhash()
        .await
        .map_err(|e| anyhow!("Failed to get recent blockhash: {}", e))?;

    let message = Message::new(instructions, Some(payer));
    let mut transaction = SolanaTransaction::new_unsigned(message);
    transaction.message.recent_blockhash = recent_blockhash;

    if !extra_signers.is_empty() {
        transaction
            .try_partial_sign(extra_signers, recent_blockhash)
            .map_err(|e| anyhow!("Failed to sign transaction: {}", e))?;
    }

    let transaction = wallet.sign_transaction(transaction).await?;
    debug!(
        "Submitting transaction with {} instruction(s) signed by {} wallet",
        instructions.len(),
        wallet.kind()
    );

    let signature = client
        .send_and_confirm_transaction(&transaction)
        .await
        .map_err(|e| anyhow!("Failed to send transaction: {}", e))?;

    Ok(signature)
}
