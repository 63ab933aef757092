//! Solana token dashboard - console front end
//!
//! Connects a wallet extension, then creates, mints and sends SPL tokens on
//! devnet from commands typed on stdin.
use anyhow::Context;
use dotenv::dotenv;
use log::{info, warn};
use solana_token_dashboard::{
    create_application, create_solana_client, Config, ConsoleView, InjectedWallets,
    KeypairWallet, Router, ServiceContainer, WalletEnvironment,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    info!(
        "Starting Solana Token Dashboard v{}",
        solana_token_dashboard::VERSION
    );

    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize Solana client
    info!("Connecting to Solana network at {}...", config.rpc_url);
    let solana_client =
        create_solana_client(&config.rpc_url).context("Failed to create Solana client")?;

    // Install the local wallet extension, if configured
    let mut environment = InjectedWallets::new();
    if let Some(keypair) = &config.wallet_keypair {
        let wallet = KeypairWallet::from_base58(config.wallet_kind, keypair)
            .context("WALLET_KEYPAIR is not a valid base58 keypair")?;
        info!(
            "Installed {} wallet for {}",
            config.wallet_kind.display_name(),
            wallet.pubkey()
        );
        environment.inject(Arc::new(wallet));
    } else {
        warn!("WALLET_KEYPAIR is not set, no wallet extension is installed");
    }

    let services = ServiceContainer::new(solana_client, Arc::new(environment));
    info!("Available wallets: {:?}", services.environment().available());

    match services.solana_client().get_version().await {
        Ok(version) => info!("Cluster version {}", version.solana_core),
        Err(e) => warn!("Cluster is not reachable yet: {}", e),
    }

    let router = create_application(&services, Arc::new(ConsoleView::new()));

    println!("{}", solana_token_dashboard::commands::help_text());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if !router.handle_line(&line).await? {
            break;
        }
    }

    info!("Bye");
    Ok(())
}
