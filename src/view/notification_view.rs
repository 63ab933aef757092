use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};

use crate::entity::{Notification, SessionState, TokenBalance, TokenRecord};
use crate::utils::{format_sol, shorten_address};

#[async_trait]
pub trait NotificationView: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<()>;
    async fn open_install_page(&self, url: &str) -> Result<()>;
    async fn display_session(&self, state: &SessionState, tokens: &[TokenRecord]) -> Result<()>;
    async fn display_holdings(&self, holdings: &[TokenBalance]) -> Result<()>;
}

/// Renders notifications and session cards on the terminal.
pub struct ConsoleView;

impl ConsoleView {
    pub fn new() -> Self {
        Self
    }

    fn format_notification(notification: &Notification) -> String {
        let icon = if notification.is_error() { "❌" } else { "✅" };
        let mut text = format!(
            "{} [{}] {}: {}",
            icon,
            notification.timestamp.format("%H:%M:%S"),
            notification.title,
            notification.description
        );
        if let Some(url) = &notification.action_url {
            text.push_str(&format!("\n   Install: {}", url));
        }
        text
    }

    fn format_session(state: &SessionState, tokens: &[TokenRecord]) -> String {
        let mut text = match (&state.wallet_kind, &state.address) {
            (Some(kind), Some(address)) => format!(
                "Wallet: {} ({})\nAddress: {}\nBalance: {} SOL",
                kind.display_name(),
                shorten_address(address),
                address,
                format_sol(state.native_balance)
            ),
            _ => "Wallet: not connected".to_string(),
        };

        if tokens.is_empty() {
            text.push_str("\nCreated tokens: none");
        } else {
            text.push_str("\nCreated tokens:");
            for token in tokens {
                text.push_str(&format!(
                    "\n  {} ({}) {} decimals, mint {}",
                    token.name, token.symbol, token.decimals, token.mint_address
                ));
            }
        }
        text
    }

    fn format_holdings(holdings: &[TokenBalance]) -> String {
        if holdings.is_empty() {
            return "No token accounts found".to_string();
        }

        let mut text = "Token Balances".to_string();
        for balance in holdings {
            text.push_str(&format!(
                "\n  {} {}  ({})",
                balance.amount,
                balance.symbol,
                shorten_address(&balance.mint_address)
            ));
        }
        text
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationView for ConsoleView {
    async fn notify(&self, notification: Notification) -> Result<()> {
        if notification.is_error() {
            warn!("{}: {}", notification.title, notification.description);
        } else {
            info!("{}: {}", notification.title, notification.description);
        }
        println!("{}", Self::format_notification(&notification));
        Ok(())
    }

    async fn open_install_page(&self, url: &str) -> Result<()> {
        info!("Opening wallet install page {}", url);
        println!("Open {} to install the wallet extension", url);
        Ok(())
    }

    async fn display_session(&self, state: &SessionState, tokens: &[TokenRecord]) -> Result<()> {
        println!("{}", Self::format_session(state, tokens));
        Ok(())
    }

    async fn display_holdings(&self, holdings: &[TokenBalance]) -> Result<()> {
        println!("{}", Self::format_holdings(holdings));
        Ok(())
    }
}
