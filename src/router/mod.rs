use anyhow::Result;
use async_trait::async_trait;
use log::warn;
use std::sync::Arc;

use crate::commands::{help_text, parse_command, Command};
use crate::presenter::DashboardPresenter;

// Base router trait
#[async_trait]
pub trait Router: Send + Sync {
    /// Handle one input line. Returns `false` once the user asked to quit.
    async fn handle_line(&self, line: &str) -> Result<bool>;
}

// Console router implementation
pub struct ConsoleRouter {
    presenter: Arc<dyn DashboardPresenter>,
}

impl ConsoleRouter {
    pub fn new(presenter: Arc<dyn DashboardPresenter>) -> Self {
        Self { presenter }
    }

    async fn dispatch(&self, command: Command) -> Result<bool> {
        // Outcomes are already reported through notifications
        match command {
            Command::Connect(kind) => {
                let _ = self.presenter.connect_wallet(kind).await;
            }
            Command::Disconnect => self.presenter.disconnect_wallet().await,
            Command::Balance => self.presenter.show_session().await,
            Command::Tokens => {
                let tokens = self.presenter.session_tokens().await;
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            }
            Command::Holdings => {
                let _ = self.presenter.show_holdings().await;
            }
            Command::Create {
                name,
                symbol,
                decimals,
                initial_supply,
            } => {
                let _ = self
                    .presenter
                    .create_token(&name, &symbol, decimals, initial_supply)
                    .await;
            }
            Command::Mint {
                mint_address,
                amount,
                recipient,
            } => {
                let _ = self
                    .presenter
                    .mint_token(&mint_address, amount, &recipient)
                    .await;
            }
            Command::Send {
                mint_address,
                amount,
                recipient,
            } => {
                let _ = self
                    .presenter
                    .transfer_token(&mint_address, amount, &recipient)
                    .await;
            }
            Command::Help => println!("{}", help_text()),
            Command::Quit => return Ok(false),
        }

        Ok(true)
    }
}

#[async_trait]
impl Router for ConsoleRouter {
    async fn handle_line(&self, line: &str) -> Result<bool> {
        if line.trim().is_empty() {
            return Ok(true);
        }

        match parse_command(line) {
            Ok(command) => self.dispatch(command).await,
            Err(e) => {
                warn!("Rejected input {:?}: {}", line, e);
                println!("{}\n{}", e, help_text());
                Ok(true)
            }
        }
    }
}
