use crate::entity::{DashboardError, Notification, TokenRecord, WalletKind};
use crate::interactor::{SessionInteractor, TokenInteractor, TokenTransfer};
use crate::utils::shorten_address;
use crate::view::NotificationView;
use async_trait::async_trait;
use log::error;
use std::sync::Arc;

/// Which operation a failure belongs to, for picking notification text.
#[derive(Debug, Clone, Copy)]
enum Action {
    Connect,
    Create,
    Mint,
    Transfer,
    Holdings,
}

#[async_trait]
pub trait DashboardPresenter: Send + Sync {
    async fn connect_wallet(&self, kind: WalletKind) -> Result<(), DashboardError>;
    async fn disconnect_wallet(&self);
    async fn show_session(&self);
    async fn session_tokens(&self) -> Vec<TokenRecord>;
    async fn show_holdings(&self) -> Result<(), DashboardError>;
    async fn create_token(
        &self,
        name: &str,
        symbol: &str,
        decimals: u8,
        initial_supply: f64,
    ) -> Result<TokenRecord, DashboardError>;
    async fn mint_token(
        &self,
        mint_address: &str,
        amount: f64,
        recipient: &str,
    ) -> Result<TokenTransfer, DashboardError>;
    async fn transfer_token(
        &self,
        mint_address: &str,
        amount: f64,
        recipient: &str,
    ) -> Result<TokenTransfer, DashboardError>;
    fn is_busy(&self) -> bool;
}

pub struct DashboardPresenterImpl<S, T, V> {
    session: Arc<S>,
    tokens: Arc<T>,
    view: Arc<V>,
}

impl<S, T, V> DashboardPresenterImpl<S, T, V>
where
    S: SessionInteractor,
    T: TokenInteractor,
    V: NotificationView,
{
    pub fn new(session: Arc<S>, tokens: Arc<T>, view: Arc<V>) -> Self {
        Self {
            session,
            tokens,
            view,
        }
    }

    async fn notify(&self, notification: Notification) {
        if let Err(e) = self.view.notify(notification).await {
            error!("Failed to display notification: {}", e);
        }
    }

    async fn notify_failure(&self, action: Action, err: &DashboardError) {
        let notification = match (action, err) {
            (_, DashboardError::ProviderNotFound { kind }) => Notification::destructive(
                format!("{} Wallet Not Found", kind.display_name()),
                format!(
                    "Please install the {} Wallet extension.",
                    kind.display_name()
                ),
            )
            .with_action(kind.install_url()),
            (_, DashboardError::OperationInFlight) => Notification::destructive(
                "Operation In Progress",
                "Please wait for the current operation to finish.",
            ),
            (Action::Create, DashboardError::NotConnected) => Notification::destructive(
                "Wallet Not Connected",
                "Connect your wallet before creating a token.",
            ),
            (Action::Mint, DashboardError::NotConnected) => Notification::destructive(
                "Wallet Not Connected",
                "Connect your wallet before minting tokens.",
            ),
            (_, DashboardError::NotConnected) => Notification::destructive(
                "Wallet Not Connected",
                "Connect your wallet first.",
            ),
            (_, DashboardError::TokenNotFound(_)) => {
                Notification::destructive("Token Not Found", "Selected token not found.")
            }
            (
                _,
                DashboardError::InvalidAddress(_)
                | DashboardError::InvalidAmount
                | DashboardError::InvalidDecimals(_),
            ) => Notification::destructive("Invalid Input", err.to_string()),
            (Action::Connect, _) => {
                Notification::destructive("Connection Failed", "Unable to connect to wallet.")
            }
            (Action::Create, _) => Notification::destructive(
                "Creation Failed",
                "Error creating token. Check the logs.",
            ),
            (Action::Mint, _) => Notification::destructive("Minting Failed", "Error minting token."),
            (Action::Transfer, _) => {
                Notification::destructive("Transfer Failed", "Error sending tokens.")
            }
            (Action::Holdings, _) => Notification::destructive(
                "Balance Unavailable",
                "Could not load token balances.",
            ),
        };

        self.notify(notification).await;
    }
}

#[async_trait]
impl<S, T, V> DashboardPresenter for DashboardPresenterImpl<S, T, V>
where
    S: SessionInteractor + Send + Sync,
    T: TokenInteractor + Send + Sync,
    V: NotificationView + Send + Sync,
{
    async fn connect_wallet(&self, kind: WalletKind) -> Result<(), DashboardError> {
        match self.session.connect(kind).await {
            Ok(_) => {
                self.notify(Notification::success(
                    "Wallet Connected",
                    format!("Connected to {} wallet", kind),
                ))
                .await;
                Ok(())
            }
            Err(e) => {
                self.notify_failure(Action::Connect, &e).await;
                if let DashboardError::ProviderNotFound { kind } = &e {
                    if let Err(view_err) = self.view.open_install_page(kind.install_url()).await {
                        error!("Failed to open install page: {}", view_err);
                    }
                }
                Err(e)
            }
        }
    }

    async fn disconnect_wallet(&self) {
        self.session.disconnect().await;
        self.notify(Notification::success(
            "Wallet Disconnected",
            "You have successfully disconnected your wallet.",
        ))
        .await;
    }

    async fn show_session(&self) {
        self.session.refresh_balance().await;
        let state = self.session.state().await;
        let tokens = self.session.tokens().await;

        if let Err(e) = self.view.display_session(&state, &tokens).await {
            error!("Failed to display session: {}", e);
        }
    }

    async fn session_tokens(&self) -> Vec<TokenRecord> {
        self.session.tokens().await
    }

    async fn show_holdings(&self) -> Result<(), DashboardError> {
        match self.tokens.token_balances().await {
            Ok(holdings) => {
                if let Err(e) = self.view.display_holdings(&holdings).await {
                    error!("Failed to display holdings: {}", e);
                }
                Ok(())
            }
            Err(e) => {
                self.notify_failure(Action::Holdings, &e).await;
                Err(e)
            }
        }
    }

    async fn create_token(
        &self,
        name: &str,
        symbol: &str,
        decimals: u8,
        initial_supply: f64,
    ) -> Result<TokenRecord, DashboardError> {
        match self
            .tokens
            .create_token(name, symbol, decimals, initial_supply)
            .await
        {
            Ok(record) => {
                self.notify(Notification::success(
                    "Token Created",
                    format!(
                        "{} ({}) created with supply {}",
                        record.name, record.symbol, initial_supply
                    ),
                ))
                .await;
                // Paying for the mint moved SOL
                self.session.refresh_balance().await;
                Ok(record)
            }
            Err(e) => {
                self.notify_failure(Action::Create, &e).await;
                Err(e)
            }
        }
    }

    async fn mint_token(
        &self,
        mint_address: &str,
        amount: f64,
        recipient: &str,
    ) -> Result<TokenTransfer, DashboardError> {
        match self.tokens.mint_token(mint_address, amount, recipient).await {
            Ok(minted) => {
                self.notify(Notification::success(
                    "Minted Successfully",
                    format!(
                        "Minted {} {} to {}",
                        minted.amount,
                        minted.symbol,
                        shorten_address(&minted.recipient)
                    ),
                ))
                .await;
                Ok(minted)
            }
            Err(e) => {
                self.notify_failure(Action::Mint, &e).await;
                Err(e)
            }
        }
    }

    async fn transfer_token(
        &self,
        mint_address: &str,
        amount: f64,
        recipient: &str,
    ) -> Result<TokenTransfer, DashboardError> {
        match self
            .tokens
            .transfer_token(mint_address, amount, recipient)
            .await
        {
            Ok(sent) => {
                self.notify(Notification::success(
                    "Tokens Sent",
                    format!(
                        "Sent {} {} to {}",
                        sent.amount,
                        sent.symbol,
                        shorten_address(&sent.recipient)
                    ),
                ))
                .await;
                Ok(sent)
            }
            Err(e) => {
                self.notify_failure(Action::Transfer, &e).await;
                Err(e)
            }
        }
    }

    fn is_busy(&self) -> bool {
        self.session.is_connecting() || self.tokens.is_busy()
    }
}
