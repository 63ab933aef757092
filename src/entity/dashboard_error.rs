use crate::entity::WalletKind;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DashboardError {
    #[error("{} wallet not found", .kind.display_name())]
    ProviderNotFound { kind: WalletKind },

    #[error("Wallet connection rejected: {0}")]
    ConnectionRejected(String),

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Token not found: {0}")]
    TokenNotFound(String),

    #[error("Chain operation failed: {0}")]
    ChainOperationFailed(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Another operation is already in progress")]
    OperationInFlight,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid decimals: {0} (expected 0-9)")]
    InvalidDecimals(u8),
}

impl DashboardError {
    /// Wraps a token-program or transport failure.
    pub fn chain(err: anyhow::Error) -> Self {
        // {:#} keeps the anyhow context chain on one line
        DashboardError::ChainOperationFailed(format!("{:#}", err))
    }
}
