mod dashboard_error;
mod notification;
mod session;
mod token_balance;
mod token_record;
mod wallet_kind;

pub use dashboard_error::DashboardError;
pub use notification::{Notification, NotificationVariant};
pub use session::SessionState;
pub use token_balance::TokenBalance;
pub use token_record::TokenRecord;
pub use wallet_kind::WalletKind;
