pub mod commands;
pub mod config;
pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod router;
pub mod solana;
pub mod utils;
pub mod view;
pub mod wallet;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

// Re-export commonly used items
pub use config::Config;
pub use di::ServiceContainer;
pub use entity::*;
pub use interactor::{SessionInteractor, TokenInteractor, TokenTransfer};
pub use presenter::{DashboardPresenter, DashboardPresenterImpl};
pub use router::{ConsoleRouter, Router};
pub use solana::create_solana_client;
pub use view::{ConsoleView, NotificationView};
pub use wallet::{InjectedWallets, KeypairWallet, WalletEnvironment, WalletExtension};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the console front end on top of the container's session.
pub fn create_application<V>(services: &ServiceContainer, view: Arc<V>) -> ConsoleRouter
where
    V: NotificationView + 'static,
{
    let presenter = Arc::new(DashboardPresenterImpl::new(
        services.session(),
        services.token_interactor(),
        view,
    ));

    ConsoleRouter::new(presenter)
}
