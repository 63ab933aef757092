use std::sync::Arc;

use solana_client::nonblocking::rpc_client::RpcClient;

use crate::interactor::{TokenInteractorImpl, WalletSession};
use crate::solana::{ChainClient, RpcChainClient, TokenProgram};
use crate::wallet::WalletEnvironment;

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    // Core services
    solana_client: Arc<RpcClient>,
    environment: Arc<dyn WalletEnvironment>,

    // Session and token operations
    session: Arc<WalletSession>,
    token_interactor: Arc<TokenInteractorImpl>,
}

impl ServiceContainer {
    /// Wire the session against the shared RPC client
    pub fn new(solana_client: Arc<RpcClient>, environment: Arc<dyn WalletEnvironment>) -> Self {
        let chain = Arc::new(RpcChainClient::new(solana_client.clone()));
        Self::with_ledger(solana_client, environment, chain.clone(), chain)
    }

    /// Wire the session against explicit ledger implementations
    pub fn with_ledger(
        solana_client: Arc<RpcClient>,
        environment: Arc<dyn WalletEnvironment>,
        chain_client: Arc<dyn ChainClient>,
        token_program: Arc<dyn TokenProgram>,
    ) -> Self {
        let session = Arc::new(WalletSession::new(environment.clone(), chain_client));
        let token_interactor = Arc::new(TokenInteractorImpl::new(session.clone(), token_program));

        Self {
            solana_client,
            environment,
            session,
            token_interactor,
        }
    }

    // Accessor methods

    pub fn solana_client(&self) -> Arc<RpcClient> {
        self.solana_client.clone()
    }

    pub fn environment(&self) -> Arc<dyn WalletEnvironment> {
        self.environment.clone()
    }

    pub fn session(&self) -> Arc<WalletSession> {
        self.session.clone()
    }

    pub fn token_interactor(&self) -> Arc<TokenInteractorImpl> {
        self.token_interactor.clone()
    }
}
