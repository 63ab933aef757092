use async_trait::async_trait;
use log::{error, info, warn};
use solana_sdk::pubkey::Pubkey;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::entity::{DashboardError, SessionState, TokenRecord, WalletKind};
use crate::interactor::InFlight;
use crate::solana::ChainClient;
use crate::wallet::{WalletEnvironment, WalletExtension};

#[async_trait]
pub trait SessionInteractor: Send + Sync {
    /// Connect the wallet of `kind` and return its address.
    async fn connect(&self, kind: WalletKind) -> Result<String, DashboardError>;

    /// Forget the wallet. Safe to call when nothing is connected.
    async fn disconnect(&self);

    /// Re-read the native balance. Failures keep the previous value.
    async fn refresh_balance(&self);

    async fn state(&self) -> SessionState;

    async fn tokens(&self) -> Vec<TokenRecord>;

    fn is_connecting(&self) -> bool;
}

#[derive(Default)]
struct SessionInner {
    state: SessionState,
    owner: Option<Pubkey>,
    extension: Option<Arc<dyn WalletExtension>>,
    tokens: Vec<TokenRecord>,
}

/// Wallet session: connection, native balance and the tokens created so far.
pub struct WalletSession {
    environment: Arc<dyn WalletEnvironment>,
    chain_client: Arc<dyn ChainClient>,
    inner: RwLock<SessionInner>,
    connecting: InFlight,
}

impl WalletSession {
    pub fn new(environment: Arc<dyn WalletEnvironment>, chain_client: Arc<dyn ChainClient>) -> Self {
        Self {
            environment,
            chain_client,
            inner: RwLock::new(SessionInner::default()),
            connecting: InFlight::default(),
        }
    }

    /// The active extension and owner key, or `NotConnected`.
    pub async fn connected_wallet(
        &self,
    ) -> Result<(Arc<dyn WalletExtension>, Pubkey), DashboardError> {
        let inner = self.inner.read().await;
        match (&inner.extension, inner.owner) {
            (Some(extension), Some(owner)) => Ok((extension.clone(), owner)),
            _ => Err(DashboardError::NotConnected),
        }
    }

    pub async fn find_token(&self, mint_address: &str) -> Option<TokenRecord> {
        let inner = self.inner.read().await;
        inner
            .tokens
            .iter()
            .find(|token| token.mint_address == mint_address)
            .cloned()
    }

    pub(crate) async fn push_token(&self, record: TokenRecord) {
        self.inner.write().await.tokens.push(record);
    }

    pub fn chain_client(&self) -> Arc<dyn ChainClient> {
        self.chain_client.clone()
    }
}

#[async_trait]
impl SessionInteractor for WalletSession {
    async fn connect(&self, kind: WalletKind) -> Result<String, DashboardError> {
        let _guard = self
            .connecting
            .try_begin()
            .ok_or(DashboardError::OperationInFlight)?;

        let extension = self.environment.probe(kind).ok_or_else(|| {
            warn!("{} wallet extension not found", kind.display_name());
            DashboardError::ProviderNotFound { kind }
        })?;

        let owner = extension.connect().await.map_err(|e| {
            error!("Wallet connection failed: {:#}", e);
            DashboardError::ConnectionRejected(e.to_string())
        })?;
        let address = owner.to_string();

        let (changed, previous) = {
            let mut inner = self.inner.write().await;
            let changed = inner.state.address.as_deref() != Some(address.as_str());

            inner.state.wallet_kind = Some(kind);
            inner.state.address = Some(address.clone());
            if changed {
                inner.state.native_balance = 0.0;
            }
            inner.owner = Some(owner);
            let previous = inner.extension.replace(extension);
            debug_assert!(inner.state.is_consistent());

            (changed, previous)
        };

        // Switching wallet kinds leaves the old extension connected otherwise
        if let Some(previous) = previous.filter(|p| p.kind() != kind && p.is_connected()) {
            if let Err(e) = previous.disconnect().await {
                warn!("Failed to disconnect previous {} wallet: {:#}", previous.kind(), e);
            }
        }

        info!("Connected to {} wallet {}", kind, address);

        if changed {
            self.refresh_balance().await;
        }

        Ok(address)
    }

    async fn disconnect(&self) {
        let extension = {
            let mut inner = self.inner.write().await;
            inner.state = SessionState::default();
            inner.owner = None;
            inner.extension.take()
        };

        let Some(extension) = extension else {
            return;
        };

        if extension.is_connected() {
            if let Err(e) = extension.disconnect().await {
                warn!("Wallet disconnect failed, session reset anyway: {:#}", e);
            }
        }

        info!("Disconnected {} wallet", extension.kind());
    }

    async fn refresh_balance(&self) {
        let Some(address) = self.inner.read().await.state.address.clone() else {
            return;
        };

        match self.chain_client.get_native_balance(&address).await {
            Ok(balance) => {
                let mut inner = self.inner.write().await;
                // The wallet may have changed while the query was running
                if inner.state.address.as_deref() == Some(address.as_str()) {
                    inner.state.native_balance = balance;
                }
            }
            Err(e) => {
                warn!("Failed to refresh balance for {}: {:#}", address, e);
            }
        }
    }

    async fn state(&self) -> SessionState {
        self.inner.read().await.state.clone()
    }

    async fn tokens(&self) -> Vec<TokenRecord> {
        self.inner.read().await.tokens.clone()
    }

    fn is_connecting(&self) -> bool {
        self.connecting.is_active()
    }
}
