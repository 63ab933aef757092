use async_trait::async_trait;
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entity::{DashboardError, TokenBalance, TokenRecord};
use crate::interactor::{InFlight, SessionInteractor, WalletSession};
use crate::solana::tokens::MAX_DECIMALS;
use crate::solana::{convert_to_token_amount, parse_pubkey, ChainClient, TokenProgram};

/// Outcome of a mint or transfer to a recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenTransfer {
    pub mint_address: String,
    pub symbol: String,
    pub amount: f64,
    pub recipient: String,
    pub signature: String,
}

#[async_trait]
pub trait TokenInteractor: Send + Sync {
    /// Create a mint, fund the owner's token account with `initial_supply` and
    /// remember the token for this session.
    async fn create_token(
        &self,
        name: &str,
        symbol: &str,
        decimals: u8,
        initial_supply: f64,
    ) -> Result<TokenRecord, DashboardError>;

    /// Mint more of a session token to `recipient`.
    async fn mint_token(
        &self,
        mint_address: &str,
        amount: f64,
        recipient: &str,
    ) -> Result<TokenTransfer, DashboardError>;

    /// Move session tokens from the connected wallet to `recipient`.
    async fn transfer_token(
        &self,
        mint_address: &str,
        amount: f64,
        recipient: &str,
    ) -> Result<TokenTransfer, DashboardError>;

    /// SPL holdings of the connected wallet.
    async fn token_balances(&self) -> Result<Vec<TokenBalance>, DashboardError>;

    /// True while a create, mint or transfer is running.
    fn is_busy(&self) -> bool;
}

pub struct TokenInteractorImpl {
    session: Arc<WalletSession>,
    token_program: Arc<dyn TokenProgram>,
    in_flight: InFlight,
}

impl TokenInteractorImpl {
    pub fn new(session: Arc<WalletSession>, token_program: Arc<dyn TokenProgram>) -> Self {
        Self {
            session,
            token_program,
            in_flight: InFlight::default(),
        }
    }

    async fn session_token(&self, mint_address: &str) -> Result<TokenRecord, DashboardError> {
        self.session
            .find_token(mint_address)
            .await
            .ok_or_else(|| DashboardError::TokenNotFound(mint_address.to_string()))
    }
}

fn chain_failure(step: &'static str) -> impl FnOnce(anyhow::Error) -> DashboardError {
    move |e| {
        error!("{} failed: {:#}", step, e);
        DashboardError::chain(e)
    }
}

#[async_trait]
impl TokenInteractor for TokenInteractorImpl {
    async fn create_token(
        &self,
        name: &str,
        symbol: &str,
        decimals: u8,
        initial_supply: f64,
    ) -> Result<TokenRecord, DashboardError> {
        let (wallet, owner) = self.session.connected_wallet().await?;

        if decimals > MAX_DECIMALS {
            return Err(DashboardError::InvalidDecimals(decimals));
        }
        let supply = convert_to_token_amount(initial_supply, decimals)
            .ok_or(DashboardError::InvalidAmount)?;

        let _guard = self
            .in_flight
            .try_begin()
            .ok_or(DashboardError::OperationInFlight)?;

        info!(
            "Creating token {} ({}) with {} decimals, supply {}",
            name, symbol, decimals, initial_supply
        );

        let mint = self
            .token_program
            .create_mint(wallet.as_ref(), &owner, decimals)
            .await
            .map_err(chain_failure("Mint creation"))?;

        let token_account = self
            .token_program
            .get_or_create_associated_account(wallet.as_ref(), &owner, &mint, &owner)
            .await
            .map_err(chain_failure("Token account creation"))?;

        self.token_program
            .mint_to(wallet.as_ref(), &owner, &mint, &token_account, supply)
            .await
            .map_err(chain_failure("Initial mint"))?;

        let record = TokenRecord {
            name: name.to_string(),
            symbol: symbol.to_string(),
            mint_address: mint.to_string(),
            decimals,
        };
        self.session.push_token(record.clone()).await;

        info!("Token {} created at {}", symbol, record.mint_address);
        Ok(record)
    }

    async fn mint_token(
        &self,
        mint_address: &str,
        amount: f64,
        recipient: &str,
    ) -> Result<TokenTransfer, DashboardError> {
        let (wallet, owner) = self.session.connected_wallet().await?;
        let token = self.session_token(mint_address).await?;

        let base_units =
            convert_to_token_amount(amount, token.decimals).ok_or(DashboardError::InvalidAmount)?;
        let recipient_key = parse_pubkey(recipient)
            .map_err(|_| DashboardError::InvalidAddress(recipient.to_string()))?;
        let mint = parse_pubkey(&token.mint_address).map_err(DashboardError::chain)?;

        let _guard = self
            .in_flight
            .try_begin()
            .ok_or(DashboardError::OperationInFlight)?;

        let destination = self
            .token_program
            .get_or_create_associated_account(wallet.as_ref(), &owner, &mint, &recipient_key)
            .await
            .map_err(chain_failure("Recipient token account"))?;

        let signature = self
            .token_program
            .mint_to(wallet.as_ref(), &owner, &mint, &destination, base_units)
            .await
            .map_err(chain_failure("Minting"))?;

        info!("Minted {} {} to {}", amount, token.symbol, recipient_key);
        Ok(TokenTransfer {
            mint_address: token.mint_address,
            symbol: token.symbol,
            amount,
            recipient: recipient_key.to_string(),
            signature: signature.to_string(),
        })
    }

    async fn transfer_token(
        &self,
        mint_address: &str,
        amount: f64,
        recipient: &str,
    ) -> Result<TokenTransfer, DashboardError> {
        let (wallet, owner) = self.session.connected_wallet().await?;
        let token = self.session_token(mint_address).await?;

        let base_units =
            convert_to_token_amount(amount, token.decimals).ok_or(DashboardError::InvalidAmount)?;
        let recipient_key = parse_pubkey(recipient)
            .map_err(|_| DashboardError::InvalidAddress(recipient.to_string()))?;
        let mint = parse_pubkey(&token.mint_address).map_err(DashboardError::chain)?;

        let _guard = self
            .in_flight
            .try_begin()
            .ok_or(DashboardError::OperationInFlight)?;

        let source = self
            .token_program
            .get_or_create_associated_account(wallet.as_ref(), &owner, &mint, &owner)
            .await
            .map_err(chain_failure("Sender token account"))?;

        let destination = self
            .token_program
            .get_or_create_associated_account(wallet.as_ref(), &owner, &mint, &recipient_key)
            .await
            .map_err(chain_failure("Recipient token account"))?;

        let signature = self
            .token_program
            .transfer(
                wallet.as_ref(),
                &owner,
                &mint,
                &source,
                &destination,
                base_units,
                token.decimals,
            )
            .await
            .map_err(chain_failure("Transfer"))?;

        info!("Sent {} {} to {}", amount, token.symbol, recipient_key);
        Ok(TokenTransfer {
            mint_address: token.mint_address,
            symbol: token.symbol,
            amount,
            recipient: recipient_key.to_string(),
            signature: signature.to_string(),
        })
    }

    async fn token_balances(&self) -> Result<Vec<TokenBalance>, DashboardError> {
        let (_, owner) = self.session.connected_wallet().await?;

        let mut balances = self
            .session
            .chain_client()
            .get_token_balances(&owner.to_string())
            .await
            .map_err(|e| {
                error!("Failed to fetch token balances: {:#}", e);
                DashboardError::NetworkError(e.to_string())
            })?;

        let known = self.session.tokens().await;
        for balance in &mut balances {
            if let Some(token) = known.iter().find(|t| t.mint_address == balance.mint_address) {
                balance.symbol = token.symbol.clone();
            }
        }

        Ok(balances)
    }

    fn is_busy(&self) -> bool {
        self.in_flight.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::WalletKind;
    use crate::test_support::{FakeExtension, FakeLedger, Step};
    use crate::wallet::InjectedWallets;
    use solana_sdk::pubkey::Pubkey;

    struct Fixture {
        ledger: Arc<FakeLedger>,
        session: Arc<WalletSession>,
        tokens: Arc<TokenInteractorImpl>,
        owner: Pubkey,
    }

    async fn fixture(connect: bool) -> Fixture {
        let ledger = Arc::new(FakeLedger::new());
        let phantom = Arc::new(FakeExtension::new(WalletKind::Phantom));
        let owner = phantom.pubkey();
        let environment = InjectedWallets::new().with(phantom);
        let session = Arc::new(WalletSession::new(Arc::new(environment), ledger.clone()));
        if connect {
            session.connect(WalletKind::Phantom).await.unwrap();
        }
        let tokens = Arc::new(TokenInteractorImpl::new(session.clone(), ledger.clone()));
        Fixture {
            ledger,
            session,
            tokens,
            owner,
        }
    }

    #[tokio::test]
    async fn create_token_appends_record() {
        let f = fixture(true).await;

        let record = f.tokens.create_token("Demo", "DEM", 6, 1000.0).await.unwrap();

        assert_eq!(record.name, "Demo");
        assert_eq!(record.symbol, "DEM");
        assert_eq!(record.decimals, 6);
        assert!(parse_pubkey(&record.mint_address).is_ok());
        assert_eq!(f.session.tokens().await, vec![record.clone()]);

        let steps = f.ledger.steps.lock().unwrap().clone();
        assert_eq!(steps, vec![Step::CreateMint, Step::AssociatedAccount, Step::MintTo]);

        let mints = f.ledger.mints.lock().unwrap().clone();
        assert_eq!(mints.len(), 1);
        assert_eq!(mints[0].amount, 1_000_000_000);
        assert_eq!(mints[0].mint.to_string(), record.mint_address);
        assert!(!f.tokens.is_busy());
    }

    #[tokio::test]
    async fn create_token_is_all_or_nothing() {
        for step in [Step::CreateMint, Step::AssociatedAccount, Step::MintTo] {
            let f = fixture(true).await;
            f.ledger.fail_on(step);

            let err = f.tokens.create_token("Demo", "DEM", 6, 1000.0).await.unwrap_err();

            assert!(matches!(err, DashboardError::ChainOperationFailed(_)), "{:?}", step);
            assert!(f.session.tokens().await.is_empty(), "partial state at {:?}", step);
            assert_eq!(f.ledger.steps.lock().unwrap().last(), Some(&step));
            assert!(!f.tokens.is_busy());
        }
    }

    #[tokio::test]
    async fn create_token_requires_connection() {
        let f = fixture(false).await;

        let err = f.tokens.create_token("Demo", "DEM", 6, 1000.0).await.unwrap_err();

        assert_eq!(err, DashboardError::NotConnected);
        assert_eq!(f.ledger.total_calls(), 0);
    }

    #[tokio::test]
    async fn create_token_rejects_bad_input_before_network() {
        let f = fixture(true).await;

        assert_eq!(
            f.tokens.create_token("Demo", "DEM", 10, 1.0).await.unwrap_err(),
            DashboardError::InvalidDecimals(10)
        );
        assert_eq!(
            f.tokens.create_token("Demo", "DEM", 6, 0.0).await.unwrap_err(),
            DashboardError::InvalidAmount
        );
        assert_eq!(f.ledger.token_program_calls(), 0);
    }

    #[tokio::test]
    async fn mint_unknown_token_makes_no_calls() {
        let f = fixture(true).await;
        let calls_before = f.ledger.total_calls();
        let unknown = Pubkey::new_unique().to_string();

        let err = f
            .tokens
            .mint_token(&unknown, 10.0, &f.owner.to_string())
            .await
            .unwrap_err();

        assert_eq!(err, DashboardError::TokenNotFound(unknown));
        assert_eq!(f.ledger.total_calls(), calls_before);
        assert!(f.session.tokens().await.is_empty());
    }

    #[tokio::test]
    async fn mint_token_scales_by_record_decimals() {
        let f = fixture(true).await;
        let record = f.tokens.create_token("Demo", "DEM", 2, 5.0).await.unwrap();
        let recipient = Pubkey::new_unique();

        let transfer = f
            .tokens
            .mint_token(&record.mint_address, 10.0, &recipient.to_string())
            .await
            .unwrap();

        assert_eq!(transfer.symbol, "DEM");
        assert_eq!(transfer.recipient, recipient.to_string());
        let mints = f.ledger.mints.lock().unwrap().clone();
        let last = mints.last().unwrap();
        assert_eq!(last.amount, 1_000);
        assert_eq!(
            last.destination,
            spl_associated_token_account::get_associated_token_address(&recipient, &last.mint)
        );
        assert_eq!(f.session.tokens().await.len(), 1);
    }

    #[tokio::test]
    async fn mint_token_rejects_bad_recipient() {
        let f = fixture(true).await;
        let record = f.tokens.create_token("Demo", "DEM", 0, 5.0).await.unwrap();
        let calls_before = f.ledger.token_program_calls();

        let err = f
            .tokens
            .mint_token(&record.mint_address, 1.0, "nope")
            .await
            .unwrap_err();

        assert_eq!(err, DashboardError::InvalidAddress("nope".to_string()));
        assert_eq!(f.ledger.token_program_calls(), calls_before);
    }

    #[tokio::test]
    async fn mint_failure_changes_nothing() {
        let f = fixture(true).await;
        let record = f.tokens.create_token("Demo", "DEM", 0, 5.0).await.unwrap();
        f.ledger.fail_on(Step::MintTo);

        let err = f
            .tokens
            .mint_token(&record.mint_address, 1.0, &f.owner.to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, DashboardError::ChainOperationFailed(_)));
        assert_eq!(f.session.tokens().await, vec![record]);
    }

    #[tokio::test]
    async fn transfer_moves_between_associated_accounts() {
        let f = fixture(true).await;
        let record = f.tokens.create_token("Demo", "DEM", 3, 100.0).await.unwrap();
        let recipient = Pubkey::new_unique();

        f.tokens
            .transfer_token(&record.mint_address, 1.5, &recipient.to_string())
            .await
            .unwrap();

        let transfers = f.ledger.transfers.lock().unwrap().clone();
        let mint = parse_pubkey(&record.mint_address).unwrap();
        assert_eq!(
            transfers,
            vec![(
                spl_associated_token_account::get_associated_token_address(&f.owner, &mint),
                spl_associated_token_account::get_associated_token_address(&recipient, &mint),
                1_500,
                3
            )]
        );
    }

    #[tokio::test]
    async fn padded_recipient_is_stored_normalized() {
        let f = fixture(true).await;
        let record = f.tokens.create_token("Demo", "DEM", 0, 5.0).await.unwrap();
        let recipient = Pubkey::new_unique();
        let padded = format!("\u{2003}\u{2003}{}\u{2003}", recipient);

        let minted = f
            .tokens
            .mint_token(&record.mint_address, 1.0, &padded)
            .await
            .unwrap();
        let sent = f
            .tokens
            .transfer_token(&record.mint_address, 1.0, &padded)
            .await
            .unwrap();

        assert_eq!(minted.recipient, recipient.to_string());
        assert_eq!(sent.recipient, recipient.to_string());
    }

    #[tokio::test]
    async fn transfer_failure_changes_nothing() {
        // (failing step, calls of it that succeed first, steps the transfer reaches)
        let cases = [
            (Step::AssociatedAccount, 0, 1),
            (Step::AssociatedAccount, 1, 2),
            (Step::Transfer, 0, 3),
        ];
        for (step, passes, reached) in cases {
            let f = fixture(true).await;
            let record = f.tokens.create_token("Demo", "DEM", 0, 5.0).await.unwrap();
            let calls_before = f.ledger.token_program_calls();
            f.ledger.fail_on_nth(step, passes);

            let err = f
                .tokens
                .transfer_token(&record.mint_address, 1.0, &Pubkey::new_unique().to_string())
                .await
                .unwrap_err();

            assert!(matches!(err, DashboardError::ChainOperationFailed(_)), "{:?}", step);
            assert_eq!(f.ledger.token_program_calls() - calls_before, reached);
            assert!(f.ledger.transfers.lock().unwrap().is_empty());
            assert_eq!(f.session.tokens().await, vec![record]);
            assert!(!f.tokens.is_busy());
        }
    }

    #[tokio::test]
    async fn transfer_unknown_token_makes_no_calls() {
        let f = fixture(true).await;
        let calls_before = f.ledger.total_calls();
        let unknown = Pubkey::new_unique().to_string();

        let err = f
            .tokens
            .transfer_token(&unknown, 1.0, &Pubkey::new_unique().to_string())
            .await
            .unwrap_err();

        assert_eq!(err, DashboardError::TokenNotFound(unknown));
        assert_eq!(f.ledger.total_calls(), calls_before);
    }

    #[tokio::test]
    async fn transfer_requires_connection() {
        let f = fixture(false).await;

        let err = f
            .tokens
            .transfer_token(
                &Pubkey::new_unique().to_string(),
                1.0,
                &Pubkey::new_unique().to_string(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, DashboardError::NotConnected);
        assert_eq!(f.ledger.total_calls(), 0);
    }

    #[tokio::test]
    async fn token_balances_surface_network_errors() {
        let disconnected = fixture(false).await;
        assert_eq!(
            disconnected.tokens.token_balances().await.unwrap_err(),
            DashboardError::NotConnected
        );

        let f = fixture(true).await;
        f.ledger.fail_holdings("rpc unavailable");

        let err = f.tokens.token_balances().await.unwrap_err();

        assert_eq!(err, DashboardError::NetworkError("rpc unavailable".to_string()));
    }

    #[tokio::test]
    async fn token_balances_label_session_tokens() {
        let f = fixture(true).await;
        let record = f.tokens.create_token("Demo", "DEM", 6, 1.0).await.unwrap();
        let foreign = Pubkey::new_unique().to_string();
        f.ledger.set_holdings(vec![
            TokenBalance {
                symbol: "Unknown".to_string(),
                amount: 1.0,
                mint_address: record.mint_address.clone(),
            },
            TokenBalance {
                symbol: "Unknown".to_string(),
                amount: 7.0,
                mint_address: foreign,
            },
        ]);

        let balances = f.tokens.token_balances().await.unwrap();

        assert_eq!(balances[0].symbol, "DEM");
        assert_eq!(balances[1].symbol, "Unknown");
    }

    #[tokio::test]
    async fn concurrent_mutation_is_rejected() {
        let f = fixture(true).await;
        let gate = f.ledger.gate_create_mint();

        let tokens = f.tokens.clone();
        let first =
            tokio::spawn(async move { tokens.create_token("Demo", "DEM", 6, 1000.0).await });

        while !f.tokens.is_busy() {
            tokio::task::yield_now().await;
        }

        let err = f.tokens.create_token("Demo", "DEM", 6, 1000.0).await.unwrap_err();
        assert_eq!(err, DashboardError::OperationInFlight);

        gate.notify_one();
        let record = first.await.unwrap().unwrap();

        assert_eq!(f.session.tokens().await, vec![record]);
        assert_eq!(f.ledger.mints.lock().unwrap().len(), 1);
        assert!(!f.tokens.is_busy());
    }
}
