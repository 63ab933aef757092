//! Fakes for the wallet and ledger boundaries.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use solana_sdk::{pubkey::Pubkey, signature::Signature, transaction::Transaction};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::entity::{Notification, SessionState, TokenBalance, TokenRecord, WalletKind};
use crate::solana::{ChainClient, TokenProgram};
use crate::view::NotificationView;
use crate::wallet::WalletExtension;

pub struct FakeExtension {
    kind: WalletKind,
    pubkey: Pubkey,
    reject: bool,
    fail_disconnect: bool,
    connected: AtomicBool,
    pub disconnect_calls: AtomicUsize,
}

impl FakeExtension {
    pub fn new(kind: WalletKind) -> Self {
        Self::with_pubkey(kind, Pubkey::new_unique())
    }

    pub fn with_pubkey(kind: WalletKind, pubkey: Pubkey) -> Self {
        Self {
            kind,
            pubkey,
            reject: false,
            fail_disconnect: false,
            connected: AtomicBool::new(false),
            disconnect_calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting(kind: WalletKind) -> Self {
        Self {
            reject: true,
            ..Self::new(kind)
        }
    }

    pub fn failing_disconnect(kind: WalletKind) -> Self {
        Self {
            fail_disconnect: true,
            ..Self::new(kind)
        }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.pubkey
    }
}

#[async_trait]
impl WalletExtension for FakeExtension {
    fn kind(&self) -> WalletKind {
        self.kind
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn connect(&self) -> Result<Pubkey> {
        if self.reject {
            return Err(anyhow!("User rejected the request."));
        }
        self.connected.store(true, Ordering::SeqCst);
        Ok(self.pubkey)
    }

    async fn disconnect(&self) -> Result<()> {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_disconnect {
            return Err(anyhow!("extension crashed"));
        }
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn sign_transaction(&self, transaction: Transaction) -> Result<Transaction> {
        Ok(transaction)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CreateMint,
    AssociatedAccount,
    MintTo,
    Transfer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MintCall {
    pub mint: Pubkey,
    pub destination: Pubkey,
    pub amount: u64,
}

pub struct FakeLedger {
    balance: Mutex<std::result::Result<f64, String>>,
    // Step to fail and how many of its calls succeed first
    fail_on: Mutex<Option<(Step, usize)>>,
    fail_holdings: Mutex<Option<String>>,
    gate: Mutex<Option<Arc<Notify>>>,
    holdings: Mutex<Vec<TokenBalance>>,
    pub steps: Mutex<Vec<Step>>,
    pub mints: Mutex<Vec<MintCall>>,
    pub transfers: Mutex<Vec<(Pubkey, Pubkey, u64, u8)>>,
    pub balance_queries: AtomicUsize,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self {
            balance: Mutex::new(Ok(0.0)),
            fail_on: Mutex::new(None),
            fail_holdings: Mutex::new(None),
            gate: Mutex::new(None),
            holdings: Mutex::new(Vec::new()),
            steps: Mutex::new(Vec::new()),
            mints: Mutex::new(Vec::new()),
            transfers: Mutex::new(Vec::new()),
            balance_queries: AtomicUsize::new(0),
        }
    }

    pub fn set_balance(&self, balance: f64) {
        *self.balance.lock().unwrap() = Ok(balance);
    }

    pub fn fail_balance(&self, message: &str) {
        *self.balance.lock().unwrap() = Err(message.to_string());
    }

    pub fn fail_on(&self, step: Step) {
        self.fail_on_nth(step, 0);
    }

    /// Let `passes` calls of `step` through, then fail every later one.
    pub fn fail_on_nth(&self, step: Step, passes: usize) {
        *self.fail_on.lock().unwrap() = Some((step, passes));
    }

    pub fn fail_holdings(&self, message: &str) {
        *self.fail_holdings.lock().unwrap() = Some(message.to_string());
    }

    pub fn set_holdings(&self, holdings: Vec<TokenBalance>) {
        *self.holdings.lock().unwrap() = holdings;
    }

    /// Hold `create_mint` until the returned handle is notified.
    pub fn gate_create_mint(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    pub fn token_program_calls(&self) -> usize {
        self.steps.lock().unwrap().len()
    }

    pub fn total_calls(&self) -> usize {
        self.token_program_calls() + self.balance_queries.load(Ordering::SeqCst)
    }

    fn record(&self, step: Step) -> Result<()> {
        self.steps.lock().unwrap().push(step);
        let mut fail_on = self.fail_on.lock().unwrap();
        if let Some((failing, passes)) = fail_on.as_mut() {
            if *failing == step {
                if *passes == 0 {
                    return Err(anyhow!("injected failure at {:?}", step));
                }
                *passes -= 1;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ChainClient for FakeLedger {
    async fn get_native_balance(&self, _address: &str) -> Result<f64> {
        self.balance_queries.fetch_add(1, Ordering::SeqCst);
        self.balance.lock().unwrap().clone().map_err(|e| anyhow!(e))
    }

    async fn get_token_balances(&self, _address: &str) -> Result<Vec<TokenBalance>> {
        if let Some(message) = self.fail_holdings.lock().unwrap().clone() {
            return Err(anyhow!(message));
        }
        Ok(self.holdings.lock().unwrap().clone())
    }
}

#[async_trait]
impl TokenProgram for FakeLedger {
    async fn create_mint(
        &self,
        _wallet: &dyn WalletExtension,
        _authority: &Pubkey,
        _decimals: u8,
    ) -> Result<Pubkey> {
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.record(Step::CreateMint)?;
        Ok(Pubkey::new_unique())
    }

    async fn get_or_create_associated_account(
        &self,
        _wallet: &dyn WalletExtension,
        _payer: &Pubkey,
        mint: &Pubkey,
        owner: &Pubkey,
    ) -> Result<Pubkey> {
        self.record(Step::AssociatedAccount)?;
        Ok(spl_associated_token_account::get_associated_token_address(owner, mint))
    }

    async fn mint_to(
        &self,
        _wallet: &dyn WalletExtension,
        _authority: &Pubkey,
        mint: &Pubkey,
        destination: &Pubkey,
        amount: u64,
    ) -> Result<Signature> {
        self.record(Step::MintTo)?;
        self.mints.lock().unwrap().push(MintCall {
            mint: *mint,
            destination: *destination,
            amount,
        });
        Ok(Signature::default())
    }

    async fn transfer(
        &self,
        _wallet: &dyn WalletExtension,
        _owner: &Pubkey,
        _mint: &Pubkey,
        source: &Pubkey,
        destination: &Pubkey,
        amount: u64,
        decimals: u8,
    ) -> Result<Signature> {
        self.record(Step::Transfer)?;
        self.transfers
            .lock()
            .unwrap()
            .push((*source, *destination, amount, decimals));
        Ok(Signature::default())
    }
}

#[derive(Default)]
pub struct RecordingView {
    pub notifications: Mutex<Vec<Notification>>,
    pub opened_urls: Mutex<Vec<String>>,
    pub sessions: Mutex<Vec<(SessionState, Vec<TokenRecord>)>>,
    pub holdings: Mutex<Vec<Vec<TokenBalance>>>,
}

impl RecordingView {
    pub fn titles(&self) -> Vec<String> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.title.clone())
            .collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.notifications.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl NotificationView for RecordingView {
    async fn notify(&self, notification: Notification) -> Result<()> {
        self.notifications.lock().unwrap().push(notification);
        Ok(())
    }

    async fn open_install_page(&self, url: &str) -> Result<()> {
        self.opened_urls.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn display_session(&self, state: &SessionState, tokens: &[TokenRecord]) -> Result<()> {
        self.sessions
            .lock()
            .unwrap()
            .push((state.clone(), tokens.to_vec()));
        Ok(())
    }

    async fn display_holdings(&self, holdings: &[TokenBalance]) -> Result<()> {
        self.holdings.lock().unwrap().push(holdings.to_vec());
        Ok(())
    }
}
