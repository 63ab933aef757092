use serde::{Deserialize, Serialize};

use crate::entity::WalletKind;

/// Snapshot of the wallet session.
///
/// `wallet_kind` and `address` are always set together; a session is connected
/// exactly when it has an address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub wallet_kind: Option<WalletKind>,
    pub address: Option<String>,
    pub native_balance: f64,
}

impl SessionState {
    pub fn connected(&self) -> bool {
        self.address.is_some()
    }

    /// Checks the connected/address/kind relationship.
    pub fn is_consistent(&self) -> bool {
        self.address.is_some() == self.wallet_kind.is_some()
    }
}
