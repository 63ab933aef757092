use serde::{Deserialize, Serialize};

/// A token created during the current session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub name: String,
    pub symbol: String,
    pub mint_address: String,
    pub decimals: u8,
}
