// Re-export everything from submodules
pub mod client;
pub mod tokens;
pub mod utils;
pub mod wallet;

// Re-export commonly used items
pub use client::{create_solana_client, ChainClient, RpcChainClient};
pub use tokens::TokenProgram;
pub use utils::{convert_to_token_amount, lamports_to_sol};
pub use wallet::{keypair_from_base58, parse_pubkey};
