// Token program limits
pub const MAX_DECIMALS: u8 = 9;

// Default cluster
pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
