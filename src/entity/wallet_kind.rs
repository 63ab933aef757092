use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Browser wallet extensions the dashboard knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Phantom,
    Solflare,
}

impl WalletKind {
    pub const ALL: [WalletKind; 2] = [WalletKind::Phantom, WalletKind::Solflare];

    pub fn display_name(&self) -> &'static str {
        match self {
            WalletKind::Phantom => "Phantom",
            WalletKind::Solflare => "Solflare",
        }
    }

    /// Where the user is sent when the extension is missing.
    pub fn install_url(&self) -> &'static str {
        match self {
            WalletKind::Phantom => "https://phantom.app/",
            WalletKind::Solflare => "https://solflare.com/",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletKind::Phantom => write!(f, "phantom"),
            WalletKind::Solflare => write!(f, "solflare"),
        }
    }
}

impl FromStr for WalletKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "phantom" => Ok(WalletKind::Phantom),
            "solflare" => Ok(WalletKind::Solflare),
            other => Err(anyhow::anyhow!("Unsupported wallet kind: {}", other)),
        }
    }
}
