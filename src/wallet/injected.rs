use std::collections::HashMap;
use std::sync::Arc;

use crate::entity::WalletKind;
use crate::wallet::{WalletEnvironment, WalletExtension};

/// In-process registry of installed wallet extensions, one per kind.
#[derive(Default, Clone)]
pub struct InjectedWallets {
    wallets: HashMap<WalletKind, Arc<dyn WalletExtension>>,
}

impl InjectedWallets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an extension, replacing any previous one of the same kind.
    pub fn inject(&mut self, extension: Arc<dyn WalletExtension>) {
        self.wallets.insert(extension.kind(), extension);
    }

    pub fn with(mut self, extension: Arc<dyn WalletExtension>) -> Self {
        self.inject(extension);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.is_empty()
    }
}

impl WalletEnvironment for InjectedWallets {
    fn probe(&self, kind: WalletKind) -> Option<Arc<dyn WalletExtension>> {
        self.wallets.get(&kind).cloned()
    }
}
