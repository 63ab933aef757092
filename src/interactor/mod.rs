use std::sync::atomic::{AtomicBool, Ordering};

pub mod session_interactor;
pub mod token_interactor;

pub use session_interactor::{SessionInteractor, WalletSession};
pub use token_interactor::{TokenInteractor, TokenInteractorImpl, TokenTransfer};

/// Re-entrancy flag for an operation that must not overlap with itself.
#[derive(Debug, Default)]
pub struct InFlight(AtomicBool);

impl InFlight {
    pub fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightGuard(&self.0))
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears the flag on drop, whatever way the operation ended.
pub struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
