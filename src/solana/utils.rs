use crate::solana::tokens::constants::MAX_DECIMALS;

// Constants for conversion
pub const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL
}

/// Convert a display amount to base units of a mint with `decimals` places.
///
/// Returns `None` for non-finite, non-positive, sub-unit or overflowing amounts.
pub fn convert_to_token_amount(amount: f64, decimals: u8) -> Option<u64> {
    if !amount.is_finite() || amount <= 0.0 || decimals > MAX_DECIMALS {
        return None;
    }

    let scaled = (amount * 10_f64.powi(decimals as i32)).round();
    if scaled < 1.0 || scaled >= u64::MAX as f64 {
        return None;
    }

    Some(scaled as u64)
}
