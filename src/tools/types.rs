//! Shared tool parameter helpers.

use crate::tokens::MAX_DECIMALS;
use crate::{Error, Result};

/// Lowest accepted slippage tolerance (basis points)
pub const MIN_SLIPPAGE_BPS: u32 = 1;

/// Highest accepted slippage tolerance (basis points)
pub const MAX_SLIPPAGE_BPS: u32 = 5_000;

const EXPLORER_TX_URL: &str = "https://solscan.io/tx";

pub(crate) fn default_slippage_bps() -> u32 {
    50
}

pub(crate) fn default_input_decimals() -> u32 {
    9
}

pub(crate) fn default_token_decimals() -> u32 {
    6
}

/// Range checks run after deserialisation and before any network call
pub trait ValidateInput {
    fn validate(&self) -> Result<()>;
}

/// Narrow a slippage parameter, rejecting values outside 1..=5000 bps
pub fn check_slippage(bps: u32) -> Result<u16> {
    if !(MIN_SLIPPAGE_BPS..=MAX_SLIPPAGE_BPS).contains(&bps) {
        return Err(Error::Validation(format!(
            "slippage_bps must be between {} and {}, got {}",
            MIN_SLIPPAGE_BPS, MAX_SLIPPAGE_BPS, bps
        )));
    }
    Ok(bps as u16)
}

/// Narrow a decimals parameter, rejecting values above 18
pub fn check_decimals(field: &str, decimals: u32) -> Result<u8> {
    match u8::try_from(decimals) {
        Ok(d) if d <= MAX_DECIMALS => Ok(d),
        _ => Err(Error::Validation(format!(
            "{} must be between 0 and {}, got {}",
            field, MAX_DECIMALS, decimals
        ))),
    }
}

/// Amounts must be finite and strictly positive
pub fn check_amount(field: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::Validation(format!(
            "{} must be a positive number, got {}",
            field, amount
        )));
    }
    Ok(())
}

/// Block explorer link for a confirmed transaction
pub fn explorer_url(signature: &str) -> String {
    format!("{}/{}", EXPLORER_TX_URL, signature)
}
