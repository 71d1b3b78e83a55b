//! Shared token registry and amount conversion
//!
//! Centralizes mint metadata and the human <-> raw amount conversion so the
//! quote, trade and balance tools agree on rounding.

use crate::{Error, Result};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Alias accepted wherever a mint address is expected
pub const SOL_ALIAS: &str = "SOL";

/// Wrapped SOL mint, used by the aggregator as the native-asset pseudo-mint
pub const NATIVE_MINT: &str = "So11111111111111111111111111111111111111112";

/// Decimals of the native asset (lamports per SOL = 10^9)
pub const NATIVE_DECIMALS: u8 = 9;

/// Largest decimals value accepted at the tool boundary
pub const MAX_DECIMALS: u8 = 18;

/// Token metadata
#[derive(Debug, Clone, Copy)]
pub struct TokenInfo {
    /// Mint address (base58)
    pub mint: &'static str,
    /// Token symbol (e.g., "USDC")
    pub symbol: &'static str,
    /// Number of decimals
    pub decimals: u8,
}

/// Well-known mints, used for labels in logs and help output
pub const KNOWN_TOKENS: &[TokenInfo] = &[
    TokenInfo {
        mint: NATIVE_MINT,
        symbol: "SOL",
        decimals: NATIVE_DECIMALS,
    },
    TokenInfo {
        mint: "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
        symbol: "USDC",
        decimals: 6,
    },
    TokenInfo {
        mint: "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB",
        symbol: "USDT",
        decimals: 6,
    },
];

/// Look up a well-known token by mint
pub fn known_token(mint: &str) -> Option<&'static TokenInfo> {
    KNOWN_TOKENS.iter().find(|t| t.mint == mint)
}

/// Symbol for log output, falling back to the mint itself
pub fn label(mint: &str) -> &str {
    known_token(mint).map(|t| t.symbol).unwrap_or(mint)
}

/// Resolve a caller-supplied mint, mapping the literal "SOL" to the native mint
pub fn resolve_mint(input: &str) -> Result<Pubkey> {
    let trimmed = input.trim();
    let candidate = if trimmed == SOL_ALIAS {
        NATIVE_MINT
    } else {
        trimmed
    };

    Pubkey::from_str(candidate)
        .map_err(|e| Error::Validation(format!("Invalid mint address '{}': {}", input, e)))
}

/// Native mint as a `Pubkey`
pub fn native_mint() -> Pubkey {
    Pubkey::from_str(NATIVE_MINT).unwrap_or_default()
}

/// Convert a human amount into smallest units: `round(amount * 10^decimals)`.
///
/// `f64::round` rounds half away from zero.
pub fn to_raw_amount(amount: f64, decimals: u8) -> Result<u64> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::Validation(format!(
            "Amount must be a non-negative number, got {}",
            amount
        )));
    }
    if decimals > MAX_DECIMALS {
        return Err(Error::Validation(format!(
            "Decimals must be between 0 and {}, got {}",
            MAX_DECIMALS, decimals
        )));
    }

    let scaled = (amount * 10f64.powi(decimals as i32)).round();
    if scaled >= u64::MAX as f64 {
        return Err(Error::Validation(format!(
            "Amount {} with {} decimals overflows a 64-bit raw amount",
            amount, decimals
        )));
    }

    Ok(scaled as u64)
}

/// Convert a raw amount into a decimal amount
pub fn to_ui_amount(raw: u64, decimals: u8) -> f64 {
    raw as f64 / 10f64.powi(decimals as i32)
}

/// Parse a raw amount string as returned by the aggregator
pub fn parse_raw_amount(field: &str, value: &str) -> Result<u64> {
    value
        .parse::<u64>()
        .map_err(|e| Error::Transaction(format!("Invalid {} '{}': {}", field, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn half_sol_is_five_hundred_million_lamports() {
        assert_eq!(to_raw_amount(0.5, 9).unwrap(), 500_000_000);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(to_raw_amount(0.5, 0).unwrap(), 1);
        assert_eq!(to_raw_amount(2.5, 0).unwrap(), 3);
        assert_eq!(to_raw_amount(1.25, 1).unwrap(), 13);
        assert_eq!(to_raw_amount(1.24, 1).unwrap(), 12);
    }

    #[test]
    fn rejects_invalid_amounts() {
        assert!(to_raw_amount(-1.0, 9).is_err());
        assert!(to_raw_amount(f64::NAN, 9).is_err());
        assert!(to_raw_amount(f64::INFINITY, 9).is_err());
        assert!(to_raw_amount(1.0, 19).is_err());
        assert!(to_raw_amount(1e30, 18).is_err());
    }

    #[test]
    fn sol_alias_resolves_to_native_mint() {
        assert_eq!(resolve_mint("SOL").unwrap().to_string(), NATIVE_MINT);
        assert_eq!(resolve_mint(" SOL ").unwrap(), native_mint());
        // both sides of a quote may be the alias; the route is degenerate but accepted
        assert_eq!(resolve_mint("SOL").unwrap(), resolve_mint("SOL").unwrap());
    }

    #[test]
    fn invalid_mint_is_a_validation_error() {
        let err = resolve_mint("not-a-mint").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn ui_amount_inverts_raw_amount() {
        assert_eq!(to_ui_amount(1_500_000_000, 9), 1.5);
        assert_eq!(to_ui_amount(0, 6), 0.0);
    }

    #[test]
    fn known_token_labels() {
        assert_eq!(label(NATIVE_MINT), "SOL");
        assert_eq!(label("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"), "USDC");
        assert_eq!(label("unknown"), "unknown");
    }

    proptest! {
        #[test]
        fn raw_amount_is_rounded_scaled_amount(amount in 0.0f64..1_000_000.0, decimals in 0u8..=18) {
            let scaled = amount * 10f64.powi(decimals as i32);
            prop_assume!(scaled < u64::MAX as f64 / 2.0);

            let raw = to_raw_amount(amount, decimals).unwrap();
            prop_assert_eq!(raw as f64, scaled.round());
            prop_assert!((raw as f64 - scaled).abs() <= 0.5 + scaled * f64::EPSILON);
        }
    }
}
