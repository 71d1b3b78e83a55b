//! Jupiter Trade Bridge
//!
//! Exposes Solana token trading through the Jupiter aggregator as a small set
//! of named tools served over stdio:
//! - `get_quote` prices a swap without a wallet
//! - `buy_token`, `sell_token` and `buy_and_sell` sign and confirm swaps
//! - `get_balance` reads the wallet's SOL and token balances
//!
//! # Security Model
//!
//! - The wallet secret is held as a `SecretString` and decoded per call
//! - All tool calls pass through the interceptor pipeline
//! - Private keys never leave the wallet module
//! - Optional JSONL audit trail of all operations

pub mod config;
pub mod execution;
pub mod interceptors;
pub mod jupiter;
pub mod ledger;
pub mod runner;
pub mod server;
pub mod tokens;
pub mod tools;
pub mod wallet;

mod error;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{Config, RpcConfig, PRIVATE_KEY_ENV};
pub use error::{Error, Result};
pub use runner::BridgeRunner;
