//! Ledger access: wallet identity, balances and asset decimals
//!
//! All reads and writes go through the [`LedgerRpc`] trait. The production
//! implementation is [`SolanaRpc`]; tests substitute a stub.

mod cache;
pub mod rpc;
pub mod submit;

use crate::tokens::{to_ui_amount, NATIVE_DECIMALS};
use crate::wallet::SecureWallet;
use crate::{Error, Result};
use async_trait::async_trait;
use secrecy::SecretString;
use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use std::sync::Arc;

pub use cache::DecimalsCache;
pub use rpc::SolanaRpc;
pub use submit::{submit_and_confirm, SignatureState};

/// One token account's balance as reported by the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenHolding {
    pub raw_amount: u64,
    pub decimals: u8,
}

/// Point-in-time fungible token balance
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSnapshot {
    /// Raw amount in smallest units, as a string
    pub amount: String,
    pub decimals: u8,
    pub ui_amount: f64,
}

impl TokenSnapshot {
    /// Snapshot for a wallet with no account for the mint
    pub fn empty() -> Self {
        Self {
            amount: "0".to_string(),
            decimals: 0,
            ui_amount: 0.0,
        }
    }

    /// Fold every holder account of one mint into a single snapshot
    pub fn from_holdings(holdings: &[TokenHolding]) -> Self {
        let Some(first) = holdings.first() else {
            return Self::empty();
        };
        let raw: u64 = holdings
            .iter()
            .fold(0u64, |acc, h| acc.saturating_add(h.raw_amount));
        Self {
            amount: raw.to_string(),
            decimals: first.decimals,
            ui_amount: to_ui_amount(raw, first.decimals),
        }
    }
}

/// Ledger operations used by the bridge
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Native balance in lamports
    async fn lamport_balance(&self, owner: &Pubkey) -> Result<u64>;

    /// Every token account `owner` holds for `mint` (empty when none exist)
    async fn token_holdings(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Vec<TokenHolding>>;

    /// Decimals from the mint's supply metadata
    async fn mint_decimals(&self, mint: &Pubkey) -> Result<u8>;

    /// Broadcast without preflight, letting the node resend up to `max_retries` times
    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
        max_retries: usize,
    ) -> Result<Signature>;

    /// Last valid block height of the latest confirmed blockhash
    async fn last_valid_block_height(&self) -> Result<u64>;

    /// Current confirmed block height
    async fn block_height(&self) -> Result<u64>;

    /// Confirmation state of a submitted signature
    async fn signature_state(&self, signature: &Signature) -> Result<SignatureState>;
}

/// Wallet resolution and balance queries against the ledger
pub struct LedgerAccessor {
    rpc: Arc<dyn LedgerRpc>,
    secret: Option<SecretString>,
    decimals: Arc<DecimalsCache>,
}

impl LedgerAccessor {
    /// Create an accessor; `secret` is the configured base58 keypair, if any
    pub fn new(rpc: Arc<dyn LedgerRpc>, secret: Option<SecretString>) -> Self {
        Self {
            rpc,
            secret,
            decimals: Arc::new(DecimalsCache::new()),
        }
    }

    /// Use a shared decimals cache
    pub fn with_decimals_cache(mut self, cache: Arc<DecimalsCache>) -> Self {
        self.decimals = cache;
        self
    }

    /// Whether a wallet secret is configured
    pub fn has_wallet(&self) -> bool {
        self.secret.is_some()
    }

    /// Decode the configured secret into a wallet for the current call
    pub fn resolve_wallet(&self) -> Result<SecureWallet> {
        let secret = self.secret.as_ref().ok_or(Error::MissingWallet)?;
        SecureWallet::from_secret(secret)
    }

    /// Native balance in SOL
    pub async fn native_balance(&self, owner: &Pubkey) -> Result<f64> {
        let lamports = self.rpc.lamport_balance(owner).await?;
        Ok(to_ui_amount(lamports, NATIVE_DECIMALS))
    }

    /// Token balance; a wallet with no account for the mint reads as zero
    pub async fn fungible_balance(&self, owner: &Pubkey, mint: &Pubkey) -> Result<TokenSnapshot> {
        let holdings = self.rpc.token_holdings(owner, mint).await?;
        if holdings.is_empty() {
            tracing::debug!(owner = %owner, mint = %mint, "No token account for mint");
        }
        Ok(TokenSnapshot::from_holdings(&holdings))
    }

    /// On-chain decimals for a mint, memoised for the life of the accessor
    pub async fn asset_decimals(&self, mint: &Pubkey) -> Result<u8> {
        if let Some(decimals) = self.decimals.get(mint).await {
            return Ok(decimals);
        }

        let decimals = self.rpc.mint_decimals(mint).await?;
        tracing::debug!(mint = %mint, decimals, "Cached mint decimals");
        Ok(self.decimals.insert(*mint, decimals).await)
    }
}
