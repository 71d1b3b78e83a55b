//! Write-once mint decimals store
//!
//! Decimals never change once a mint exists, so entries are never
//! invalidated and a second insert for the same mint keeps the first value.

use solana_sdk::pubkey::Pubkey;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-wide mint decimals cache
#[derive(Debug, Default)]
pub struct DecimalsCache {
    entries: RwLock<HashMap<Pubkey, u8>>,
}

impl DecimalsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, mint: &Pubkey) -> Option<u8> {
        self.entries.read().await.get(mint).copied()
    }

    /// Store decimals for a mint, returning the value that ends up cached
    pub async fn insert(&self, mint: Pubkey, decimals: u8) -> u8 {
        *self.entries.write().await.entry(mint).or_insert(decimals)
    }
}
