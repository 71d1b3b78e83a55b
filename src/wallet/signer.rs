//! Secure wallet implementation
//!
//! SECURITY: This is the ONLY place where private keys exist.
//! - Keys are held in solana-sdk's Keypair
//! - Keys are never serialized to JSON
//! - Keys are never logged
//! - A wallet lives for one operation call and is dropped afterwards

use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};
use solana_sdk::transaction::VersionedTransaction;

/// Byte length of an encoded ed25519 keypair (secret + public half)
const KEYPAIR_LENGTH: usize = 64;

/// Secure wallet that protects private keys
///
/// The keypair is:
/// - Never serialized (no Serialize impl)
/// - Only accessible via signing operations
pub struct SecureWallet {
    keypair: Keypair,
}

impl SecureWallet {
    /// Decode a wallet from a configured secret
    pub fn from_secret(secret: &SecretString) -> Result<Self> {
        Self::from_base58(secret.expose_secret())
    }

    /// Create a wallet from a base58-encoded 64-byte keypair
    pub fn from_base58(secret: &str) -> Result<Self> {
        let bytes = bs58::decode(secret.trim())
            .into_vec()
            .map_err(|e| Error::InvalidSecret(format!("not valid base58: {}", e)))?;

        if bytes.len() != KEYPAIR_LENGTH {
            return Err(Error::InvalidSecret(format!(
                "expected {} bytes, decoded {}",
                KEYPAIR_LENGTH,
                bytes.len()
            )));
        }

        let keypair = Keypair::from_bytes(&bytes)
            .map_err(|e| Error::InvalidSecret(format!("malformed keypair: {}", e)))?;

        Ok(Self { keypair })
    }

    /// Get the public key (safe to share)
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    /// Get the public key as a base58 string
    pub fn address_string(&self) -> String {
        self.keypair.pubkey().to_string()
    }

    /// Re-sign a transaction built by a third party for this wallet.
    ///
    /// The message is kept as-is; signing fails if the wallet is not one of
    /// its required signers.
    pub fn sign_transaction(&self, unsigned: VersionedTransaction) -> Result<VersionedTransaction> {
        VersionedTransaction::try_new(unsigned.message, &[&self.keypair])
            .map_err(|e| Error::Transaction(format!("Signing failed: {}", e)))
    }
}

// Implement Debug manually to avoid exposing the keypair
impl std::fmt::Debug for SecureWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureWallet")
            .field("address", &self.pubkey())
            .field("keypair", &"[REDACTED]")
            .finish()
    }
}
