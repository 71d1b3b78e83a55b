//! Secure wallet management
//!
//! This module handles private key decoding and transaction signing.
//! The keypair never leaves this module.

mod signer;

pub use signer::SecureWallet;
