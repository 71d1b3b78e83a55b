//! Transaction submission and confirmation polling
//!
//! Confirmation is bounded by the ledger's own validity window: once the
//! block height passes the last valid height of the blockhash fetched at
//! submission time, the transaction can no longer land.

use super::LedgerRpc;
use crate::config::ConfirmationSettings;
use crate::{Error, Result};
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Confirmation state of a submitted signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureState {
    /// Not seen yet, or seen below `confirmed` commitment
    Pending,
    /// Reached `confirmed` commitment without error
    Confirmed,
    /// Landed but failed execution
    Failed(String),
}

/// Broadcast a signed transaction and block until it is confirmed or expires
pub async fn submit_and_confirm(
    rpc: &dyn LedgerRpc,
    transaction: &VersionedTransaction,
    settings: &ConfirmationSettings,
) -> Result<Signature> {
    let signature = rpc
        .send_transaction(transaction, settings.max_send_retries)
        .await?;
    info!(signature = %signature, "Transaction submitted");

    let last_valid_block_height = rpc.last_valid_block_height().await?;
    let poll_interval = Duration::from_millis(settings.poll_interval_ms);

    loop {
        match rpc.signature_state(&signature).await {
            Ok(SignatureState::Confirmed) => {
                info!(signature = %signature, "Transaction confirmed");
                return Ok(signature);
            }
            Ok(SignatureState::Failed(reason)) => {
                return Err(Error::Submission(format!(
                    "transaction {} failed: {}",
                    signature, reason
                )));
            }
            Ok(SignatureState::Pending) => {}
            // transient read errors do not abandon a broadcast transaction
            Err(e) => warn!(signature = %signature, error = %e, "Signature status poll failed"),
        }

        match rpc.block_height().await {
            Ok(block_height) if block_height > last_valid_block_height => {
                return Err(Error::ConfirmationTimeout {
                    signature: signature.to_string(),
                    last_valid_block_height,
                });
            }
            Ok(block_height) => debug!(
                signature = %signature,
                block_height,
                last_valid_block_height,
                "Awaiting confirmation"
            ),
            // expiry is only decided by a height the ledger actually reported
            Err(e) => warn!(signature = %signature, error = %e, "Block height poll failed"),
        }

        tokio::time::sleep(poll_interval).await;
    }
}
