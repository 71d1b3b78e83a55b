//! # Jupiter Swap Transaction Building

use super::types::{Quote, SwapTransactionResponse};
use super::JupiterClient;
use crate::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::transaction::VersionedTransaction;
use tracing::debug;

impl JupiterClient {
    /// Build an unsigned swap transaction from a quote.
    ///
    /// Native SOL is wrapped/unwrapped automatically, the compute-unit limit is
    /// sized dynamically and the priority fee is left to Jupiter.
    pub async fn get_swap_transaction(
        &self,
        quote: &Quote,
        user_public_key: &Pubkey,
    ) -> Result<SwapTransactionResponse> {
        let url = format!("{}/swap", self.base_url);

        let request_body = serde_json::json!({
            "quoteResponse": quote,
            "userPublicKey": user_public_key.to_string(),
            "wrapAndUnwrapSol": true,
            "dynamicComputeUnitLimit": true,
            "prioritizationFeeLamports": "auto",
        });

        debug!(user = %user_public_key, "Jupiter swap transaction request");

        let response = self
            .http
            .post(&url)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::from_request("Jupiter swap request", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::from_request("Jupiter swap response", e))?;

        if !status.is_success() {
            return Err(Error::UpstreamSwapBuild {
                status: status.as_u16(),
                body,
            });
        }

        let swap: SwapTransactionResponse = serde_json::from_str(&body)?;

        debug!(
            last_valid_block_height = swap.last_valid_block_height,
            prioritization_fee = ?swap.prioritization_fee_lamports,
            "Jupiter swap transaction received"
        );

        Ok(swap)
    }
}

/// Decode the base64 bincode payload returned by the swap endpoint
pub fn decode_transaction(encoded: &str) -> Result<VersionedTransaction> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| Error::Transaction(format!("Invalid base64 transaction: {}", e)))?;
    bincode::deserialize(&bytes)
        .map_err(|e| Error::Transaction(format!("Invalid transaction bytes: {}", e)))
}
