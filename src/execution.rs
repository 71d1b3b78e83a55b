//! Swap venue: quote and execute against the aggregator
//!
//! The tools only see [`SwapVenue`]; [`JupiterVenue`] ties the Jupiter client
//! to the ledger so an executed swap returns only after confirmation.

use crate::config::ConfirmationSettings;
use crate::jupiter::swap::decode_transaction;
use crate::jupiter::{JupiterClient, Quote};
use crate::ledger::{submit_and_confirm, LedgerRpc};
use crate::tokens::label;
use crate::wallet::SecureWallet;
use crate::Result;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use std::sync::Arc;
use tracing::{debug, info};

/// Quote and execute swaps
#[async_trait]
pub trait SwapVenue: Send + Sync {
    /// Price a swap of `amount` raw input units
    async fn quote(
        &self,
        input: &Pubkey,
        output: &Pubkey,
        amount: u64,
        slippage_bps: u16,
    ) -> Result<Quote>;

    /// Execute a quote with the wallet, returning the confirmed signature
    async fn execute(&self, quote: &Quote, wallet: &SecureWallet) -> Result<Signature>;
}

/// Jupiter-backed venue settling on Solana
pub struct JupiterVenue {
    client: JupiterClient,
    ledger: Arc<dyn LedgerRpc>,
    confirmation: ConfirmationSettings,
}

impl JupiterVenue {
    pub fn new(
        client: JupiterClient,
        ledger: Arc<dyn LedgerRpc>,
        confirmation: ConfirmationSettings,
    ) -> Self {
        Self {
            client,
            ledger,
            confirmation,
        }
    }
}

#[async_trait]
impl SwapVenue for JupiterVenue {
    async fn quote(
        &self,
        input: &Pubkey,
        output: &Pubkey,
        amount: u64,
        slippage_bps: u16,
    ) -> Result<Quote> {
        self.client
            .get_quote(input, output, amount, slippage_bps)
            .await
    }

    async fn execute(&self, quote: &Quote, wallet: &SecureWallet) -> Result<Signature> {
        info!(
            input = label(&quote.input_mint),
            output = label(&quote.output_mint),
            in_amount = %quote.in_amount,
            out_amount = %quote.out_amount,
            "Executing swap"
        );

        let swap = self
            .client
            .get_swap_transaction(quote, &wallet.pubkey())
            .await?;
        let unsigned = decode_transaction(&swap.swap_transaction)?;
        let signed = wallet.sign_transaction(unsigned)?;
        debug!(
            signatures = signed.signatures.len(),
            "Swap transaction signed"
        );

        submit_and_confirm(self.ledger.as_ref(), &signed, &self.confirmation).await
    }
}
