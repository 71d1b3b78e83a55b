//! # Jupiter Quote API

use super::types::Quote;
use super::JupiterClient;
use crate::{Error, Result};
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

impl JupiterClient {
    /// Get a swap quote. `amount` is in smallest units of the input mint.
    ///
    /// Slippage is passed through unchecked; range validation belongs to the caller.
    pub async fn get_quote(
        &self,
        input_mint: &Pubkey,
        output_mint: &Pubkey,
        amount: u64,
        slippage_bps: u16,
    ) -> Result<Quote> {
        let url = format!("{}/quote", self.base_url);

        debug!(
            input_mint = %input_mint,
            output_mint = %output_mint,
            amount,
            slippage_bps,
            "Jupiter quote request"
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("inputMint", input_mint.to_string()),
                ("outputMint", output_mint.to_string()),
                ("amount", amount.to_string()),
                ("slippageBps", slippage_bps.to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::from_request("Jupiter quote request", e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::from_request("Jupiter quote response", e))?;

        if !status.is_success() {
            return Err(Error::UpstreamQuote {
                status: status.as_u16(),
                body,
            });
        }

        let quote: Quote = serde_json::from_str(&body)?;

        debug!(
            in_amount = %quote.in_amount,
            out_amount = %quote.out_amount,
            route = %quote.route_summary(),
            "Jupiter quote received"
        );

        Ok(quote)
    }
}
