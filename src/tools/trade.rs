//! Trade execution tools
//!
//! SECURITY NOTE:
//! - The wallet is decoded per call from the configured secret and dropped
//!   when the call returns
//! - Signing happens inside the venue, after interceptor approval
//!
//! `buy_and_sell` chains two swaps. Once the buy leg confirms the position
//! exists on-chain and cannot be undone, so any later failure is reported as
//! `partial` rather than `error`.

use super::types::{
    check_amount, check_decimals, check_slippage, default_slippage_bps, default_token_decimals,
    explorer_url, ValidateInput,
};
use super::{TradingTool, TOOL_BUY_AND_SELL, TOOL_BUY_TOKEN, TOOL_SELL_TOKEN};
use crate::execution::SwapVenue;
use crate::jupiter::Quote;
use crate::ledger::LedgerAccessor;
use crate::tokens::{native_mint, resolve_mint, to_raw_amount, to_ui_amount, NATIVE_DECIMALS};
use crate::wallet::SecureWallet;
use crate::Result;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BuyTokenInput {
    /// Mint address of the token to buy
    pub token_mint: String,
    /// Amount of SOL to spend
    pub sol_amount: f64,
    /// Slippage tolerance in basis points
    #[serde(default = "default_slippage_bps")]
    #[schemars(range(min = 1, max = 5000))]
    pub slippage_bps: u32,
}

impl ValidateInput for BuyTokenInput {
    fn validate(&self) -> Result<()> {
        check_amount("sol_amount", self.sol_amount)?;
        check_slippage(self.slippage_bps)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SellTokenInput {
    /// Mint address of the token to sell
    pub token_mint: String,
    /// Amount of the token to sell in human units
    pub token_amount: f64,
    /// Decimals of the token; not checked against the mint
    #[serde(default = "default_token_decimals")]
    #[schemars(range(min = 0, max = 18))]
    pub token_decimals: u32,
    /// Slippage tolerance in basis points
    #[serde(default = "default_slippage_bps")]
    #[schemars(range(min = 1, max = 5000))]
    pub slippage_bps: u32,
}

impl ValidateInput for SellTokenInput {
    fn validate(&self) -> Result<()> {
        check_amount("token_amount", self.token_amount)?;
        check_decimals("token_decimals", self.token_decimals)?;
        check_slippage(self.slippage_bps)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BuyAndSellInput {
    /// Mint address of the token to round-trip
    pub token_mint: String,
    /// Amount of SOL to spend on the buy leg
    pub sol_amount: f64,
    /// Slippage tolerance in basis points, applied to both legs
    #[serde(default = "default_slippage_bps")]
    #[schemars(range(min = 1, max = 5000))]
    pub slippage_bps: u32,
}

impl ValidateInput for BuyAndSellInput {
    fn validate(&self) -> Result<()> {
        check_amount("sol_amount", self.sol_amount)?;
        check_slippage(self.slippage_bps)?;
        Ok(())
    }
}

/// Leg of a round trip that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradePhase {
    Buy,
    Sell,
}

/// Outcome of `buy_and_sell`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RoundTripReport {
    Success {
        buy_signature: String,
        sell_signature: String,
        token_mint: String,
        sol_spent: f64,
        /// Raw units, from the buy quote
        tokens_received: String,
        /// Human units, using the mint's on-chain decimals
        tokens_sold: f64,
        sol_received: f64,
        net_sol: f64,
        profit_sol: f64,
    },
    /// Buy confirmed, sell did not
    Partial {
        phase: TradePhase,
        buy_signature: String,
        sol_spent: f64,
        tokens_received: String,
        error: String,
    },
    /// Nothing executed
    Error { phase: TradePhase, error: String },
}

/// A confirmed swap and the quote it executed
struct Fill {
    quote: Quote,
    out_raw: u64,
    signature: Signature,
}

/// Shared quote-then-execute step
async fn swap(
    venue: &dyn SwapVenue,
    wallet: &SecureWallet,
    input: &Pubkey,
    output: &Pubkey,
    raw_amount: u64,
    slippage_bps: u16,
) -> Result<Fill> {
    let quote = venue.quote(input, output, raw_amount, slippage_bps).await?;
    // an unreadable quote must never reach the ledger
    let out_raw = quote.out_amount_raw()?;
    let signature = venue.execute(&quote, wallet).await?;
    Ok(Fill {
        quote,
        out_raw,
        signature,
    })
}

/// Spends SOL on a token
pub struct BuyTokenTool {
    venue: Arc<dyn SwapVenue>,
    ledger: Arc<LedgerAccessor>,
}

impl BuyTokenTool {
    pub fn new(venue: Arc<dyn SwapVenue>, ledger: Arc<LedgerAccessor>) -> Self {
        Self { venue, ledger }
    }
}

#[async_trait]
impl TradingTool for BuyTokenTool {
    const NAME: &'static str = TOOL_BUY_TOKEN;
    type Input = BuyTokenInput;

    fn description(&self) -> &'static str {
        "Buy a token with SOL through Jupiter. Signs with the configured wallet and \
         returns once the transaction is confirmed."
    }

    async fn execute(&self, input: Self::Input) -> Result<Value> {
        let wallet = self.ledger.resolve_wallet()?;
        let token = resolve_mint(&input.token_mint)?;
        let slippage_bps = check_slippage(input.slippage_bps)?;
        let lamports = to_raw_amount(input.sol_amount, NATIVE_DECIMALS)?;

        let Fill { quote, signature, .. } = swap(
            self.venue.as_ref(),
            &wallet,
            &native_mint(),
            &token,
            lamports,
            slippage_bps,
        )
        .await?;

        info!(signature = %signature, token = %token, "Buy confirmed");

        Ok(json!({
            "status": "success",
            "signature": signature.to_string(),
            "sol_spent": input.sol_amount,
            "tokens_received": quote.out_amount,
            "explorer_url": explorer_url(&signature.to_string()),
        }))
    }
}

/// Sells a token for SOL
pub struct SellTokenTool {
    venue: Arc<dyn SwapVenue>,
    ledger: Arc<LedgerAccessor>,
}

impl SellTokenTool {
    pub fn new(venue: Arc<dyn SwapVenue>, ledger: Arc<LedgerAccessor>) -> Self {
        Self { venue, ledger }
    }
}

#[async_trait]
impl TradingTool for SellTokenTool {
    const NAME: &'static str = TOOL_SELL_TOKEN;
    type Input = SellTokenInput;

    fn description(&self) -> &'static str {
        "Sell a token for SOL through Jupiter. token_amount is in human units of the \
         token and token_decimals is taken as given. Returns once confirmed."
    }

    async fn execute(&self, input: Self::Input) -> Result<Value> {
        let wallet = self.ledger.resolve_wallet()?;
        let token = resolve_mint(&input.token_mint)?;
        let decimals = check_decimals("token_decimals", input.token_decimals)?;
        let slippage_bps = check_slippage(input.slippage_bps)?;
        let raw_amount = to_raw_amount(input.token_amount, decimals)?;

        let Fill { out_raw, signature, .. } = swap(
            self.venue.as_ref(),
            &wallet,
            &token,
            &native_mint(),
            raw_amount,
            slippage_bps,
        )
        .await?;

        info!(signature = %signature, token = %token, "Sell confirmed");

        let sol_received = to_ui_amount(out_raw, NATIVE_DECIMALS);
        Ok(json!({
            "status": "success",
            "signature": signature.to_string(),
            "tokens_sold": input.token_amount,
            "sol_received": sol_received,
            "explorer_url": explorer_url(&signature.to_string()),
        }))
    }
}

/// Buys a token and immediately sells what was bought
pub struct BuyAndSellTool {
    venue: Arc<dyn SwapVenue>,
    ledger: Arc<LedgerAccessor>,
}

impl BuyAndSellTool {
    pub fn new(venue: Arc<dyn SwapVenue>, ledger: Arc<LedgerAccessor>) -> Self {
        Self { venue, ledger }
    }

    async fn sell_leg(
        &self,
        wallet: &SecureWallet,
        token: &Pubkey,
        raw_amount: u64,
        slippage_bps: u16,
    ) -> Result<(u8, Fill)> {
        let decimals = self.ledger.asset_decimals(token).await?;
        let fill = swap(
            self.venue.as_ref(),
            wallet,
            token,
            &native_mint(),
            raw_amount,
            slippage_bps,
        )
        .await?;
        Ok((decimals, fill))
    }

    /// Run both legs, folding failures into the report
    pub async fn round_trip(&self, input: &BuyAndSellInput) -> Result<RoundTripReport> {
        let wallet = self.ledger.resolve_wallet()?;
        let token = resolve_mint(&input.token_mint)?;
        let slippage_bps = check_slippage(input.slippage_bps)?;
        let lamports = to_raw_amount(input.sol_amount, NATIVE_DECIMALS)?;

        let buy = match swap(
            self.venue.as_ref(),
            &wallet,
            &native_mint(),
            &token,
            lamports,
            slippage_bps,
        )
        .await
        {
            Ok(fill) => fill,
            Err(e) => {
                error!(token = %token, error = %e, "Buy leg failed");
                return Ok(RoundTripReport::Error {
                    phase: TradePhase::Buy,
                    error: e.to_string(),
                });
            }
        };
        let buy_signature = buy.signature;
        info!(signature = %buy_signature, token = %token, "Buy leg confirmed");

        let (decimals, sell) = match self
            .sell_leg(&wallet, &token, buy.out_raw, slippage_bps)
            .await
        {
            Ok(leg) => leg,
            Err(e) => {
                warn!(
                    buy_signature = %buy_signature,
                    token = %token,
                    error = %e,
                    "Sell leg failed; bought position remains open"
                );
                return Ok(RoundTripReport::Partial {
                    phase: TradePhase::Sell,
                    buy_signature: buy_signature.to_string(),
                    sol_spent: input.sol_amount,
                    tokens_received: buy.quote.out_amount.clone(),
                    error: e.to_string(),
                });
            }
        };
        info!(signature = %sell.signature, token = %token, "Sell leg confirmed");

        let sol_received = to_ui_amount(sell.out_raw, NATIVE_DECIMALS);
        let net_sol = sol_received - input.sol_amount;

        Ok(RoundTripReport::Success {
            buy_signature: buy_signature.to_string(),
            sell_signature: sell.signature.to_string(),
            token_mint: token.to_string(),
            sol_spent: input.sol_amount,
            tokens_received: buy.quote.out_amount,
            tokens_sold: to_ui_amount(buy.out_raw, decimals),
            sol_received,
            net_sol,
            profit_sol: net_sol,
        })
    }
}

#[async_trait]
impl TradingTool for BuyAndSellTool {
    const NAME: &'static str = TOOL_BUY_AND_SELL;
    type Input = BuyAndSellInput;

    fn description(&self) -> &'static str {
        "Buy a token with SOL, then sell the exact amount received back to SOL. \
         Reports status success, partial (bought but not sold) or error (nothing bought)."
    }

    async fn execute(&self, input: Self::Input) -> Result<Value> {
        let report = self.round_trip(&input).await?;
        Ok(serde_json::to_value(report)?)
    }
}
