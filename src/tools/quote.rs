//! Read-only swap quote tool

use super::types::{
    check_amount, check_decimals, check_slippage, default_input_decimals, default_slippage_bps,
    ValidateInput,
};
use super::{TradingTool, TOOL_GET_QUOTE};
use crate::execution::SwapVenue;
use crate::tokens::{resolve_mint, to_raw_amount};
use crate::Result;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetQuoteInput {
    /// Input token mint address, or "SOL"
    pub input_mint: String,
    /// Output token mint address, or "SOL"
    pub output_mint: String,
    /// Amount of the input token in human units
    pub amount: f64,
    /// Decimals of the input token
    #[serde(default = "default_input_decimals")]
    #[schemars(range(min = 0, max = 18))]
    pub input_decimals: u32,
    /// Slippage tolerance in basis points
    #[serde(default = "default_slippage_bps")]
    #[schemars(range(min = 1, max = 5000))]
    pub slippage_bps: u32,
}

impl ValidateInput for GetQuoteInput {
    fn validate(&self) -> Result<()> {
        check_amount("amount", self.amount)?;
        check_decimals("input_decimals", self.input_decimals)?;
        check_slippage(self.slippage_bps)?;
        Ok(())
    }
}

/// Prices a swap without a wallet
pub struct GetQuoteTool {
    venue: Arc<dyn SwapVenue>,
}

impl GetQuoteTool {
    pub fn new(venue: Arc<dyn SwapVenue>) -> Self {
        Self { venue }
    }
}

#[async_trait]
impl TradingTool for GetQuoteTool {
    const NAME: &'static str = TOOL_GET_QUOTE;
    type Input = GetQuoteInput;

    fn description(&self) -> &'static str {
        "Get a Jupiter swap quote between two tokens. Amount is in human units \
         of the input token; use \"SOL\" for native SOL. Read-only, no wallet needed."
    }

    async fn execute(&self, input: Self::Input) -> Result<Value> {
        let input_mint = resolve_mint(&input.input_mint)?;
        let output_mint = resolve_mint(&input.output_mint)?;
        let decimals = check_decimals("input_decimals", input.input_decimals)?;
        let slippage_bps = check_slippage(input.slippage_bps)?;
        let raw_amount = to_raw_amount(input.amount, decimals)?;

        let quote = self
            .venue
            .quote(&input_mint, &output_mint, raw_amount, slippage_bps)
            .await?;

        Ok(json!({
            "input_mint": quote.input_mint,
            "output_mint": quote.output_mint,
            "in_amount": quote.in_amount,
            "out_amount": quote.out_amount,
            "other_amount_threshold": quote.other_amount_threshold,
            "slippage_bps": quote.slippage_bps,
            "price_impact_pct": quote.price_impact(),
            "route": quote.route_summary(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{quote_fixture, StubVenue};
    use crate::tokens::native_mint;
    use crate::tools::DynTool;
    use crate::Error;

    fn tool_with(venue: Arc<StubVenue>) -> GetQuoteTool {
        GetQuoteTool::new(venue)
    }

    #[tokio::test]
    async fn converts_human_amount_and_renders_route() {
        let usdc = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
        let venue = Arc::new(StubVenue::new(
            vec![Ok(quote_fixture(
                crate::tokens::NATIVE_MINT,
                usdc,
                500_000_000,
                71_250_000,
            ))],
            vec![],
        ));
        let tool = tool_with(venue.clone());

        let out = tool
            .call(json!({"input_mint": "SOL", "output_mint": usdc, "amount": 0.5}))
            .await
            .unwrap();

        let requests = venue.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].input, native_mint());
        assert_eq!(requests[0].amount, 500_000_000);
        assert_eq!(requests[0].slippage_bps, 50);

        assert_eq!(out["out_amount"], "71250000");
        assert_eq!(out["route"], "Raydium (100%)");
        assert_eq!(out["price_impact_pct"], 0.0012);
    }

    #[tokio::test]
    async fn sol_to_sol_is_accepted() {
        let venue = Arc::new(StubVenue::new(
            vec![Ok(quote_fixture(
                crate::tokens::NATIVE_MINT,
                crate::tokens::NATIVE_MINT,
                1_000_000_000,
                1_000_000_000,
            ))],
            vec![],
        ));
        let tool = tool_with(venue.clone());

        tool.call(json!({"input_mint": "SOL", "output_mint": "SOL", "amount": 1.0}))
            .await
            .unwrap();

        let requests = venue.requests();
        assert_eq!(requests[0].input, native_mint());
        assert_eq!(requests[0].output, native_mint());
    }

    #[tokio::test]
    async fn out_of_range_parameters_never_reach_the_venue() {
        let venue = Arc::new(StubVenue::default());
        let tool = tool_with(venue.clone());

        for args in [
            json!({"input_mint": "SOL", "output_mint": "SOL", "amount": 1.0, "slippage_bps": 0}),
            json!({"input_mint": "SOL", "output_mint": "SOL", "amount": 1.0, "slippage_bps": 5001}),
            json!({"input_mint": "SOL", "output_mint": "SOL", "amount": 1.0, "input_decimals": 19}),
            json!({"input_mint": "SOL", "output_mint": "SOL", "amount": -1.0}),
            json!({"input_mint": "SOL", "amount": 1.0}),
        ] {
            let err = tool.call(args).await.unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{err}");
        }
        assert_eq!(venue.quote_calls(), 0);
    }

    #[tokio::test]
    async fn invalid_mint_is_rejected() {
        let venue = Arc::new(StubVenue::default());
        let tool = tool_with(venue.clone());

        let err = tool
            .call(json!({"input_mint": "not-a-mint", "output_mint": "SOL", "amount": 1.0}))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(venue.quote_calls(), 0);
    }

    #[test]
    fn schema_declares_defaults_and_bounds() {
        let tool = tool_with(Arc::new(StubVenue::default()));
        let schema = tool.input_schema();

        assert_eq!(schema["type"], "object");
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert!(required.contains(&"input_mint"));
        assert!(required.contains(&"amount"));
        assert!(!required.contains(&"slippage_bps"));
        assert_eq!(schema["properties"]["slippage_bps"]["default"], 50);
        assert_eq!(schema["properties"]["slippage_bps"]["maximum"], 5000);
        assert_eq!(schema["properties"]["input_decimals"]["default"], 9);
    }
}
