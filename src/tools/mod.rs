//! Tool implementations for the trade bridge
//!
//! Each tool implements [`TradingTool`] with a typed, schema-carrying input.
//! The [`ToolRegistry`] erases the input type, runs the interceptor pipeline
//! and renders every outcome as a single text payload.

mod quote;
mod registry;
mod trade;
mod types;
mod wallet;

use crate::{Error, Result};
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use quote::{GetQuoteInput, GetQuoteTool};
pub use registry::{ToolDescriptor, ToolRegistry, ToolReply};
pub use trade::{
    BuyAndSellInput, BuyAndSellTool, BuyTokenInput, BuyTokenTool, RoundTripReport, SellTokenInput,
    SellTokenTool, TradePhase,
};
pub use types::{explorer_url, ValidateInput, MAX_SLIPPAGE_BPS, MIN_SLIPPAGE_BPS};
pub use wallet::{GetBalanceInput, GetBalanceTool};

pub const TOOL_GET_QUOTE: &str = "get_quote";
pub const TOOL_BUY_TOKEN: &str = "buy_token";
pub const TOOL_SELL_TOKEN: &str = "sell_token";
pub const TOOL_BUY_AND_SELL: &str = "buy_and_sell";
pub const TOOL_GET_BALANCE: &str = "get_balance";

/// A named operation with a typed input
#[async_trait]
pub trait TradingTool: Send + Sync {
    const NAME: &'static str;
    type Input: DeserializeOwned + JsonSchema + ValidateInput + Send;

    fn description(&self) -> &'static str;

    async fn execute(&self, input: Self::Input) -> Result<Value>;
}

/// Type-erased view of a [`TradingTool`] held by the registry
#[async_trait]
pub trait DynTool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> Value;

    /// Deserialise, validate, then execute
    async fn call(&self, args: Value) -> Result<Value>;
}

#[async_trait]
impl<T> DynTool for T
where
    T: TradingTool,
{
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn description(&self) -> &'static str {
        TradingTool::description(self)
    }

    fn input_schema(&self) -> Value {
        schemars::schema_for!(T::Input).to_value()
    }

    async fn call(&self, args: Value) -> Result<Value> {
        let input: T::Input =
            serde_json::from_value(args).map_err(|e| Error::Validation(e.to_string()))?;
        input.validate()?;
        self.execute(input).await
    }
}

/// Text payload for a tool outcome
pub fn render(result: &Result<Value>) -> String {
    match result {
        Ok(value) => serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string()),
        Err(e) => format!("Error: {}", e),
    }
}
