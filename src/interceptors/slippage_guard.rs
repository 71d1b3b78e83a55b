//! Slippage guard interceptor
//!
//! Blocks calls whose requested slippage exceeds the operator's cap.

use super::{InterceptorDecision, ToolCallContext, ToolInterceptor};
use crate::tools::{TOOL_BUY_AND_SELL, TOOL_BUY_TOKEN, TOOL_SELL_TOKEN};
use crate::Result;
use async_trait::async_trait;

/// Tools that execute swaps
const GUARDED_TOOLS: &[&str] = &[TOOL_BUY_TOKEN, TOOL_SELL_TOKEN, TOOL_BUY_AND_SELL];

/// Slippage assumed when a call omits `slippage_bps`
const DEFAULT_SLIPPAGE_BPS: u64 = 50;

/// Interceptor that blocks trades with excessive slippage
pub struct SlippageGuardInterceptor {
    /// Maximum allowed slippage in basis points
    max_slippage_bps: u16,
}

impl SlippageGuardInterceptor {
    /// Create a new slippage guard
    ///
    /// # Arguments
    /// * `max_slippage_bps` - Maximum allowed slippage (e.g., 100 for 1%)
    pub fn new(max_slippage_bps: u16) -> Self {
        Self { max_slippage_bps }
    }
}

#[async_trait]
impl ToolInterceptor for SlippageGuardInterceptor {
    async fn intercept_tool_call(&self, context: &ToolCallContext) -> Result<InterceptorDecision> {
        if !GUARDED_TOOLS.contains(&context.tool_name.as_str()) {
            return Ok(InterceptorDecision::Allow);
        }

        // Malformed values are left for the tool's own validation
        let slippage = match context.args.get("slippage_bps") {
            None => DEFAULT_SLIPPAGE_BPS,
            Some(v) => match v.as_u64() {
                Some(bps) => bps,
                None => return Ok(InterceptorDecision::Allow),
            },
        };

        if slippage > u64::from(self.max_slippage_bps) {
            return Ok(InterceptorDecision::Block(format!(
                "Requested slippage {} bps exceeds maximum allowed {} bps",
                slippage, self.max_slippage_bps
            )));
        }

        tracing::debug!(
            tool = %context.tool_name,
            requested_slippage_bps = slippage,
            max_slippage_bps = self.max_slippage_bps,
            "Slippage check passed"
        );

        Ok(InterceptorDecision::Allow)
    }
}
