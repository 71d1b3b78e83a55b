//! # Jupiter API Types
//!
//! Wire types for the Jupiter v6 quote and swap endpoints.
//!
//! Unknown upstream fields are kept in `extra` so a quote can be posted back
//! to the swap endpoint exactly as it was received.

use crate::tokens::parse_raw_amount;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response from Jupiter quote API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub input_mint: String,
    pub in_amount: String,
    pub output_mint: String,
    pub out_amount: String,
    /// Minimum acceptable output after slippage
    pub other_amount_threshold: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_mode: Option<String>,
    pub slippage_bps: u16,
    /// Jupiter sends this as a decimal string; older deployments used a number
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub price_impact_pct: Value,
    #[serde(default)]
    pub route_plan: Vec<RoutePlanStep>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Quote {
    /// Raw input amount
    pub fn in_amount_raw(&self) -> Result<u64> {
        parse_raw_amount("inAmount", &self.in_amount)
    }

    /// Raw expected output amount
    pub fn out_amount_raw(&self) -> Result<u64> {
        parse_raw_amount("outAmount", &self.out_amount)
    }

    /// Price impact as a number, whichever form upstream used
    pub fn price_impact(&self) -> Option<f64> {
        match &self.price_impact_pct {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Human-readable route, e.g. `Raydium (60%) -> Orca (40%)`, in upstream order
    pub fn route_summary(&self) -> String {
        self.route_plan
            .iter()
            .map(|step| {
                format!(
                    "{} ({}%)",
                    step.swap_info.label.as_deref().unwrap_or("Unknown"),
                    step.percent
                )
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// A step in Jupiter's routing plan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlanStep {
    pub swap_info: SwapInfo,
    pub percent: u32,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Details about a single swap operation within a route
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapInfo {
    pub amm_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub input_mint: String,
    pub output_mint: String,
    pub in_amount: String,
    pub out_amount: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_mint: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response from Jupiter swap API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapTransactionResponse {
    /// Base64-encoded serialized versioned transaction
    pub swap_transaction: String,
    /// Block height after which the embedded blockhash is invalid
    pub last_valid_block_height: u64,
    #[serde(default)]
    pub prioritization_fee_lamports: Option<u64>,
}
