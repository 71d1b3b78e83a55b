//! Wallet balance query tool
//!
//! SECURITY NOTE:
//! - This tool is READ-ONLY - it only queries balances
//! - The secret is decoded only to derive the public address
//! - The wallet address is public information

use super::types::ValidateInput;
use super::{TradingTool, TOOL_GET_BALANCE};
use crate::ledger::LedgerAccessor;
use crate::tokens::{known_token, resolve_mint};
use crate::Result;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetBalanceInput {
    /// Optional token mint address to report alongside the SOL balance
    #[serde(default)]
    pub token_mint: Option<String>,
}

impl ValidateInput for GetBalanceInput {
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Tool for querying the configured wallet's balances
pub struct GetBalanceTool {
    ledger: Arc<LedgerAccessor>,
}

impl GetBalanceTool {
    pub fn new(ledger: Arc<LedgerAccessor>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl TradingTool for GetBalanceTool {
    const NAME: &'static str = TOOL_GET_BALANCE;
    type Input = GetBalanceInput;

    fn description(&self) -> &'static str {
        "Get the configured wallet's SOL balance and, when token_mint is given, its \
         balance of that token. Read-only."
    }

    async fn execute(&self, input: Self::Input) -> Result<Value> {
        let wallet = self.ledger.resolve_wallet()?;
        let owner = wallet.pubkey();

        let mint = input.token_mint.as_deref().map(resolve_mint).transpose()?;

        let sol_balance = self.ledger.native_balance(&owner).await?;
        let mut result = json!({
            "wallet": wallet.address_string(),
            "sol_balance": sol_balance,
        });

        if let Some(mint) = mint {
            let snapshot = self.ledger.fungible_balance(&owner, &mint).await?;
            let mint = mint.to_string();
            let mut token = serde_json::to_value(&snapshot)?;
            if let Some(fields) = token.as_object_mut() {
                if let Some(info) = known_token(&mint) {
                    fields.insert("symbol".to_string(), json!(info.symbol));
                }
                fields.insert("mint".to_string(), json!(mint));
            }
            result["token"] = token;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TokenHolding;
    use crate::test_support::{wallet_secret, StubLedger};
    use crate::tools::DynTool;
    use crate::Error;

    fn tool(stub: StubLedger, with_secret: bool) -> (GetBalanceTool, String) {
        let (secret, pubkey) = wallet_secret();
        let secret = with_secret.then_some(secret);
        let ledger = Arc::new(LedgerAccessor::new(Arc::new(stub), secret));
        (GetBalanceTool::new(ledger), pubkey.to_string())
    }

    #[tokio::test]
    async fn sol_only() {
        let (tool, address) = tool(
            StubLedger {
                lamports: 1_234_000_000,
                ..Default::default()
            },
            true,
        );

        let out = tool.call(json!({})).await.unwrap();

        assert_eq!(out["wallet"], address);
        assert_eq!(out["sol_balance"], 1.234);
        assert!(out.get("token").is_none());
    }

    #[tokio::test]
    async fn token_without_account_reads_as_zero() {
        let (tool, _) = tool(StubLedger::default(), true);
        let mint = solana_sdk::pubkey::Pubkey::new_unique().to_string();

        let out = tool.call(json!({"token_mint": mint})).await.unwrap();

        assert_eq!(out["token"]["amount"], "0");
        assert_eq!(out["token"]["decimals"], 0);
        assert_eq!(out["token"]["uiAmount"], 0.0);
        assert_eq!(out["token"]["mint"], mint);
    }

    #[tokio::test]
    async fn known_token_is_labelled() {
        let usdc = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
        let (tool, _) = tool(
            StubLedger {
                holdings: vec![TokenHolding {
                    raw_amount: 42_000_000,
                    decimals: 6,
                }],
                ..Default::default()
            },
            true,
        );

        let out = tool.call(json!({"token_mint": usdc})).await.unwrap();

        assert_eq!(out["token"]["symbol"], "USDC");
        assert_eq!(out["token"]["uiAmount"], 42.0);
    }

    #[tokio::test]
    async fn requires_wallet() {
        let (tool, _) = tool(StubLedger::default(), false);
        let err = tool.call(json!({})).await.unwrap_err();
        assert!(matches!(err, Error::MissingWallet));
    }
}
