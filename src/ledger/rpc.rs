//! Solana JSON-RPC implementation of [`LedgerRpc`]

use super::{LedgerRpc, SignatureState, TokenHolding};
use crate::config::RpcConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use solana_account_decoder::UiAccountData;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_client::rpc_request::TokenAccountsFilter;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use solana_transaction_status::TransactionStatus;
use tracing::{debug, warn};

/// Ledger access over a Solana RPC endpoint at `confirmed` commitment
pub struct SolanaRpc {
    client: RpcClient,
}

impl SolanaRpc {
    pub fn new(config: &RpcConfig) -> Self {
        Self {
            client: RpcClient::new_with_commitment(
                config.url().to_string(),
                CommitmentConfig::confirmed(),
            ),
        }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

/// Extract `info.tokenAmount` from a jsonParsed SPL token account
pub(crate) fn parse_token_amount(parsed: &Value) -> Option<TokenHolding> {
    let token_amount = parsed.get("info")?.get("tokenAmount")?;
    let raw_amount = token_amount.get("amount")?.as_str()?.parse::<u64>().ok()?;
    let decimals = u8::try_from(token_amount.get("decimals")?.as_u64()?).ok()?;
    Some(TokenHolding {
        raw_amount,
        decimals,
    })
}

/// Map a `getSignatureStatuses` entry onto a [`SignatureState`]
pub(crate) fn signature_state_of(status: Option<TransactionStatus>) -> SignatureState {
    match status {
        None => SignatureState::Pending,
        Some(status) => match status.err {
            Some(err) => SignatureState::Failed(err.to_string()),
            None if status.satisfies_commitment(CommitmentConfig::confirmed()) => {
                SignatureState::Confirmed
            }
            None => SignatureState::Pending,
        },
    }
}

#[async_trait]
impl LedgerRpc for SolanaRpc {
    async fn lamport_balance(&self, owner: &Pubkey) -> Result<u64> {
        self.client
            .get_balance(owner)
            .await
            .map_err(|e| Error::Rpc(format!("Failed to get balance: {}", e)))
    }

    async fn token_holdings(&self, owner: &Pubkey, mint: &Pubkey) -> Result<Vec<TokenHolding>> {
        let accounts = self
            .client
            .get_token_accounts_by_owner(owner, TokenAccountsFilter::Mint(*mint))
            .await
            .map_err(|e| Error::Rpc(format!("Failed to list token accounts: {}", e)))?;

        let mut holdings = Vec::with_capacity(accounts.len());
        for keyed in accounts {
            match &keyed.account.data {
                UiAccountData::Json(parsed) => match parse_token_amount(&parsed.parsed) {
                    Some(holding) => holdings.push(holding),
                    None => warn!(account = %keyed.pubkey, "Unrecognised token account layout"),
                },
                _ => warn!(account = %keyed.pubkey, "Token account not returned as jsonParsed"),
            }
        }

        debug!(owner = %owner, mint = %mint, accounts = holdings.len(), "Token accounts listed");
        Ok(holdings)
    }

    async fn mint_decimals(&self, mint: &Pubkey) -> Result<u8> {
        let supply = self
            .client
            .get_token_supply(mint)
            .await
            .map_err(|e| Error::Rpc(format!("Failed to get mint info for {}: {}", mint, e)))?;
        Ok(supply.decimals)
    }

    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
        max_retries: usize,
    ) -> Result<Signature> {
        let config = RpcSendTransactionConfig {
            skip_preflight: true,
            max_retries: Some(max_retries),
            ..Default::default()
        };

        self.client
            .send_transaction_with_config(transaction, config)
            .await
            .map_err(|e| Error::Submission(e.to_string()))
    }

    async fn last_valid_block_height(&self) -> Result<u64> {
        let (_, last_valid_block_height) = self
            .client
            .get_latest_blockhash_with_commitment(CommitmentConfig::confirmed())
            .await
            .map_err(|e| Error::Rpc(format!("Failed to get latest blockhash: {}", e)))?;
        Ok(last_valid_block_height)
    }

    async fn block_height(&self) -> Result<u64> {
        self.client
            .get_block_height_with_commitment(CommitmentConfig::confirmed())
            .await
            .map_err(|e| Error::Rpc(format!("Failed to get block height: {}", e)))
    }

    async fn signature_state(&self, signature: &Signature) -> Result<SignatureState> {
        let statuses = self
            .client
            .get_signature_statuses(&[*signature])
            .await
            .map_err(|e| Error::Rpc(format!("Failed to get signature status: {}", e)))?
            .value;

        Ok(signature_state_of(statuses.into_iter().next().flatten()))
    }
}
