//! Shared fixtures and stub collaborators for unit tests

use crate::execution::SwapVenue;
use crate::jupiter::Quote;
use crate::ledger::{LedgerRpc, SignatureState, TokenHolding};
use crate::wallet::SecureWallet;
use crate::{Error, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use secrecy::SecretString;
use serde_json::json;
use solana_sdk::message::{Message, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::VersionedTransaction;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Fresh keypair encoded the way `SOLANA_PRIVATE_KEY` carries it
pub fn wallet_secret() -> (SecretString, Pubkey) {
    let keypair = Keypair::new();
    let encoded = bs58::encode(keypair.to_bytes()).into_string();
    (SecretString::from(encoded), keypair.pubkey())
}

/// Base64 bincode transaction with `payer` as sole, unsigned signer
pub fn encoded_unsigned_transaction(payer: &Pubkey) -> String {
    let message = Message::new(&[], Some(payer));
    let unsigned = VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::Legacy(message),
    };
    STANDARD.encode(bincode::serialize(&unsigned).unwrap())
}

/// Transaction signed by a throwaway keypair
pub fn signed_transaction() -> VersionedTransaction {
    let keypair = Keypair::new();
    let message = Message::new(&[], Some(&keypair.pubkey()));
    VersionedTransaction::try_new(VersionedMessage::Legacy(message), &[&keypair]).unwrap()
}

/// Single-hop quote as the aggregator would return it
pub fn quote_fixture(input_mint: &str, output_mint: &str, in_amount: u64, out_amount: u64) -> Quote {
    serde_json::from_value(json!({
        "inputMint": input_mint,
        "inAmount": in_amount.to_string(),
        "outputMint": output_mint,
        "outAmount": out_amount.to_string(),
        "otherAmountThreshold": (out_amount - out_amount / 200).to_string(),
        "swapMode": "ExactIn",
        "slippageBps": 50,
        "priceImpactPct": "0.0012",
        "routePlan": [{
            "swapInfo": {
                "ammKey": "58oQChx4yWmvKdwLLZzBi4ChoCc2fqCUWBkwMihLYQo2",
                "label": "Raydium",
                "inputMint": input_mint,
                "outputMint": output_mint,
                "inAmount": in_amount.to_string(),
                "outAmount": out_amount.to_string(),
                "feeAmount": "0",
                "feeMint": input_mint
            },
            "percent": 100
        }],
        "contextSlot": 279000000u64,
        "timeTaken": 0.01
    }))
    .unwrap()
}

/// In-memory ledger with scripted confirmation states
///
/// Block height starts at 100 and advances by one per `block_height` read.
/// The first `failing_height_reads` reads return an RPC error instead.
pub struct StubLedger {
    pub lamports: u64,
    pub holdings: Vec<TokenHolding>,
    pub decimals: u8,
    pub fail_decimals: bool,
    pub reject_send: bool,
    pub last_valid_block_height: u64,
    pub states: Mutex<VecDeque<SignatureState>>,
    pub block_height: AtomicU64,
    pub failing_height_reads: AtomicUsize,
    pub decimals_calls: AtomicUsize,
    pub send_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub last_max_retries: AtomicUsize,
}

impl Default for StubLedger {
    fn default() -> Self {
        Self {
            lamports: 0,
            holdings: Vec::new(),
            decimals: 6,
            fail_decimals: false,
            reject_send: false,
            last_valid_block_height: 150,
            states: Mutex::new(VecDeque::new()),
            block_height: AtomicU64::new(100),
            failing_height_reads: AtomicUsize::new(0),
            decimals_calls: AtomicUsize::new(0),
            send_calls: AtomicUsize::new(0),
            status_calls: AtomicUsize::new(0),
            last_max_retries: AtomicUsize::new(0),
        }
    }
}

impl StubLedger {
    /// Stub whose signature polls yield `states` in order, then stay pending
    pub fn with_states(states: Vec<SignatureState>) -> Self {
        Self {
            states: Mutex::new(states.into()),
            ..Default::default()
        }
    }
}

#[async_trait]
impl LedgerRpc for StubLedger {
    async fn lamport_balance(&self, _owner: &Pubkey) -> Result<u64> {
        Ok(self.lamports)
    }

    async fn token_holdings(&self, _owner: &Pubkey, _mint: &Pubkey) -> Result<Vec<TokenHolding>> {
        Ok(self.holdings.clone())
    }

    async fn mint_decimals(&self, mint: &Pubkey) -> Result<u8> {
        self.decimals_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_decimals {
            return Err(Error::Rpc(format!("Failed to get mint info for {}", mint)));
        }
        Ok(self.decimals)
    }

    async fn send_transaction(
        &self,
        transaction: &VersionedTransaction,
        max_retries: usize,
    ) -> Result<Signature> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.last_max_retries.store(max_retries, Ordering::SeqCst);
        if self.reject_send {
            return Err(Error::Submission("Blockhash not found".to_string()));
        }
        Ok(transaction.signatures.first().copied().unwrap_or_default())
    }

    async fn last_valid_block_height(&self) -> Result<u64> {
        Ok(self.last_valid_block_height)
    }

    async fn block_height(&self) -> Result<u64> {
        let failing = self
            .failing_height_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if failing.is_ok() {
            return Err(Error::Rpc("503 transient".to_string()));
        }
        Ok(self.block_height.fetch_add(1, Ordering::SeqCst))
    }

    async fn signature_state(&self, _signature: &Signature) -> Result<SignatureState> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let next = self.states.lock().unwrap().pop_front();
        Ok(next.unwrap_or(SignatureState::Pending))
    }
}

/// One recorded `SwapVenue::quote` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRequest {
    pub input: Pubkey,
    pub output: Pubkey,
    pub amount: u64,
    pub slippage_bps: u16,
}

/// Venue replaying scripted quote and execution outcomes
#[derive(Default)]
pub struct StubVenue {
    pub quotes: Mutex<VecDeque<Result<Quote>>>,
    pub executions: Mutex<VecDeque<Result<Signature>>>,
    pub quote_requests: Mutex<Vec<QuoteRequest>>,
    pub execute_calls: AtomicUsize,
}

impl StubVenue {
    pub fn new(quotes: Vec<Result<Quote>>, executions: Vec<Result<Signature>>) -> Self {
        Self {
            quotes: Mutex::new(quotes.into()),
            executions: Mutex::new(executions.into()),
            ..Default::default()
        }
    }

    pub fn quote_calls(&self) -> usize {
        self.quote_requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<QuoteRequest> {
        self.quote_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SwapVenue for StubVenue {
    async fn quote(
        &self,
        input: &Pubkey,
        output: &Pubkey,
        amount: u64,
        slippage_bps: u16,
    ) -> Result<Quote> {
        self.quote_requests.lock().unwrap().push(QuoteRequest {
            input: *input,
            output: *output,
            amount,
            slippage_bps,
        });
        self.quotes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Rpc("no scripted quote".to_string())))
    }

    async fn execute(&self, _quote: &Quote, _wallet: &SecureWallet) -> Result<Signature> {
        self.execute_calls.fetch_add(1, Ordering::SeqCst);
        self.executions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Rpc("no scripted execution".to_string())))
    }
}
