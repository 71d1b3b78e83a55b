//! Error types for the trade bridge

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error("Invalid wallet secret: {0}")]
    InvalidSecret(String),

    #[error("Wallet not configured: set SOLANA_PRIVATE_KEY to use this operation")]
    MissingWallet,

    #[error("Jupiter quote failed ({status}): {body}")]
    UpstreamQuote { status: u16, body: String },

    #[error("Jupiter swap build failed ({status}): {body}")]
    UpstreamSwapBuild { status: u16, body: String },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Transaction submission failed: {0}")]
    Submission(String),

    #[error("Transaction {signature} was not confirmed before block height {last_valid_block_height}")]
    ConfirmationTimeout {
        signature: String,
        last_valid_block_height: u64,
    },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Transaction error: {0}")]
    Transaction(String),

    #[error("Interceptor blocked: {0}")]
    Blocked(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Map a reqwest failure, keeping deadline expiry distinguishable.
    pub fn from_request(context: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(format!("{}: {}", context, err))
        } else {
            Error::Network(err)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
