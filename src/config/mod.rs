//! Configuration for the trade bridge

pub mod rpc;

use serde::{Deserialize, Serialize};

// Re-export RPC config
pub use rpc::RpcConfig;

/// Base58 wallet secret environment variable name
pub const PRIVATE_KEY_ENV: &str = "SOLANA_PRIVATE_KEY";

/// Jupiter API base URL override environment variable name
pub const JUPITER_API_URL_ENV: &str = "JUPITER_API_URL";

/// Public Jupiter v6 swap API
pub const DEFAULT_JUPITER_API_URL: &str = "https://quote-api.jup.ag/v6";

/// Jupiter aggregator settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JupiterSettings {
    /// Base URL of the swap API (quote and swap endpoints hang off it)
    pub base_url: String,
    /// Fixed deadline for quote and swap-build requests
    pub timeout_secs: u64,
}

impl JupiterSettings {
    /// Defaults, honouring `JUPITER_API_URL` when set
    pub fn from_env() -> Self {
        let base_url = std::env::var(JUPITER_API_URL_ENV)
            .unwrap_or_else(|_| DEFAULT_JUPITER_API_URL.to_string());
        Self {
            base_url,
            timeout_secs: 30,
        }
    }
}

impl Default for JupiterSettings {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Risk management configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Operator cap on requested slippage (basis points)
    pub max_slippage_bps: u16,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_slippage_bps: 5_000, // same as the schema bound
        }
    }
}

/// Submission and confirmation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmationSettings {
    /// Delay between signature status polls (milliseconds)
    pub poll_interval_ms: u64,
    /// Transport-level resend attempts handed to the RPC node
    pub max_send_retries: usize,
}

impl Default for ConfirmationSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            max_send_retries: 3,
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Aggregator endpoint settings
    #[serde(default)]
    pub jupiter: JupiterSettings,
    /// Risk management settings
    #[serde(default)]
    pub risk: RiskConfig,
    /// Confirmation polling settings
    #[serde(default)]
    pub confirmation: ConfirmationSettings,
    /// Path to audit log file (JSONL); disabled when absent
    #[serde(default)]
    pub audit_log_path: Option<String>,
}
