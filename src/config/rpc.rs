//! RPC endpoint configuration
//!
//! Resolution order:
//! 1. `SOLANA_RPC_URL` - explicit endpoint override
//! 2. Public mainnet-beta RPC - rate limited, fine for light use
//!
//! ```bash
//! export SOLANA_RPC_URL="https://mainnet.helius-rpc.com/?api-key=YOUR_KEY"
//! ```

use crate::{Error, Result};
use url::Url;

/// Environment variable names
mod env_vars {
    pub const SOLANA_RPC_URL: &str = "SOLANA_RPC_URL";
}

/// Public RPC endpoint (rate limited)
pub const PUBLIC_MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";

/// RPC configuration for the Solana cluster
#[derive(Debug, Clone)]
pub struct RpcConfig {
    url: String,
}

impl RpcConfig {
    /// Create RPC config from environment variables
    pub fn from_env() -> Self {
        match std::env::var(env_vars::SOLANA_RPC_URL) {
            Ok(url) if !url.trim().is_empty() => {
                tracing::debug!("Using SOLANA_RPC_URL");
                Self { url }
            }
            _ => {
                tracing::warn!("No SOLANA_RPC_URL configured, using public RPC (rate limited)");
                Self {
                    url: PUBLIC_MAINNET_RPC.to_string(),
                }
            }
        }
    }

    /// Create with an explicit RPC URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// RPC URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Reject URLs that are not http(s)
    pub fn validate(&self) -> Result<()> {
        let parsed = Url::parse(&self.url)
            .map_err(|e| Error::Config(format!("Invalid RPC URL '{}': {}", self.url, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(()),
            other => Err(Error::Config(format!(
                "Unsupported RPC URL scheme '{}'",
                other
            ))),
        }
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_url() {
        let config = RpcConfig::with_url("https://custom.rpc");
        assert_eq!(config.url(), "https://custom.rpc");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let config = RpcConfig::with_url("ftp://custom.rpc");
        assert!(config.validate().is_err());
        assert!(RpcConfig::with_url("not a url").validate().is_err());
    }
}
