//! # Jupiter Aggregator Client
//!
//! Quote and swap-transaction requests against the Jupiter v6 HTTP API.
//! Both requests share one fixed deadline; there is no retry.

pub mod quote;
pub mod swap;
pub mod types;

use crate::config::JupiterSettings;
use crate::{Error, Result};
use reqwest::Client;
use std::time::Duration;

pub use types::{Quote, RoutePlanStep, SwapInfo, SwapTransactionResponse};

/// HTTP client for the Jupiter swap API
#[derive(Debug, Clone)]
pub struct JupiterClient {
    http: Client,
    base_url: String,
}

impl JupiterClient {
    /// Create a client from settings
    pub fn new(settings: &JupiterSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }
}
