//! Bridge runner module
//!
//! Wires configuration, the ledger, the aggregator venue and the interceptor
//! pipeline into a tool registry, then serves it.

use crate::config::{Config, RpcConfig, PRIVATE_KEY_ENV};
use crate::execution::{JupiterVenue, SwapVenue};
use crate::interceptors::{AuditLogInterceptor, SlippageGuardInterceptor};
use crate::jupiter::JupiterClient;
use crate::ledger::{LedgerAccessor, LedgerRpc, SolanaRpc};
use crate::server::ToolServer;
use crate::tools::{
    BuyAndSellTool, BuyTokenTool, GetBalanceTool, GetQuoteTool, SellTokenTool, ToolRegistry,
};
use crate::Result;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{info, warn};

/// Read the wallet secret from the environment, if set
pub fn secret_from_env() -> Option<SecretString> {
    match std::env::var(PRIVATE_KEY_ENV) {
        Ok(value) if !value.trim().is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}

/// Runner that owns the bridge's process-wide state
pub struct BridgeRunner {
    config: Config,
    rpc: RpcConfig,
    secret: Option<SecretString>,
}

impl BridgeRunner {
    /// Create a new runner
    pub fn new(config: Config, rpc: RpcConfig) -> Self {
        Self {
            config,
            rpc,
            secret: None,
        }
    }

    /// Set the base58 wallet secret used for signing
    pub fn with_secret(mut self, secret: Option<SecretString>) -> Self {
        self.secret = secret;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the registry against the configured RPC endpoint and aggregator
    pub fn build_registry(&self) -> Result<ToolRegistry> {
        self.rpc.validate()?;
        let ledger: Arc<dyn LedgerRpc> = Arc::new(SolanaRpc::new(&self.rpc));
        let client = JupiterClient::new(&self.config.jupiter)?;
        let venue = Arc::new(JupiterVenue::new(
            client,
            Arc::clone(&ledger),
            self.config.confirmation.clone(),
        ));

        info!(
            rpc_url = %self.rpc.url(),
            jupiter_url = %self.config.jupiter.base_url,
            "Connected collaborators"
        );

        Ok(self.registry_with(venue, ledger))
    }

    /// Build the registry over explicit collaborators
    pub fn registry_with(
        &self,
        venue: Arc<dyn SwapVenue>,
        ledger: Arc<dyn LedgerRpc>,
    ) -> ToolRegistry {
        if self.secret.is_none() {
            warn!("No {} set - only get_quote is usable", PRIVATE_KEY_ENV);
        }

        let secret = self
            .secret
            .as_ref()
            .map(|s| SecretString::from(s.expose_secret().to_owned()));
        let accessor = Arc::new(LedgerAccessor::new(ledger, secret));

        let mut registry = ToolRegistry::new().with_interceptor(SlippageGuardInterceptor::new(
            self.config.risk.max_slippage_bps,
        ));
        info!(
            max_slippage_bps = self.config.risk.max_slippage_bps,
            "Added slippage guard interceptor"
        );

        if let Some(audit_path) = &self.config.audit_log_path {
            registry = registry.with_interceptor(AuditLogInterceptor::new(audit_path));
            info!(audit_path = audit_path, "Added audit log interceptor");
        }

        registry.register(GetQuoteTool::new(Arc::clone(&venue)));
        registry.register(BuyTokenTool::new(Arc::clone(&venue), Arc::clone(&accessor)));
        registry.register(SellTokenTool::new(Arc::clone(&venue), Arc::clone(&accessor)));
        registry.register(BuyAndSellTool::new(venue, Arc::clone(&accessor)));
        registry.register(GetBalanceTool::new(accessor));

        registry
    }

    /// Serve the tools over stdin/stdout until input closes
    pub async fn serve_stdio(&self) -> Result<()> {
        let server = ToolServer::new(self.build_registry()?);
        server
            .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{wallet_secret, StubLedger, StubVenue};
    use crate::tools::{
        TOOL_BUY_AND_SELL, TOOL_BUY_TOKEN, TOOL_GET_BALANCE, TOOL_GET_QUOTE, TOOL_SELL_TOKEN,
    };
    use serde_json::json;
    use tempfile::NamedTempFile;

    #[test]
    fn registers_all_five_tools() {
        let runner = BridgeRunner::new(Config::default(), RpcConfig::default());
        let registry =
            runner.registry_with(Arc::new(StubVenue::default()), Arc::new(StubLedger::default()));

        let names = registry.names();
        for name in [
            TOOL_GET_QUOTE,
            TOOL_BUY_TOKEN,
            TOOL_SELL_TOKEN,
            TOOL_BUY_AND_SELL,
            TOOL_GET_BALANCE,
        ] {
            assert!(names.contains(&name), "missing {name}");
        }
        assert_eq!(names.len(), 5);
    }

    #[tokio::test]
    async fn operator_slippage_cap_applies() {
        let mut config = Config::default();
        config.risk.max_slippage_bps = 100;
        let (secret, _) = wallet_secret();
        let venue = Arc::new(StubVenue::default());
        let runner = BridgeRunner::new(config, RpcConfig::default()).with_secret(Some(secret));
        let registry = runner.registry_with(venue.clone(), Arc::new(StubLedger::default()));

        let reply = registry
            .invoke(
                TOOL_BUY_TOKEN,
                json!({"token_mint": "SOL", "sol_amount": 0.1, "slippage_bps": 500}),
            )
            .await;

        assert!(reply.is_error);
        assert!(reply.text.starts_with("Error: Interceptor blocked"));
        assert_eq!(venue.quote_calls(), 0);
    }

    #[tokio::test]
    async fn audit_log_records_calls_when_configured() {
        let audit = NamedTempFile::new().unwrap();
        let config = Config {
            audit_log_path: Some(audit.path().display().to_string()),
            ..Config::default()
        };
        let runner = BridgeRunner::new(config, RpcConfig::default());
        let registry =
            runner.registry_with(Arc::new(StubVenue::default()), Arc::new(StubLedger::default()));

        let reply = registry.invoke(TOOL_GET_BALANCE, json!({})).await;
        assert!(reply.is_error);

        let content = std::fs::read_to_string(audit.path()).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("get_balance"));
    }

    #[tokio::test]
    async fn rate_limited_quote_renders_upstream_error() {
        use crate::config::JupiterSettings;
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/quote"))
            .and(query_param("amount", "500000000"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
            .expect(1)
            .mount(&server)
            .await;

        let ledger: Arc<dyn LedgerRpc> = Arc::new(StubLedger::default());
        let client = JupiterClient::new(&JupiterSettings {
            base_url: server.uri(),
            timeout_secs: 30,
        })
        .unwrap();
        let venue = Arc::new(JupiterVenue::new(
            client,
            Arc::clone(&ledger),
            Default::default(),
        ));
        let registry =
            BridgeRunner::new(Config::default(), RpcConfig::default()).registry_with(venue, ledger);

        let reply = registry
            .invoke(
                TOOL_GET_QUOTE,
                json!({"input_mint": "SOL", "output_mint": "SOL", "amount": 0.5}),
            )
            .await;

        assert!(reply.is_error);
        assert_eq!(reply.text, "Error: Jupiter quote failed (429): Rate limit exceeded");
    }

    #[test]
    fn rejects_non_http_rpc_url() {
        let runner = BridgeRunner::new(Config::default(), RpcConfig::with_url("ftp://example.com"));
        assert!(runner.build_registry().is_err());
    }
}
