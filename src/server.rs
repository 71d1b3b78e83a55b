//! Stdio tool server
//!
//! Newline-delimited JSON-RPC 2.0 carrying the tool subset of the Model
//! Context Protocol. Stdout carries protocol frames only; logging goes to
//! stderr.

use crate::tools::ToolRegistry;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// Protocol revision reported when the client does not ask for one
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const PARSE_ERROR: i64 = -32700;
const INVALID_REQUEST: i64 = -32600;
const METHOD_NOT_FOUND: i64 = -32601;
const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Serialize)]
struct RpcError {
    code: i64,
    message: String,
}

#[derive(Debug, Serialize)]
struct RpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

impl RpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

/// Serves a [`ToolRegistry`] over a line-oriented byte stream
pub struct ToolServer {
    registry: ToolRegistry,
    name: String,
    version: String,
}

impl ToolServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Handle one frame; `None` when no reply is due
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let raw: Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Unparsable frame");
                return reply(RpcResponse::error(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let request: RpcRequest = match serde_json::from_value(raw.clone()) {
            Ok(r) => r,
            Err(e) => {
                let id = raw.get("id").cloned().unwrap_or(Value::Null);
                return reply(RpcResponse::error(
                    id,
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ));
            }
        };

        // notifications never get a reply
        let id = match request.id {
            Some(id) if !request.method.starts_with("notifications/") => id,
            _ => {
                debug!(method = %request.method, "Notification received");
                return None;
            }
        };

        let response = match request.method.as_str() {
            "initialize" => RpcResponse::success(id, self.initialize(&request.params)),
            "ping" => RpcResponse::success(id, json!({})),
            "tools/list" => RpcResponse::success(id, json!({ "tools": self.registry.list() })),
            "tools/call" => match serde_json::from_value::<CallParams>(request.params) {
                Ok(params) => {
                    let outcome = self.registry.invoke(&params.name, params.arguments).await;
                    RpcResponse::success(
                        id,
                        json!({
                            "content": [{ "type": "text", "text": outcome.text }],
                            "isError": outcome.is_error,
                        }),
                    )
                }
                Err(e) => {
                    RpcResponse::error(id, INVALID_PARAMS, format!("Invalid params: {}", e))
                }
            },
            other => {
                RpcResponse::error(id, METHOD_NOT_FOUND, format!("Method not found: {}", other))
            }
        };

        reply(response)
    }

    fn initialize(&self, params: &Value) -> Value {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(PROTOCOL_VERSION);

        info!(protocol_version, "Client initialised");

        json!({
            "protocolVersion": protocol_version,
            "capabilities": { "tools": {} },
            "serverInfo": { "name": self.name, "version": self.version },
        })
    }

    /// Serve until the reader reaches end of input
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        info!(tools = ?self.registry.names(), "Tool server listening on stdio");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut frame = serde_json::to_string(&response)?;
                frame.push('\n');
                writer.write_all(frame.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }
}

fn reply(response: RpcResponse) -> Option<Value> {
    serde_json::to_value(response).ok()
}
