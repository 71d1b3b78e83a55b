//! Audit log interceptor
//!
//! Appends every tool call to a JSONL file for compliance and debugging.

use super::{InterceptorDecision, ToolCallContext, ToolInterceptor};
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Entry in the audit log
#[derive(Debug, Serialize)]
struct AuditEntry<'a> {
    timestamp: DateTime<Utc>,
    entry_type: &'static str,
    call_id: &'a str,
    tool_name: &'a str,
    args: &'a Value,
    result: Option<&'a Value>,
    error: Option<String>,
    duration_ms: u64,
    status: &'static str,
}

/// Writer for audit log entries
struct AuditLogWriter {
    path: PathBuf,
}

impl AuditLogWriter {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn write(&self, entry: &AuditEntry<'_>) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let json = serde_json::to_string(entry)?;
        writeln!(file, "{}", json)?;
        Ok(())
    }
}

/// Interceptor that logs all tool calls to a file
pub struct AuditLogInterceptor {
    writer: Arc<Mutex<AuditLogWriter>>,
}

impl AuditLogInterceptor {
    /// Create a new audit log interceptor
    ///
    /// # Arguments
    /// * `log_path` - Path to the audit log file (JSONL format)
    pub fn new(log_path: impl Into<PathBuf>) -> Self {
        Self {
            writer: Arc::new(Mutex::new(AuditLogWriter::new(log_path.into()))),
        }
    }

    async fn append(&self, entry: AuditEntry<'_>) {
        let writer = self.writer.lock().await;
        if let Err(e) = writer.write(&entry) {
            tracing::warn!(error = %e, "Failed to write audit log entry");
        }
    }
}

#[async_trait]
impl ToolInterceptor for AuditLogInterceptor {
    async fn intercept_tool_call(&self, context: &ToolCallContext) -> Result<InterceptorDecision> {
        self.append(AuditEntry {
            timestamp: Utc::now(),
            entry_type: "tool_call_start",
            call_id: &context.call_id,
            tool_name: &context.tool_name,
            args: &context.args,
            result: None,
            error: None,
            duration_ms: 0,
            status: "pending",
        })
        .await;

        // Audit logging never blocks
        Ok(InterceptorDecision::Allow)
    }

    async fn on_tool_call_complete(
        &self,
        context: &ToolCallContext,
        result: &Result<Value>,
        duration_ms: u64,
    ) {
        let (result_value, error, status) = match result {
            Ok(v) => (Some(v), None, "success"),
            Err(e) => (None, Some(e.to_string()), "error"),
        };

        self.append(AuditEntry {
            timestamp: Utc::now(),
            entry_type: "tool_call_complete",
            call_id: &context.call_id,
            tool_name: &context.tool_name,
            args: &context.args,
            result: result_value,
            error,
            duration_ms,
            status,
        })
        .await;
    }
}
