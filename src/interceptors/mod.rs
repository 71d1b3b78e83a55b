//! Risk management and audit interceptors
//!
//! These interceptors form a governance pipeline that all tool calls must pass through.
//! They log every operation and can block risky trades before anything is quoted.

mod audit_log;
mod slippage_guard;

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

pub use audit_log::AuditLogInterceptor;
pub use slippage_guard::SlippageGuardInterceptor;

/// A tool invocation as seen by interceptors
#[derive(Debug, Clone)]
pub struct ToolCallContext {
    /// Unique id for correlating start and completion
    pub call_id: String,
    pub tool_name: String,
    /// Raw arguments, before deserialisation
    pub args: Value,
}

/// Verdict returned before a tool runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterceptorDecision {
    Allow,
    Block(String),
}

/// Hook run around every tool call
#[async_trait]
pub trait ToolInterceptor: Send + Sync {
    /// Decide whether the call may proceed
    async fn intercept_tool_call(&self, context: &ToolCallContext) -> Result<InterceptorDecision>;

    /// Observe the outcome of an allowed call
    async fn on_tool_call_complete(
        &self,
        _context: &ToolCallContext,
        _result: &Result<Value>,
        _duration_ms: u64,
    ) {
    }
}
