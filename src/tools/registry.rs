//! Tool registry and invocation pipeline

use super::{render, DynTool, TradingTool};
use crate::interceptors::{InterceptorDecision, ToolCallContext, ToolInterceptor};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Listing entry for one tool
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Rendered outcome of one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolReply {
    /// JSON result, or `Error: <message>`
    pub text: String,
    pub is_error: bool,
}

/// Named tools plus the interceptors every call passes through
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn DynTool>>,
    interceptors: Vec<Arc<dyn ToolInterceptor>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool; a later tool with the same name replaces the earlier one
    pub fn register<T>(&mut self, tool: T)
    where
        T: TradingTool + 'static,
    {
        self.tools.retain(|t| t.name() != T::NAME);
        self.tools.push(Box::new(tool));
    }

    /// Append an interceptor; interceptors run in insertion order
    pub fn with_interceptor(mut self, interceptor: impl ToolInterceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools
            .iter()
            .map(|t| ToolDescriptor {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    /// Run a tool by name; never fails, errors are rendered into the reply
    pub async fn invoke(&self, name: &str, args: Value) -> ToolReply {
        let result = self.dispatch(name, args).await;
        ToolReply {
            text: render(&result),
            is_error: result.is_err(),
        }
    }

    async fn dispatch(&self, name: &str, args: Value) -> Result<Value> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| Error::Validation(format!("Unknown tool: {}", name)))?;

        let args = match args {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        let context = ToolCallContext {
            call_id: uuid::Uuid::new_v4().to_string(),
            tool_name: name.to_string(),
            args,
        };

        for interceptor in &self.interceptors {
            if let InterceptorDecision::Block(reason) =
                interceptor.intercept_tool_call(&context).await?
            {
                warn!(
                    call_id = %context.call_id,
                    tool = name,
                    reason = %reason,
                    "Tool call blocked"
                );
                return Err(Error::Blocked(reason));
            }
        }

        info!(call_id = %context.call_id, tool = name, "Tool call started");
        let started = Instant::now();
        let result = tool.call(context.args.clone()).await;
        let duration_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => info!(
                call_id = %context.call_id,
                tool = name,
                duration_ms,
                "Tool call finished"
            ),
            Err(e) => warn!(
                call_id = %context.call_id,
                tool = name,
                duration_ms,
                error = %e,
                "Tool call failed"
            ),
        }

        for interceptor in &self.interceptors {
            interceptor
                .on_tool_call_complete(&context, &result, duration_ms)
                .await;
        }

        result
    }
}
