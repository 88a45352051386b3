use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::types::*;

/// Execution function for a registered tool.
///
/// Handlers decode their own arguments from the raw value and return the
/// human-readable rendering of their result; the dispatcher wraps it into
/// the `content` envelope. Any error — argument decode or downstream — is
/// mapped to an internal-error response.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, args: Value) -> Result<String, McpError>;
}

/// Wraps an async closure into a [`ToolHandler`].
pub struct FnToolHandler<F> {
    f: F,
}

impl<F, Fut> FnToolHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<String, McpError>> + Send + 'static,
{
    pub fn new(f: F) -> Arc<dyn ToolHandler> {
        Arc::new(Self { f })
    }
}

#[async_trait]
impl<F, Fut> ToolHandler for FnToolHandler<F>
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: std::future::Future<Output = Result<String, McpError>> + Send + 'static,
{
    async fn call(&self, args: Value) -> Result<String, McpError> {
        (self.f)(args).await
    }
}

struct RegisteredTool {
    def: Tool,
    handler: Arc<dyn ToolHandler>,
}

/// The tool registry and JSON-RPC dispatcher.
///
/// Register every tool before serving: after construction the server is
/// only ever read, so it can be shared across request tasks without locks.
/// There is no deregistration.
#[derive(Default)]
pub struct Server {
    tools: HashMap<String, RegisteredTool>,
}

impl Server {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its descriptor name. Registering the same name
    /// twice replaces the earlier entry.
    pub fn register_tool(&mut self, def: Tool, handler: Arc<dyn ToolHandler>) {
        self.tools
            .insert(def.name.clone(), RegisteredTool { def, handler });
    }

    /// The public descriptor for a registered tool, if any.
    pub fn lookup(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name).map(|t| &t.def)
    }

    /// Route a JSON-RPC request to the appropriate handler.
    ///
    /// Total: every failure path becomes an error-bearing response echoing
    /// the request id.
    pub async fn handle(&self, req: JsonRpcRequest) -> McpResponse {
        match req.method.as_str() {
            "tools/list" => self.handle_tools_list(req),
            "tools/call" => self.handle_tools_call(req).await,
            _ => new_error_response(
                req.id,
                ERR_CODE_NO_METHOD,
                format!("Method not found: {}", req.method),
            ),
        }
    }

    fn handle_tools_list(&self, req: JsonRpcRequest) -> McpResponse {
        // Enumeration order follows the map and is not guaranteed.
        let tools: Vec<&Tool> = self.tools.values().map(|t| &t.def).collect();
        new_ok_response(req.id, json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, req: JsonRpcRequest) -> McpResponse {
        let params: ToolCallParams = match req.params.as_ref() {
            Some(p) => match serde_json::from_value(p.clone()) {
                Ok(p) => p,
                Err(e) => {
                    return new_error_response(
                        req.id,
                        ERR_CODE_BAD_PARAMS,
                        format!("invalid params: {e}"),
                    );
                }
            },
            None => {
                return new_error_response(req.id, ERR_CODE_BAD_PARAMS, "params required");
            }
        };

        let tool = match self.tools.get(&params.name) {
            Some(t) => t,
            None => {
                return new_error_response(
                    req.id,
                    ERR_CODE_TOOL_NOT_FOUND,
                    format!("Tool not found: {}", params.name),
                );
            }
        };

        match tool.handler.call(params.arguments).await {
            Ok(rendered) => {
                let result = serde_json::to_value(text_result(rendered)).unwrap_or(Value::Null);
                new_ok_response(req.id, result)
            }
            Err(e) => {
                tracing::error!(tool = %params.name, error = %e, "tool call failed");
                new_error_response(req.id, ERR_CODE_INTERNAL, e.to_string())
            }
        }
    }
}
