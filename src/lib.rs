//! `spotify-mcp-server` — an MCP (Model Context Protocol) server exposing
//! Spotify catalog search tools over HTTP JSON-RPC.
//!
//! The crate is built around a protocol-handling core: envelope and error
//! types in [`types`], the tool registry and method router in [`server`].
//! The registry is populated once, before serving, and read-only after.
//! [`tools`] registers the catalog tool set against the [`spotify`] client,
//! and [`transport_http`] exposes the dispatcher from an axum router.
//!
//! ```rust
//! use spotify_mcp_server::{FnToolHandler, JsonRpcRequest, Server, Tool};
//! use serde_json::{json, Value};
//!
//! # async fn example() {
//! let mut server = Server::new();
//! server.register_tool(
//!     Tool {
//!         name: "echo".into(),
//!         description: "echoes".into(),
//!         input_schema: json!({"type": "object", "properties": {}}),
//!     },
//!     FnToolHandler::new(|args: Value| async move {
//!         Ok(args.get("msg").and_then(|v| v.as_str()).unwrap_or("").to_string())
//!     }),
//! );
//!
//! let req: JsonRpcRequest =
//!     serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).unwrap();
//! let resp = server.handle(req).await;
//! // resp implements Serialize — pass it to axum::Json, serde_json, etc.
//! let json = serde_json::to_string(&resp).unwrap();
//! # }
//! ```

pub mod config;
pub mod server;
pub mod spotify;
pub mod tools;
pub mod transport_http;
pub mod types;

// Re-export the most commonly used items at the crate root.
pub use server::{FnToolHandler, Server, ToolHandler};
pub use transport_http::http_router;
pub use types::{
    ContentBlock, JsonRpcRequest, JsonRpcResponse, McpError, McpResponse, RpcError, Tool,
    ToolResult, new_error_response, new_ok_response, text_result,
};
