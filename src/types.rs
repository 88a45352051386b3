use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC 2.0 error codes used by the dispatcher.
pub const ERR_CODE_NO_METHOD: i32 = -32601;
pub const ERR_CODE_BAD_PARAMS: i32 = -32602;
pub const ERR_CODE_INTERNAL: i32 = -32603;
/// Server-defined code for a `tools/call` naming an unregistered tool.
pub const ERR_CODE_TOOL_NOT_FOUND: i32 = -32003;

// ── Request ──

/// Inbound JSON-RPC 2.0 request.
///
/// `id` and `params` are left as raw [`Value`]s: the id is only ever echoed
/// back, and params are not interpreted until the method is known.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

// ── Response ──

/// Response from [`Server::handle()`](crate::Server::handle).
///
/// Carries the echoed request id and exactly one of a result value or an
/// error object — the enum makes a both-or-neither response unrepresentable.
///
/// Implements [`Serialize`] so it can be passed directly to an HTTP
/// framework (e.g. `axum::Json(&resp)`). For structured inspection in tests,
/// call [`into_json_rpc()`](McpResponse::into_json_rpc).
#[derive(Debug)]
pub struct McpResponse {
    id: Option<Value>,
    kind: ResponseKind,
}

#[derive(Debug)]
enum ResponseKind {
    Result(Value),
    Error(RpcError),
}

impl McpResponse {
    /// The echoed correlation id.
    pub fn id(&self) -> Option<&Value> {
        self.id.as_ref()
    }

    /// The result value, if this is a success response.
    pub fn result(&self) -> Option<&Value> {
        match &self.kind {
            ResponseKind::Result(v) => Some(v),
            ResponseKind::Error(_) => None,
        }
    }

    /// The error object, if this is an error response.
    pub fn rpc_error(&self) -> Option<&RpcError> {
        match &self.kind {
            ResponseKind::Result(_) => None,
            ResponseKind::Error(e) => Some(e),
        }
    }

    /// Convert to a [`JsonRpcResponse`] for structured inspection.
    pub fn into_json_rpc(self) -> JsonRpcResponse {
        match self.kind {
            ResponseKind::Result(value) => JsonRpcResponse {
                jsonrpc: "2.0".into(),
                id: self.id,
                result: Some(value),
                error: None,
            },
            ResponseKind::Error(err) => JsonRpcResponse {
                jsonrpc: "2.0".into(),
                id: self.id,
                result: None,
                error: Some(err),
            },
        }
    }
}

impl Serialize for McpResponse {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = 2 + self.id.is_some() as usize;
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("jsonrpc", "2.0")?;

        if let Some(ref id) = self.id {
            map.serialize_entry("id", id)?;
        }

        match &self.kind {
            ResponseKind::Result(value) => map.serialize_entry("result", value)?,
            ResponseKind::Error(err) => map.serialize_entry("error", err)?,
        }

        map.end()
    }
}

/// Structured JSON-RPC 2.0 response, deserializable for test inspection of
/// wire output. Production code serializes [`McpResponse`] directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// Build a success response.
pub fn new_ok_response(id: Option<Value>, result: Value) -> McpResponse {
    McpResponse {
        id,
        kind: ResponseKind::Result(result),
    }
}

/// Build an error response.
pub fn new_error_response(id: Option<Value>, code: i32, message: impl Into<String>) -> McpResponse {
    McpResponse {
        id,
        kind: ResponseKind::Error(RpcError {
            code,
            message: message.into(),
            data: None,
        }),
    }
}

// ── MCP domain types ──

/// Serializable tool descriptor: what `tools/list` shows to clients.
///
/// The execution function is held separately by the registry, so a handler
/// can never leak into serialized output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

/// Tool call result wrapper: a list of content blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub content: Vec<ContentBlock>,
}

/// Single content block in a tool result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: String,
}

/// Wrap a rendered string as a text tool result.
pub fn text_result(text: impl Into<String>) -> ToolResult {
    ToolResult {
        content: vec![ContentBlock {
            block_type: "text".into(),
            text: text.into(),
        }],
    }
}

/// Error type returned by tool execution functions.
///
/// The dispatcher does not distinguish argument-decode failures from
/// downstream catalog failures — both surface as internal errors carrying
/// the underlying description.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Catalog(#[from] crate::spotify::Error),
    #[error("{0}")]
    Other(String),
}

// Internal params struct for tools/call deserialization. `name` defaults to
// the empty string: an absent name is a registry miss, not a parse error.
#[derive(Debug, Deserialize)]
pub(crate) struct ToolCallParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_response_has_result_only() {
        let resp = new_ok_response(Some(json!(1)), json!({"x": 1}));
        let wire = serde_json::to_value(&resp).unwrap();
        assert_eq!(wire["jsonrpc"], "2.0");
        assert_eq!(wire["id"], 1);
        assert_eq!(wire["result"]["x"], 1);
        assert!(wire.get("error").is_none());
    }

    #[test]
    fn test_error_response_has_error_only() {
        let resp = new_error_response(Some(json!("abc")), ERR_CODE_INTERNAL, "boom");
        let wire = serde_json::to_value(&resp).unwrap();
        assert_eq!(wire["id"], "abc");
        assert_eq!(wire["error"]["code"], ERR_CODE_INTERNAL);
        assert_eq!(wire["error"]["message"], "boom");
        assert!(wire.get("result").is_none());
    }

    #[test]
    fn test_absent_id_is_omitted() {
        let resp = new_ok_response(None, json!({}));
        let wire = serde_json::to_value(&resp).unwrap();
        assert!(wire.get("id").is_none());
    }

    #[test]
    fn test_tool_serializes_camel_case_schema() {
        let tool = Tool {
            name: "search_tracks".into(),
            description: "search".into(),
            input_schema: json!({"type": "object"}),
        };
        let wire = serde_json::to_value(&tool).unwrap();
        assert_eq!(wire["inputSchema"]["type"], "object");
        assert!(wire.get("input_schema").is_none());
    }

    #[test]
    fn test_text_result_shape() {
        let wire = serde_json::to_value(text_result("hello")).unwrap();
        assert_eq!(wire["content"][0]["type"], "text");
        assert_eq!(wire["content"][0]["text"], "hello");
    }

    #[test]
    fn test_tool_call_params_name_defaults_empty() {
        let params: ToolCallParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.name, "");
        assert!(params.arguments.is_null());
    }

    #[test]
    fn test_request_id_shapes_deserialize() {
        for raw in [
            r#"{"jsonrpc":"2.0","method":"tools/list"}"#,
            r#"{"jsonrpc":"2.0","id":7,"method":"tools/list"}"#,
            r#"{"jsonrpc":"2.0","id":"req-1","method":"tools/list"}"#,
        ] {
            let req: JsonRpcRequest = serde_json::from_str(raw).unwrap();
            assert_eq!(req.method, "tools/list");
        }
    }
}
