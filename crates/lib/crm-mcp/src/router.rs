//! JSON-RPC front door.
//!
//! The router is the error boundary for a request: every failure below it
//! becomes a JSON-RPC error object and nothing propagates to the transport.

use crm_core::client::CrmApi;
use rmcp::ErrorData;
use rmcp::model::{
    CallToolResult,
    Content,
    ErrorCode,
    Implementation,
    InitializeResult,
    ListToolsResult,
    ServerCapabilities,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::helpers::rpc_err;
use crate::{CrmMcp, PROTOCOL_VERSION, SERVER_NAME, catalog};

const JSONRPC_VERSION: &str = "2.0";

/// A JSON-RPC response envelope. Exactly one of `result` and `error` is set.
#[derive(Debug, Clone, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorData>,
}

impl RpcResponse {
    #[must_use]
    pub const fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    #[must_use]
    pub const fn failure(id: Value, error: ErrorData) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(error),
        }
    }

    #[must_use]
    pub fn error_code(&self) -> Option<i32> {
        self.error.as_ref().map(|error| error.code.0)
    }
}

/// Notifications carry a method and no id; they never get a response.
#[must_use]
pub fn is_notification(message: &Value) -> bool {
    message
        .as_object()
        .is_some_and(|envelope| envelope.contains_key("method") && !envelope.contains_key("id"))
}

fn parse_failure(err: &serde_json::Error) -> RpcResponse {
    RpcResponse::failure(
        Value::Null,
        rpc_err(ErrorCode::PARSE_ERROR, format!("parse error: {err}")),
    )
}

impl<A: CrmApi> CrmMcp<A> {
    /// Handles a raw HTTP request body. Always yields a response.
    pub async fn handle_body(&self, body: &[u8]) -> RpcResponse {
        match serde_json::from_slice::<Value>(body) {
            Ok(message) => self.handle_message(message).await,
            Err(err) => parse_failure(&err),
        }
    }

    /// Handles one stdio line. Notifications yield `None`.
    pub async fn handle_line(&self, line: &str) -> Option<RpcResponse> {
        let message = match serde_json::from_str::<Value>(line) {
            Ok(message) => message,
            Err(err) => return Some(parse_failure(&err)),
        };
        if is_notification(&message) {
            debug!("ignoring notification");
            return None;
        }
        Some(self.handle_message(message).await)
    }

    /// Routes one decoded envelope.
    pub async fn handle_message(&self, message: Value) -> RpcResponse {
        let Value::Object(mut envelope) = message else {
            return RpcResponse::failure(
                Value::Null,
                rpc_err(ErrorCode::INVALID_REQUEST, "request must be a JSON object"),
            );
        };
        let id = envelope.remove("id").unwrap_or(Value::Null);
        let Some(Value::String(method)) = envelope.remove("method") else {
            return RpcResponse::failure(
                id,
                rpc_err(ErrorCode::INVALID_REQUEST, "request is missing a method"),
            );
        };
        let params = envelope.remove("params").unwrap_or(Value::Null);
        debug!(%method, "rpc request");

        match self.route(&method, params).await {
            Ok(result) => RpcResponse::success(id, result),
            Err(error) => RpcResponse::failure(id, error),
        }
    }

    async fn route(&self, method: &str, params: Value) -> Result<Value, ErrorData> {
        match method {
            "initialize" => to_result(&self.initialize_result()),
            "tools/list" => to_result(&ListToolsResult::with_all_items(catalog().to_vec())),
            "tools/call" => self.tools_call(params).await,
            other => Err(rpc_err(
                ErrorCode::METHOD_NOT_FOUND,
                format!("method not found: {other}"),
            )),
        }
    }

    fn initialize_result(&self) -> InitializeResult {
        InitializeResult {
            protocol_version: PROTOCOL_VERSION,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::default()
            },
            instructions: Some(self.instructions().to_string()),
        }
    }

    async fn tools_call(&self, params: Value) -> Result<Value, ErrorData> {
        let mut params = match params {
            Value::Object(params) => params,
            _ => Map::new(),
        };
        let Some(Value::String(name)) = params.remove("name") else {
            return Err(rpc_err(
                ErrorCode::INVALID_PARAMS,
                "tools/call requires params.name",
            ));
        };
        let arguments = match params.remove("arguments") {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(arguments) => arguments,
        };

        let result = self.call_tool(&name, arguments).await.map_err(|err| {
            error!(tool = %name, error = %err, "tool call failed");
            rpc_err(ErrorCode::INTERNAL_ERROR, err.to_string())
        })?;
        let text = serde_json::to_string_pretty(&result)
            .map_err(|err| rpc_err(ErrorCode::INTERNAL_ERROR, err.to_string()))?;
        to_result(&CallToolResult::success(vec![Content::text(text)]))
    }
}

fn to_result<T: Serialize>(result: &T) -> Result<Value, ErrorData> {
    serde_json::to_value(result).map_err(|err| rpc_err(ErrorCode::INTERNAL_ERROR, err.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn notifications_are_detected() {
        assert!(is_notification(&json!({ "jsonrpc": "2.0", "method": "notifications/initialized" })));
        assert!(!is_notification(&json!({ "jsonrpc": "2.0", "method": "tools/list", "id": 1 })));
        assert!(!is_notification(&json!([1, 2, 3])));
    }

    #[test]
    fn responses_serialize_one_outcome() {
        let ok = serde_json::to_value(RpcResponse::success(json!(7), json!({}))).expect("ok");
        assert_eq!(ok, json!({ "jsonrpc": "2.0", "id": 7, "result": {} }));

        let failure = RpcResponse::failure(
            json!("a"),
            rpc_err(ErrorCode::METHOD_NOT_FOUND, "method not found: x"),
        );
        assert_eq!(failure.error_code(), Some(-32601));
        let value = serde_json::to_value(failure).expect("failure");
        assert_eq!(value["error"]["code"], json!(-32601));
        assert!(value.get("result").is_none());
    }
}
