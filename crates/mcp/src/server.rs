use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

use discordbot_core::Dispatcher;

use crate::tools::{call_tool, list_tools};
use crate::transport::{
    JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND,
    PARSE_ERROR,
};

const SERVER_NAME: &str = "discordbot-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Stateless apart from the handshake flag, so one instance can serve
/// concurrent requests.
pub struct McpServer {
    initialized: AtomicBool,
    dispatcher: Dispatcher,
}

impl McpServer {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            initialized: AtomicBool::new(false),
            dispatcher,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Relaxed)
    }

    pub async fn handle_request(&self, input: &str) -> Option<String> {
        let request: JsonRpcRequest = match serde_json::from_str(input) {
            Ok(r) => r,
            Err(_) => {
                let resp = JsonRpcResponse::error(None, PARSE_ERROR, "Parse error");
                return serde_json::to_string(&resp).ok();
            }
        };

        if !request.jsonrpc.is_empty() && request.jsonrpc != "2.0" {
            let resp = JsonRpcResponse::error(
                request.response_id(),
                INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            );
            return serde_json::to_string(&resp).ok();
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(&request),
            "initialized" | "notifications/initialized" => {
                self.initialized.store(true, Ordering::Relaxed);
                return None;
            }
            _ if request.is_notification() => return None,
            "tools/list" => self.handle_tools_list(&request),
            "tools/call" => self.handle_tools_call(&request).await,
            "ping" => JsonRpcResponse::success(request.response_id(), json!({})),
            _ => JsonRpcResponse::error(
                request.response_id(),
                METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        serde_json::to_string(&response).ok()
    }

    fn handle_initialize(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        info!(protocol = PROTOCOL_VERSION, "client initializing");
        JsonRpcResponse::success(
            request.response_id(),
            json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {}
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION
                }
            }),
        )
    }

    fn handle_tools_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let tools = list_tools();
        JsonRpcResponse::success(request.response_id(), json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let params = match &request.params {
            Some(p) => p,
            None => {
                return JsonRpcResponse::error(request.response_id(), INVALID_PARAMS, "Missing params")
            }
        };

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        debug!(tool = name, "tool call");
        match call_tool(&self.dispatcher, name, arguments).await {
            Ok(result) => JsonRpcResponse::success(request.response_id(), result),
            Err(e) => JsonRpcResponse::error(request.response_id(), INVALID_PARAMS, e),
        }
    }
}
