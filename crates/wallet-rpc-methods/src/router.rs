//! JSON-RPC 2.0 request processing and method dispatch.

use crate::domain::error::{ApiError, ApiResult};
use crate::domain::fingerprint::Fingerprint;
use crate::domain::methods::{MethodKind, MethodTable};
use crate::middleware::{RequestTimer, RpcMetrics};
use crate::rpc::RpcHandlers;
use serde_json::{json, Value};
use std::sync::Arc;

/// Longest accepted string id
const MAX_ID_LEN: usize = 256;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub rpc_handlers: Arc<RpcHandlers>,
    pub methods: Arc<MethodTable>,
    pub metrics: Arc<RpcMetrics>,
}

/// Route a method call to its handler.
///
/// `origin` comes from the transport, never from the request body.
pub async fn route_method(
    state: &AppState,
    origin: &str,
    method: &str,
    params: Option<&Value>,
) -> ApiResult<Value> {
    match state.methods.resolve(method) {
        Some(MethodKind::SwitchEthereumChain) => state
            .rpc_handlers
            .switch_chain
            .switch_ethereum_chain(origin, params)
            .await
            .map(|()| Value::Null),

        Some(MethodKind::GetSystemFingerprint) => {
            let fingerprint = state.rpc_handlers.sys_info.get_system_fingerprint().await;
            if fingerprint == Fingerprint::NoSuccess {
                state.metrics.record_fingerprint_failure();
            }
            Ok(serde_json::to_value(fingerprint)?)
        }

        None => Err(ApiError::method_not_found(method)),
    }
}

/// Process a request payload: a single request object or a batch.
pub async fn process_payload(state: &AppState, origin: &str, payload: &Value) -> Value {
    match payload {
        Value::Array(requests) if requests.is_empty() => {
            error_response(None, &ApiError::invalid_request("empty batch"))
        }
        Value::Array(requests) => {
            let responses = futures::future::join_all(
                requests
                    .iter()
                    .map(|request| process_single_request(state, origin, request)),
            )
            .await;
            Value::Array(responses)
        }
        request => process_single_request(state, origin, request).await,
    }
}

/// Process a single JSON-RPC request
pub async fn process_single_request(state: &AppState, origin: &str, request: &Value) -> Value {
    let Some(object) = request.as_object() else {
        return error_response(None, &ApiError::invalid_request("expected object"));
    };

    let id = object.get("id").cloned();
    if let Err(e) = validate_id(id.as_ref()) {
        return error_response(None, &e);
    }

    let Some(method) = object.get("method").and_then(Value::as_str) else {
        return error_response(id, &ApiError::invalid_request("missing method"));
    };
    let params = object.get("params");

    let kind = state.methods.resolve(method);
    let timer = RequestTimer::new(Arc::clone(&state.metrics), kind);
    let result = route_method(state, origin, method, params).await;
    timer.finish(result.is_ok());

    match result {
        Ok(value) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": value
        }),
        Err(e) => error_response(id, &e),
    }
}

/// Request ids must be a non-empty string of bounded length, or a number.
/// Null ids (notifications) are not supported.
fn validate_id(id: Option<&Value>) -> ApiResult<()> {
    match id {
        None | Some(Value::Number(_)) => Ok(()),
        Some(Value::Null) => Err(ApiError::invalid_request(
            "null id (notifications not supported)",
        )),
        Some(Value::String(s)) if s.is_empty() => {
            Err(ApiError::invalid_request("empty string id"))
        }
        Some(Value::String(s)) if s.len() > MAX_ID_LEN => Err(ApiError::invalid_request(format!(
            "id string too long (max {} chars)",
            MAX_ID_LEN
        ))),
        Some(Value::String(_)) => Ok(()),
        Some(_) => Err(ApiError::invalid_request("id must be string or number")),
    }
}

pub fn error_response(id: Option<Value>, error: &ApiError) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": error
    })
}
