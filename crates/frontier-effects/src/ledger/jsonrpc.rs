//! JSON-RPC 2.0 envelopes used by the ledger handler.

use frontier_core::effects::LedgerError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outgoing request envelope
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// Incoming response envelope
#[derive(Debug, Deserialize)]
pub struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

/// JSON-RPC error object
#[derive(Debug, Clone, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// `{"context": {...}, "value": ...}` wrapper used by slot-aware methods
#[derive(Debug, Deserialize)]
pub struct WithContext<T> {
    pub value: T,
}

/// Entry of a `getSignatureStatuses` response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStatus {
    #[serde(default)]
    pub confirmation_status: Option<String>,
    #[serde(default)]
    pub err: Option<Value>,
}

impl<T> RpcResponse<T> {
    /// Unwrap the result, mapping a JSON-RPC error object or a missing
    /// result into a [`LedgerError`].
    pub fn into_result(self, endpoint: &str) -> Result<T, LedgerError> {
        if let Some(error) = self.error {
            return Err(LedgerError::Rpc {
                endpoint: endpoint.to_string(),
                code: error.code,
                message: error.message,
            });
        }
        self.result.ok_or_else(|| LedgerError::InvalidResponse {
            endpoint: endpoint.to_string(),
            reason: "response has neither result nor error".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn request_serializes_as_jsonrpc_2() {
        let request = RpcRequest::new(7, "getBalance", json!(["addr"]));
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "id": 7, "method": "getBalance", "params": ["addr"]})
        );
    }

    #[test]
    fn error_object_becomes_rpc_error() {
        let response: RpcResponse<u64> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": 429, "message": "airdrop limit reached"}
        }))
        .unwrap();

        assert_matches!(
            response.into_result("https://rpc.test"),
            Err(LedgerError::Rpc { code: 429, .. })
        );
    }

    #[test]
    fn context_value_unwraps() {
        let response: RpcResponse<WithContext<u64>> = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {"context": {"slot": 9}, "value": 1500}
        }))
        .unwrap();

        assert_eq!(response.into_result("x").unwrap().value, 1500);
    }

    #[test]
    fn missing_result_is_invalid() {
        let response: RpcResponse<u64> =
            serde_json::from_value(json!({"jsonrpc": "2.0", "id": 1})).unwrap();
        assert_matches!(
            response.into_result("x"),
            Err(LedgerError::InvalidResponse { .. })
        );
    }
}
