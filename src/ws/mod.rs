//! WebSocket layer — request/response envelopes, method names, config.
//!
//! The actual WS transport lives in `native.rs` (`ws-native` feature,
//! `tokio-tungstenite`). This module defines the wire envelopes shared by the
//! transport and the high-level client.
//!
//! There is no request id on the wire: a reply is matched to a request purely
//! by ordering, one request in flight per connection.

#[cfg(feature = "ws-native")]
pub mod native;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SdkError;
use crate::shared::serde_util::present;

// ─── Methods ─────────────────────────────────────────────────────────────────

/// Registry RPC methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GetDidByAddress,
    GetDidDoc,
    LookupOwner,
    CreateChangeOwnerHash,
    ChangeOwnerSigned,
    CreateSetAttributeHash,
    SetAttributeSigned,
}

impl Method {
    pub const ALL: [Method; 7] = [
        Method::GetDidByAddress,
        Method::GetDidDoc,
        Method::LookupOwner,
        Method::CreateChangeOwnerHash,
        Method::ChangeOwnerSigned,
        Method::CreateSetAttributeHash,
        Method::SetAttributeSigned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetDidByAddress => "getDidByAddress",
            Self::GetDidDoc => "getDidDoc",
            Self::LookupOwner => "lookupOwner",
            Self::CreateChangeOwnerHash => "createChangeOwnerHash",
            Self::ChangeOwnerSigned => "changeOwnerSigned",
            Self::CreateSetAttributeHash => "createSetAttributeHash",
            Self::SetAttributeSigned => "setAttributeSigned",
        }
    }
}

impl AsRef<str> for Method {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| SdkError::Protocol(format!("unknown method: {}", s)))
    }
}

// ─── Outbound ────────────────────────────────────────────────────────────────

/// Request envelope: `{"method": <string>, "args": <object>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    pub args: Value,
}

impl RpcRequest {
    /// Build an envelope. `args` must serialize to a JSON object.
    pub fn new(method: impl AsRef<str>, args: impl Serialize) -> Result<Self, SdkError> {
        let method = method.as_ref().to_string();
        let args = serde_json::to_value(args)?;
        if !args.is_object() {
            return Err(SdkError::Protocol(format!(
                "args for `{}` must be a JSON object",
                method
            )));
        }
        Ok(Self { method, args })
    }
}

// ─── Inbound ─────────────────────────────────────────────────────────────────

/// Response envelope.
///
/// Success: `{"success": true, "result": …}`.
/// Failure: `{"success": false, "error": "…"}`.
///
/// `result` distinguishes "absent" (`None`) from an explicit `null`
/// (`Some(Value::Null)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl RpcResponse {
    /// Unwrap `result`, surfacing service-reported failures.
    pub fn into_result(self) -> Result<Value, SdkError> {
        if self.success == Some(false) || (self.result.is_none() && self.error.is_some()) {
            let message = match self.error {
                Some(Value::String(s)) => s,
                Some(other) => other.to_string(),
                None => "request failed without an error message".to_string(),
            };
            return Err(SdkError::Service(message));
        }

        self.result
            .ok_or_else(|| SdkError::Protocol("response envelope has no `result`".to_string()))
    }
}

// ─── Connection state ────────────────────────────────────────────────────────

/// Client connection state. `disconnect` always returns to `Unconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Unconnected,
    Connected,
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Configuration for the WS connection.
#[derive(Debug, Clone)]
pub struct WsConfig {
    pub url: String,
    pub connect_timeout_ms: u64,
    /// Upper bound on one request/response exchange. `None` waits forever.
    pub request_timeout_ms: Option<u64>,
}

impl WsConfig {
    pub fn connect_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Option<std::time::Duration> {
        self.request_timeout_ms.map(std::time::Duration::from_millis)
    }
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            url: crate::network::default_endpoint_url(),
            connect_timeout_ms: 30_000,
            request_timeout_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_method_names_round_trip() {
        for method in Method::ALL {
            let parsed: Method = method.as_str().parse().unwrap();
            assert_eq!(parsed, method);
        }
        assert!("dropDatabase".parse::<Method>().is_err());
    }

    #[test]
    fn test_request_envelope_shape() {
        let req = RpcRequest::new(Method::GetDidDoc, json!({ "did": "did:ethr:0xabc" })).unwrap();
        let text = serde_json::to_string(&req).unwrap();
        assert_eq!(text, r#"{"method":"getDidDoc","args":{"did":"did:ethr:0xabc"}}"#);
    }

    #[test]
    fn test_request_rejects_non_object_args() {
        let err = RpcRequest::new("getDidDoc", vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, SdkError::Protocol(_)));
    }

    #[test]
    fn test_response_success() {
        let resp: RpcResponse =
            serde_json::from_str(r#"{"success":true,"result":"did:ethr:0xabc"}"#).unwrap();
        assert_eq!(resp.into_result().unwrap(), json!("did:ethr:0xabc"));
    }

    #[test]
    fn test_response_bare_result() {
        let resp: RpcResponse = serde_json::from_str(r#"{"result":42}"#).unwrap();
        assert_eq!(resp.into_result().unwrap(), json!(42));
    }

    #[test]
    fn test_response_explicit_null_result() {
        let resp: RpcResponse = serde_json::from_str(r#"{"result":null}"#).unwrap();
        assert_eq!(resp.result, Some(Value::Null));
        assert_eq!(resp.into_result().unwrap(), Value::Null);
    }

    #[test]
    fn test_response_missing_result_is_protocol_error() {
        let resp: RpcResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(resp.into_result(), Err(SdkError::Protocol(_))));
    }

    #[test]
    fn test_response_service_error() {
        let resp: RpcResponse =
            serde_json::from_str(r#"{"success":false,"error":"bad signature"}"#).unwrap();
        match resp.into_result() {
            Err(SdkError::Service(msg)) => assert_eq!(msg, "bad signature"),
            other => panic!("expected Service error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_default() {
        let config = WsConfig::default();
        assert_eq!(config.url, "ws://localhost:8080");
        assert_eq!(config.connect_timeout_ms, 30_000);
        assert!(config.request_timeout().is_none());
    }
}
