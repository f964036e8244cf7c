use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// JSON-RPC error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
    Custom(i64), // -32099 to -32000
}

impl ErrorKind {
    pub fn code(&self) -> i64 {
        match self {
            ErrorKind::ParseError => -32700,
            ErrorKind::InvalidRequest => -32600,
            ErrorKind::MethodNotFound => -32601,
            ErrorKind::InvalidParams => -32602,
            ErrorKind::InternalError => -32603,
            ErrorKind::Custom(code) => *code,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// JSON-RPC error object carried inside an error response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// An expected JSON-RPC failure.
///
/// Each kind maps to its protocol-fixed wire code; custom errors carry an
/// application-defined code in the reserved range. The optional `source` is
/// local diagnostic context only and never reaches the wire.
#[derive(Debug)]
pub struct RpcError {
    kind: ErrorKind,
    message: String,
    data: Option<Value>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RpcError {
    fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: None,
            source: None,
        }
    }

    /// Invalid JSON was received by the server.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseError, message)
    }

    /// The JSON sent is not a valid Request object.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// The method does not exist / is not available.
    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MethodNotFound, message)
    }

    /// Invalid method parameter(s).
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParams, message)
    }

    /// Internal JSON-RPC error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalError, message)
    }

    /// An implementation-defined server error.
    ///
    /// # Panics
    ///
    /// Panics when `code` is outside the reserved -32099 to -32000 range;
    /// constructing such an error is a caller bug and fails immediately
    /// rather than at serialization time.
    pub fn custom(code: i64, message: impl Into<String>) -> Self {
        assert!(
            (crate::error_codes::CUSTOM_ERROR_START..=crate::error_codes::CUSTOM_ERROR_END)
                .contains(&code),
            "custom error code must be between -32099 and -32000, got {code}"
        );
        Self::new(ErrorKind::Custom(code), message)
    }

    /// Attaches structured wire-visible `data`.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attaches the causing failure for local diagnostics.
    pub fn with_source(
        mut self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn code(&self) -> i64 {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Converts to the wire error object used in an error response.
    pub fn to_error_object(&self) -> ErrorObject {
        ErrorObject {
            code: self.kind.code(),
            message: self.message.clone(),
            data: self.data.clone(),
        }
    }
}

impl fmt::Display for RpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JSON-RPC error {}: {}", self.kind.code(), self.message)
    }
}

impl std::error::Error for RpcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Failure raised by a procedure across the invoke boundary.
///
/// An `Rpc` failure reaches the wire verbatim (code, message, data); anything
/// else is reclassified by the dispatcher as an internal error whose original
/// cause is kept only for local diagnostics.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Rpc(#[from] RpcError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_error_code() {
        assert_eq!(RpcError::parse("bad stuff").code(), -32700);
    }

    #[test]
    fn test_invalid_request_code() {
        assert_eq!(RpcError::invalid_request("bad stuff").code(), -32600);
    }

    #[test]
    fn test_method_not_found_code() {
        assert_eq!(RpcError::method_not_found("bad stuff").code(), -32601);
    }

    #[test]
    fn test_invalid_params_code() {
        assert_eq!(RpcError::invalid_params("bad stuff").code(), -32602);
    }

    #[test]
    fn test_internal_error_code() {
        assert_eq!(RpcError::internal("bad stuff").code(), -32603);
    }

    #[test]
    fn test_custom_codes_across_the_reserved_range() {
        for code in (-32099..=-32000).rev() {
            assert_eq!(RpcError::custom(code, "bad stuff").code(), code);
        }
    }

    #[test]
    #[should_panic]
    fn test_custom_code_above_the_range_panics() {
        let _ = RpcError::custom(-31999, "bad stuff");
    }

    #[test]
    #[should_panic]
    fn test_custom_code_below_the_range_panics() {
        let _ = RpcError::custom(-32100, "bad stuff");
    }

    #[test]
    fn test_error_object_omits_absent_data() {
        let object = RpcError::parse("Invalid JSON was provided").to_error_object();
        let json = serde_json::to_string(&object).unwrap();
        assert_eq!(
            json,
            r#"{"code":-32700,"message":"Invalid JSON was provided"}"#
        );
    }

    #[test]
    fn test_error_object_carries_data() {
        let object = RpcError::custom(-32050, "rejected")
            .with_data(json!({"reason": "quota"}))
            .to_error_object();
        let json = serde_json::to_string(&object).unwrap();
        assert_eq!(
            json,
            r#"{"code":-32050,"message":"rejected","data":{"reason":"quota"}}"#
        );
    }

    #[test]
    fn test_source_is_kept_for_diagnostics() {
        let cause = serde_json::from_str::<i64>("oops").unwrap_err();
        let error = RpcError::parse("Invalid JSON was provided").with_source(cause);
        assert!(std::error::Error::source(&error).is_some());
    }
}
