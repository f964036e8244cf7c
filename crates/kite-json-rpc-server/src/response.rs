use serde::{Deserialize, Serialize};

use crate::error::ErrorObject;
use crate::types::JsonRpcVersion;

/// A successful reply, specialized to a method's output type.
///
/// Field order is part of the wire contract: `id`, `result`, `jsonrpc`. The
/// `id` field is omitted entirely when none was determined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse<O> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub result: O,
    pub jsonrpc: JsonRpcVersion,
}

impl<O> SuccessResponse<O> {
    pub fn new(id: Option<String>, result: O) -> Self {
        Self {
            id,
            result,
            jsonrpc: JsonRpcVersion,
        }
    }
}

/// An error reply; `error` carries the wire code/message/data triple.
///
/// Same id-omission rule as [`SuccessResponse`]: a reply to a request whose
/// id could not be determined carries no `id` field at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub error: ErrorObject,
    pub jsonrpc: JsonRpcVersion,
}

impl ErrorResponse {
    pub fn new(id: Option<String>, error: ErrorObject) -> Self {
        Self {
            id,
            error,
            jsonrpc: JsonRpcVersion,
        }
    }
}
