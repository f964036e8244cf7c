use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::JsonRpcVersion;

/// The minimal request shape parsed during the peek phase: just enough to
/// route a call before the target method's parameter type is known.
#[derive(Debug, Clone, Deserialize)]
pub struct PeekRequest {
    pub jsonrpc: JsonRpcVersion,
    #[serde(default)]
    pub id: Option<String>,
    pub method: String,
}

impl PeekRequest {
    /// A request without an `id` is a notification; no response may be
    /// produced for it, including on error.
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// The full request shape, specialized to a method's parameter type.
///
/// `params` stays optional here because the field may be absent on the wire;
/// the session decides what absence means for its parameter type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: Deserialize<'de>"))]
pub struct FullRequest<P> {
    pub jsonrpc: JsonRpcVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<P>,
}

/// Parameters shape for procedures that ignore their input.
///
/// Deserializes from any JSON value (scalar, object, array, `null`) and
/// discards it, so a unit-input procedure never fails on whatever `params`
/// the wire happens to carry. Serializes as JSON `null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoParams;

impl Serialize for NoParams {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_unit()
    }
}

impl<'de> Deserialize<'de> for NoParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        IgnoredAny::deserialize(deserializer)?;
        Ok(NoParams)
    }
}
