use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::JSONRPC_VERSION;

/// Marker for the `jsonrpc` protocol version field.
///
/// Serializes as the literal `"2.0"`. On input, any JSON string is accepted
/// and its value discarded; a non-string value fails the request shape. The
/// version value itself is deliberately not compared against `"2.0"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonRpcVersion;

impl Serialize for JsonRpcVersion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(JSONRPC_VERSION)
    }
}

impl<'de> Deserialize<'de> for JsonRpcVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct VersionVisitor;

        impl Visitor<'_> for VersionVisitor {
            type Value = JsonRpcVersion;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a JSON-RPC version string")
            }

            fn visit_str<E>(self, _value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(JsonRpcVersion)
            }
        }

        deserializer.deserialize_str(VersionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_serializes_as_2_0() {
        let json = serde_json::to_string(&JsonRpcVersion).unwrap();
        assert_eq!(json, "\"2.0\"");
    }

    #[test]
    fn test_version_accepts_any_string() {
        let parsed: JsonRpcVersion = serde_json::from_str("\"2.0\"").unwrap();
        assert_eq!(parsed, JsonRpcVersion);

        let parsed: JsonRpcVersion = serde_json::from_str("\"1.0\"").unwrap();
        assert_eq!(parsed, JsonRpcVersion);
    }

    #[test]
    fn test_version_rejects_non_strings() {
        assert!(serde_json::from_str::<JsonRpcVersion>("2.0").is_err());
        assert!(serde_json::from_str::<JsonRpcVersion>("null").is_err());
    }
}
