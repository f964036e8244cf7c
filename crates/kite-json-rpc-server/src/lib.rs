//! # JSON-RPC 2.0 Server Implementation
//!
//! A pure, transport-agnostic JSON-RPC 2.0 single-request server. Given one
//! raw message on a byte stream, it routes to a registered method, parses the
//! parameters into that method's concrete type, invokes the handler, and
//! writes the reply (or a protocol-compliant error) to the output stream.
//! Socket/HTTP/stdio plumbing is the caller's business.
//!
//! ## Features
//! - Typed method routing: each handler declares its parameter and output types
//! - Two-phase parsing: routing metadata is peeked before the method-specific
//!   parser is selected
//! - Full JSON-RPC 2.0 error taxonomy, including the custom code range
//! - Notification handling per the specification: requests without an `id`
//!   never produce output, even on error
//! - No batch request support, by design
//!
//! ## Example
//!
//! ```rust
//! use kite_json_rpc_server::prelude::*;
//!
//! struct Echo;
//!
//! impl Handler for Echo {
//!     type Params = String;
//!     type Output = String;
//!
//!     fn handle(&self, params: String) -> Result<String, HandlerError> {
//!         Ok(params)
//!     }
//! }
//!
//! let registry = MethodRegistry::builder().method("echo", || Echo).build();
//! let dispatcher = JsonRpcDispatcher::new(registry);
//!
//! let reply = dispatcher
//!     .dispatch_str(r#"{"jsonrpc":"2.0","id":"1","method":"echo","params":"hi"}"#)
//!     .unwrap();
//! assert_eq!(reply, r#"{"id":"1","result":"hi","jsonrpc":"2.0"}"#);
//! ```

pub mod dispatch;
pub mod error;
pub mod prelude;
pub mod registry;
pub mod request;
pub mod response;
pub mod route;
pub mod stream;
pub mod types;

// Re-export main types
pub use dispatch::JsonRpcDispatcher;
pub use error::{ErrorKind, ErrorObject, HandlerError, RpcError};
pub use registry::{MethodRegistry, MethodRegistryBuilder};
pub use request::{FullRequest, NoParams, PeekRequest};
pub use response::{ErrorResponse, SuccessResponse};
pub use route::{Handler, HandlerRoute, HandlerSession, Route, RouteSession};
pub use stream::tee;
pub use types::JsonRpcVersion;

/// JSON-RPC 2.0 version constant
pub const JSONRPC_VERSION: &str = "2.0";

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    // Custom error range: -32099 to -32000
    pub const CUSTOM_ERROR_START: i64 = -32099;
    pub const CUSTOM_ERROR_END: i64 = -32000;
}
