//! # JSON-RPC Server Prelude
//!
//! Convenient re-exports of the most commonly used types.
//!
//! ```rust
//! use kite_json_rpc_server::prelude::*;
//! ```

pub use crate::dispatch::JsonRpcDispatcher;
pub use crate::error::{ErrorKind, ErrorObject, HandlerError, RpcError};
pub use crate::registry::{MethodRegistry, MethodRegistryBuilder};
pub use crate::request::{FullRequest, NoParams, PeekRequest};
pub use crate::response::{ErrorResponse, SuccessResponse};
pub use crate::route::{Handler, HandlerRoute, HandlerSession, Route, RouteSession};
pub use crate::types::JsonRpcVersion;

// Standard error codes
pub use crate::error_codes::*;
