//! The dispatch pipeline: tee, peek, route, parse, invoke, reply.

use std::io::{self, Read, Write};

use tracing::{debug, error};

use crate::error::{HandlerError, RpcError};
use crate::registry::MethodRegistry;
use crate::request::PeekRequest;
use crate::response::ErrorResponse;
use crate::stream::tee;

/// Dispatches a single JSON-RPC 2.0 request per call (no batch support).
///
/// Example with `id`:
///
/// Input:
/// ```json
/// {"jsonrpc": "2.0", "id": "my-example", "method": "foo", "params": {"bar": "sample"}}
/// ```
///
/// Output:
/// ```json
/// {"id":"my-example","result":true,"jsonrpc":"2.0"}
/// ```
///
/// Example without `id` (a notification): same input minus `id`, and the
/// output is empty regardless of whether the call succeeded.
pub struct JsonRpcDispatcher {
    registry: MethodRegistry,
}

impl JsonRpcDispatcher {
    /// Creates a dispatcher serving a frozen registry.
    pub fn new(registry: MethodRegistry) -> Self {
        Self { registry }
    }

    /// Handles one message read from `source`, writing the reply (if any) to
    /// `sink`.
    ///
    /// Wire-level failures become JSON-RPC error responses on `sink`; IO
    /// failures on either stream surface as `Err` to the caller and produce
    /// no response bytes. Nothing is ever written for a notification.
    pub fn dispatch<R: Read, W: Write>(&self, source: R, sink: &mut W) -> io::Result<()> {
        let (peek_copy, full_copy) = tee(source)?;

        // Routing metadata first; the type-specific parser cannot be chosen
        // until the method name is known. A failure here answers with no id:
        // the peek parse failed before any field could be trusted.
        let peek = match parse_peek_request(&peek_copy) {
            Ok(peek) => peek,
            Err(rpc_error) => return write_error_response(sink, None, &rpc_error),
        };

        match self.run(&peek, &full_copy) {
            Ok(Some(body)) => {
                sink.write_all(body.as_bytes())?;
                sink.flush()
            }
            Ok(None) => Ok(()),
            Err(rpc_error) if peek.id.is_some() => {
                write_error_response(sink, peek.id, &rpc_error)
            }
            Err(rpc_error) => {
                debug!(
                    method = %peek.method,
                    code = rpc_error.code(),
                    "suppressed error reply to notification"
                );
                Ok(())
            }
        }
    }

    /// Routes the peeked request and drives a session for it. Routing errors
    /// take precedence over parameter errors: an unknown method never
    /// reaches parameter validation.
    fn run(&self, peek: &PeekRequest, full_copy: &[u8]) -> Result<Option<String>, RpcError> {
        let route = self.registry.resolve(&peek.method).ok_or_else(|| {
            RpcError::method_not_found(format!(
                "Route was not found for method `{}`",
                peek.method
            ))
        })?;
        debug!(method = %peek.method, notification = peek.is_notification(), "routing request");

        let session = route.create_session();
        session
            .execute(full_copy, peek.id.as_deref())
            .map_err(|failure| match failure {
                HandlerError::Rpc(rpc_error) => rpc_error,
                HandlerError::Other(cause) => {
                    error!(method = %peek.method, "handler raised an unclassified failure: {:#}", cause);
                    RpcError::internal("An exception has occurred").with_source(cause)
                }
            })
    }

    /// Reads `input` fully and returns the serialized reply; the result is
    /// empty for a notification.
    pub fn dispatch_slice(&self, input: &[u8]) -> io::Result<Vec<u8>> {
        let mut output = Vec::new();
        self.dispatch(input, &mut output)?;
        Ok(output)
    }

    /// [`Self::dispatch_slice`] with string input and output.
    pub fn dispatch_str(&self, input: &str) -> io::Result<String> {
        let output = self.dispatch_slice(input.as_bytes())?;
        String::from_utf8(output).map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))
    }
}

/// Parses the peek copy. Malformed JSON maps to a parse error; structurally
/// valid JSON that fails the peek shape maps to an invalid request.
fn parse_peek_request(source: &[u8]) -> Result<PeekRequest, RpcError> {
    use serde_json::error::Category;

    serde_json::from_slice(source).map_err(|error| match error.classify() {
        Category::Syntax | Category::Eof => {
            RpcError::parse("Invalid JSON was provided").with_source(error)
        }
        Category::Data => {
            RpcError::invalid_request("Invalid JSON-RPC request provided").with_source(error)
        }
        Category::Io => RpcError::internal("An exception has occurred").with_source(error),
    })
}

fn write_error_response<W: Write>(
    sink: &mut W,
    id: Option<String>,
    rpc_error: &RpcError,
) -> io::Result<()> {
    let response = ErrorResponse::new(id, rpc_error.to_error_object());
    let body = serde_json::to_string(&response).map_err(io::Error::other)?;
    sink.write_all(body.as_bytes())?;
    sink.flush()
}
