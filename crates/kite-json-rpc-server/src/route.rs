//! Procedure binding: handlers, routes, and per-call sessions.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{HandlerError, RpcError};
use crate::request::FullRequest;
use crate::response::SuccessResponse;

/// A procedure with one input type and one output type.
///
/// Returning an [`RpcError`] (wrapped in [`HandlerError::Rpc`]) puts its
/// code, message and data on the wire verbatim; any other failure is
/// reclassified by the dispatcher as an internal error.
pub trait Handler: Send + Sync {
    type Params: DeserializeOwned;
    type Output: Serialize;

    fn handle(&self, params: Self::Params) -> Result<Self::Output, HandlerError>;
}

/// A route is a lightweight registry entry holding the minimal information
/// needed to construct a session once a call actually targets it.
pub trait Route: Send + Sync {
    fn create_session(&self) -> Box<dyn RouteSession>;
}

/// Route backed by a handler factory.
///
/// The handler instance and its type-specific parsing machinery are only
/// built when a session is created for an incoming call, so registered but
/// never-invoked methods cost nothing beyond the map entry.
pub struct HandlerRoute<F> {
    factory: F,
}

impl<F, H> HandlerRoute<F>
where
    F: Fn() -> H + Send + Sync,
    H: Handler + 'static,
{
    pub fn new(factory: F) -> Self {
        Self { factory }
    }
}

impl<F, H> Route for HandlerRoute<F>
where
    F: Fn() -> H + Send + Sync,
    H: Handler + 'static,
{
    fn create_session(&self) -> Box<dyn RouteSession> {
        Box::new(HandlerSession::new((self.factory)()))
    }
}

/// Per-call binding of a handler to its concrete parameter and output types.
///
/// Stateless across calls: a session is constructed after routing, drives
/// one request, and is dropped when the call completes.
pub struct HandlerSession<H> {
    handler: H,
}

impl<H: Handler> HandlerSession<H> {
    pub fn new(handler: H) -> Self {
        Self { handler }
    }

    /// Parses the full request shape specialized to this handler's parameter
    /// type.
    ///
    /// An absent `params` field is interpreted by deserializing JSON `null`
    /// into the parameter type: [`NoParams`](crate::request::NoParams)
    /// accepts that, anything else reports invalid parameters.
    pub fn parse_request(&self, source: &[u8]) -> Result<H::Params, RpcError> {
        let request: FullRequest<H::Params> =
            serde_json::from_slice(source).map_err(classify_request_error)?;

        match request.params {
            Some(params) => Ok(params),
            None => serde_json::from_value(Value::Null).map_err(|error| {
                RpcError::invalid_params("Invalid parameters were provided").with_source(error)
            }),
        }
    }

    /// Invokes the procedure; failures pass through unchanged for the
    /// dispatcher to classify.
    pub fn invoke(&self, params: H::Params) -> Result<H::Output, HandlerError> {
        self.handler.handle(params)
    }

    /// Builds a success response echoing the request id.
    pub fn create_response(
        &self,
        id: Option<String>,
        result: H::Output,
    ) -> SuccessResponse<H::Output> {
        SuccessResponse::new(id, result)
    }

    /// Serializes a success response specialized to this handler's output
    /// type.
    pub fn serialize_response(
        &self,
        response: &SuccessResponse<H::Output>,
    ) -> Result<String, RpcError> {
        serde_json::to_string(response)
            .map_err(|error| RpcError::internal("An exception has occurred").with_source(error))
    }
}

/// Object-safe session surface the dispatcher drives.
///
/// Composes the typed session operations: parse the full copy, invoke, and
/// build the reply body. Returns `Ok(None)` when `id` is absent; a response
/// body is never even constructed for a notification.
pub trait RouteSession: Send {
    fn execute(&self, source: &[u8], id: Option<&str>) -> Result<Option<String>, HandlerError>;
}

impl<H: Handler> RouteSession for HandlerSession<H> {
    fn execute(&self, source: &[u8], id: Option<&str>) -> Result<Option<String>, HandlerError> {
        let params = self.parse_request(source)?;
        let result = self.invoke(params)?;

        match id {
            Some(id) => {
                let response = self.create_response(Some(id.to_owned()), result);
                Ok(Some(self.serialize_response(&response)?))
            }
            None => Ok(None),
        }
    }
}

/// Maps full-parse failures onto the error taxonomy: malformed JSON is a
/// parse error even at this stage (the full copy is parsed independently of
/// the peek copy), while shape and validation failures are invalid
/// parameters. The serde detail stays off the wire as a chained source.
fn classify_request_error(error: serde_json::Error) -> RpcError {
    use serde_json::error::Category;

    match error.classify() {
        Category::Syntax | Category::Eof => {
            RpcError::parse("Invalid JSON was provided").with_source(error)
        }
        Category::Data => {
            RpcError::invalid_params("Invalid parameters were provided").with_source(error)
        }
        Category::Io => RpcError::internal("An exception has occurred").with_source(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::request::NoParams;
    use serde::Deserialize;

    struct StringToInt;

    impl Handler for StringToInt {
        type Params = String;
        type Output = i64;

        fn handle(&self, params: String) -> Result<i64, HandlerError> {
            params
                .trim()
                .parse()
                .map_err(|error: std::num::ParseIntError| HandlerError::Other(error.into()))
        }
    }

    #[derive(Debug, Deserialize)]
    struct BazParams {
        baz: String,
    }

    struct NeedsBaz;

    impl Handler for NeedsBaz {
        type Params = BazParams;
        type Output = bool;

        fn handle(&self, params: BazParams) -> Result<bool, HandlerError> {
            Ok(!params.baz.is_empty())
        }
    }

    struct IgnoresInput;

    impl Handler for IgnoresInput {
        type Params = NoParams;
        type Output = &'static str;

        fn handle(&self, _params: NoParams) -> Result<&'static str, HandlerError> {
            Ok("ran")
        }
    }

    #[test]
    fn test_session_parses_typed_params() {
        let session = HandlerSession::new(StringToInt);
        let params = session
            .parse_request(br#"{"jsonrpc":"2.0","id":"foo","method":"bar","params":"100"}"#)
            .unwrap();
        assert_eq!(params, "100");
    }

    #[test]
    fn test_session_reports_missing_params_for_typed_handler() {
        let session = HandlerSession::new(NeedsBaz);
        let error = session
            .parse_request(br#"{"jsonrpc":"2.0","id":"foo","method":"bar"}"#)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidParams);
        assert_eq!(error.message(), "Invalid parameters were provided");
    }

    #[test]
    fn test_session_reports_mismatched_params_for_typed_handler() {
        let session = HandlerSession::new(NeedsBaz);
        let error = session
            .parse_request(br#"{"jsonrpc":"2.0","id":"foo","method":"bar","params":{"nope":1}}"#)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidParams);
    }

    #[test]
    fn test_session_reports_malformed_json_as_parse_error() {
        let session = HandlerSession::new(StringToInt);
        let error = session
            .parse_request(br#"{"jsonrpc":"2.0""#)
            .unwrap_err();
        assert_eq!(error.kind(), ErrorKind::ParseError);
    }

    #[test]
    fn test_unit_session_tolerates_any_params() {
        let session = HandlerSession::new(IgnoresInput);

        for body in [
            r#"{"jsonrpc":"2.0","id":"foo","method":"bar"}"#,
            r#"{"jsonrpc":"2.0","id":"foo","method":"bar","params":null}"#,
            r#"{"jsonrpc":"2.0","id":"foo","method":"bar","params":12}"#,
            r#"{"jsonrpc":"2.0","id":"foo","method":"bar","params":{"a":1}}"#,
            r#"{"jsonrpc":"2.0","id":"foo","method":"bar","params":[1,2]}"#,
        ] {
            let params = session.parse_request(body.as_bytes()).unwrap();
            assert_eq!(params, NoParams);
        }
    }

    #[test]
    fn test_session_builds_and_serializes_the_response() {
        let session = HandlerSession::new(StringToInt);
        let response = session.create_response(Some("foo".to_string()), 100);
        let body = session.serialize_response(&response).unwrap();
        assert_eq!(body, r#"{"id":"foo","result":100,"jsonrpc":"2.0"}"#);
    }

    #[test]
    fn test_execute_suppresses_the_body_for_notifications() {
        let session = HandlerSession::new(StringToInt);
        let body = session
            .execute(
                br#"{"jsonrpc":"2.0","method":"bar","params":"100"}"#,
                None,
            )
            .unwrap();
        assert!(body.is_none());
    }

    #[test]
    fn test_route_builds_sessions_lazily() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static BUILT: AtomicUsize = AtomicUsize::new(0);

        let route = HandlerRoute::new(|| {
            BUILT.fetch_add(1, Ordering::SeqCst);
            StringToInt
        });
        assert_eq!(BUILT.load(Ordering::SeqCst), 0);

        let _session = route.create_session();
        let _session = route.create_session();
        assert_eq!(BUILT.load(Ordering::SeqCst), 2);
    }
}
