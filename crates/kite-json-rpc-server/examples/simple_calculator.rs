//! Simple Calculator JSON-RPC Example
//!
//! Registers calculator methods with typed parameters and feeds a fixed set
//! of raw requests through the dispatcher, printing each reply. The last two
//! requests fail on purpose (unknown method, mistyped parameter) and the
//! final one is a notification, which produces no reply at all.

use kite_json_rpc_server::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Operands {
    a: f64,
    b: f64,
}

struct Add;

impl Handler for Add {
    type Params = Operands;
    type Output = f64;

    fn handle(&self, params: Operands) -> Result<f64, HandlerError> {
        Ok(params.a + params.b)
    }
}

struct Subtract;

impl Handler for Subtract {
    type Params = Operands;
    type Output = f64;

    fn handle(&self, params: Operands) -> Result<f64, HandlerError> {
        Ok(params.a - params.b)
    }
}

struct Ping;

impl Handler for Ping {
    type Params = NoParams;
    type Output = &'static str;

    fn handle(&self, _params: NoParams) -> Result<&'static str, HandlerError> {
        Ok("pong")
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let registry = MethodRegistry::builder()
        .method("add", || Add)
        .method("subtract", || Subtract)
        .method("ping", || Ping)
        .alias("minus", "subtract")
        .build();
    let dispatcher = JsonRpcDispatcher::new(registry);

    let requests = [
        r#"{"jsonrpc": "2.0", "method": "add", "params": {"a": 5, "b": 3}, "id": "1"}"#,
        r#"{"jsonrpc": "2.0", "method": "minus", "params": {"a": 10, "b": 4}, "id": "2"}"#,
        r#"{"jsonrpc": "2.0", "method": "ping", "id": "3"}"#,
        r#"{"jsonrpc": "2.0", "method": "multiply", "params": {"a": 2, "b": 3}, "id": "4"}"#,
        r#"{"jsonrpc": "2.0", "method": "add", "params": {"a": "invalid", "b": 5}, "id": "5"}"#,
        r#"{"jsonrpc": "2.0", "method": "add", "params": {"a": 1, "b": 1}}"#,
    ];

    for request in requests {
        println!("--> {request}");
        match dispatcher.dispatch_str(request) {
            Ok(reply) if reply.is_empty() => println!("<-- (notification, no reply)"),
            Ok(reply) => println!("<-- {reply}"),
            Err(error) => eprintln!("dispatch failed: {error}"),
        }
    }
}
