//! Minimal portico demo — JSON endpoints driven by hand-built gateway events.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example echo
//!
//! No listener, no port: events go in as JSON, replies come out as JSON —
//! exactly what happens inside a Lambda invocation.

use http::Method;
use portico::{Gateway, GatewayEvent, Request, Response, Router, health};
use serde_json::json;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .on(Method::GET,  "/users/{id}", get_user)
        .on(Method::POST, "/echo",       echo)
        .on(Method::GET,  "/healthz",    health::liveness);

    let gateway = Gateway::new(app);

    // An API-Gateway-shaped event: identity record carries the client IP.
    let event: GatewayEvent = serde_json::from_value(json!({
        "httpMethod": "GET",
        "path": "/users/42",
        "headers": {"Accept": "application/json"},
        "requestContext": {"identity": {"sourceIp": "203.0.113.5"}}
    }))
    .expect("well-formed event");
    let reply = gateway.handle(event).await;
    println!("GET /users/42 -> {} {}", reply.status_code, reply.body);

    // An ALB-shaped event: client facts travel in the forwarding chain,
    // and the body arrives base64-encoded.
    let event: GatewayEvent = serde_json::from_value(json!({
        "httpMethod": "POST",
        "path": "/echo",
        "headers": {
            "x-forwarded-for": "203.0.113.9 10.0.3.25",
            "x-forwarded-proto": "https",
            "content-type": "text/plain"
        },
        "body": "aGVsbG8=",
        "isBase64Encoded": true,
        "requestContext": {"elb": {"targetGroupArn": "arn:aws:elasticloadbalancing:us-east-1:123456789012:targetgroup/demo/abc"}}
    }))
    .expect("well-formed event");
    let reply = gateway.handle(event).await;
    println!("POST /echo    -> {} {}", reply.status_code, reply.body);
}

// GET /users/{id}
async fn get_user(req: Request) -> Response {
    let id = req.param("id").unwrap_or("unknown");
    Response::json(format!(r#"{{"id":"{id}","name":"alice"}}"#).into_bytes())
}

// POST /echo — reflect what normalization produced
async fn echo(req: Request) -> Response {
    let reflection = json!({
        "body": String::from_utf8_lossy(req.body()),
        "remote": req.remote_address(),
        "ssl": req.ssl(),
        "forwarded": req.header("x-forwarded-for"),
    });
    Response::json(serde_json::to_vec(&reflection).expect("serializable reflection"))
}
