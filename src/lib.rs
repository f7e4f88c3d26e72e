//! # portico
//!
//! Serve an embedded HTTP app behind AWS API Gateway or an ALB target group
//! without opening a socket. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! The gateway owns the listener. By the time your code runs it has already
//! terminated TLS, enforced limits, and flattened the request into a JSON
//! event. portico does not re-litigate any of that — it translates the event
//! into a canonical in-process request, dispatches it through an embedded
//! router, and translates the handler's response back into the shape the
//! gateway expects.
//!
//! What the gateway already owns — portico intentionally ignores:
//!
//! - **TLS termination** — done at the edge; portico only reports whether it happened
//! - **Rate limiting / throttling** — gateway usage plans and ALB rules
//! - **Body-size limits** — enforced before the event is ever delivered
//! - **Timeouts** — the invoking runtime kills slow handlers, not portico
//!
//! What's left for portico — the only part that changes between applications:
//!
//! - Event normalization — both gateway shapes become one request descriptor:
//!   headers and query parameters reconciled across their single- and
//!   multi-value views, client address and TLS inferred per source, path and
//!   query reassembled, body decoded
//! - Radix-tree routing — O(path-length) lookup via [`matchit`]
//! - Response packaging — status/headers/body back to gateway JSON, with the
//!   base64 decision and the `set-cookie` case dance handled for you
//!
//! ## Quick start
//!
//! ```rust
//! use http::Method;
//! use portico::{Gateway, GatewayEvent, Request, Response, Router};
//!
//! # async fn demo() {
//! let app = Router::new()
//!     .on(Method::GET, "/users/{id}", get_user);
//!
//! let gateway = Gateway::new(app);
//!
//! let event: GatewayEvent = serde_json::from_str(r#"{
//!     "httpMethod": "GET",
//!     "path": "/users/42",
//!     "requestContext": {"identity": {"sourceIp": "203.0.113.5"}}
//! }"#).expect("well-formed event");
//!
//! let reply = gateway.handle(event).await;
//! assert_eq!(reply.status_code, 200);
//! # }
//!
//! async fn get_user(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#).into_bytes())
//! }
//! ```

mod error;
mod gateway;
mod handler;
mod merge;
mod options;
mod path;
mod request;
mod response;
mod router;
mod source;
mod wire;

pub mod health;

pub use error::Error;
pub use gateway::Gateway;
pub use handler::Handler;
pub use options::RequestOptions;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response};
pub use router::Router;
pub use source::EventSource;
pub use wire::{GatewayEvent, GatewayResponse, Identity, RequestContext};
