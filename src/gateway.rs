//! The socketless executor: gateway events in, gateway replies out.
//!
//! [`Gateway::handle`] plays the role a server's accept loop plays
//! elsewhere — except there is no listener and no connection, just one
//! already-parsed event per call. Normalize, route, run the handler,
//! package the response. Every failure is expressed as a gateway-shaped
//! response; nothing panics and nothing escapes.

use http::{Method, StatusCode};
use tracing::{info, warn};

use crate::options::RequestOptions;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;
use crate::source::EventSource;
use crate::wire::{GatewayEvent, GatewayResponse};

/// Dispatches gateway events through an embedded [`Router`].
///
/// Stateless beyond the routing table; share one instance (behind an `Arc`
/// if your runtime requires it) across arbitrarily many concurrent
/// invocations.
pub struct Gateway {
    router: Router,
}

impl Gateway {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Handles one gateway event, always producing a gateway-shaped reply.
    ///
    /// | condition | reply |
    /// |---|---|
    /// | event rejected by normalization | `400 Bad Request` |
    /// | method token not a valid HTTP method | `405 Method Not Allowed` |
    /// | no route for method + path | `404 Not Found` |
    pub async fn handle(&self, event: GatewayEvent) -> GatewayResponse {
        let source = EventSource::of(&event);

        let options = match RequestOptions::from_event(&event) {
            Ok(options) => options,
            Err(e) => {
                warn!(source = %source, error = %e, "rejected gateway event");
                return Response::status(StatusCode::BAD_REQUEST).into_gateway();
            }
        };

        let Ok(method) = Method::from_bytes(options.method.as_bytes()) else {
            warn!(source = %source, method = %options.method, "unrecognized method token");
            return Response::status(StatusCode::METHOD_NOT_ALLOWED).into_gateway();
        };

        // Route on the path alone; the query stays on the request.
        let target = options.path.clone();
        let route_path = match target.split_once('?') {
            Some((path, _)) => path,
            None => target.as_str(),
        };

        let response = match self.router.lookup(&method, route_path) {
            Some((handler, params)) => handler.call(Request::new(method.clone(), options, params)).await,
            None => Response::status(StatusCode::NOT_FOUND),
        };

        info!(
            source = %source,
            method = %method,
            path = %target,
            status = response.status.as_u16(),
            "handled gateway event"
        );
        response.into_gateway()
    }
}
