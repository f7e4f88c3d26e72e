//! Built-in health-check handlers.
//!
//! An ALB target group health-checks a Lambda target the same way it checks
//! any other target: a plain HTTP request on a configured path, delivered
//! here as one more gateway event.
//!
//! Register them on your router:
//!
//! ```rust,no_run
//! use http::Method;
//! use portico::{Router, health};
//!
//! let app = Router::new()
//!     .on(Method::GET, "/healthz", health::liveness)
//!     .on(Method::GET, "/readyz", health::readiness);
//! ```
//!
//! Override `readiness` with a custom handler if you need to gate on
//! dependency availability (database connections, downstream services, etc.).

use crate::{Request, Response};

/// Liveness probe handler.
///
/// Always returns `200 OK` with body `"ok"`. If the process can answer an
/// event at all, it is alive — this handler intentionally has no
/// dependencies.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Readiness probe handler (default implementation).
///
/// Returns `200 OK` with body `"ready"`. Replace this with your own handler
/// if your application must verify dependency health before taking traffic.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
