//! In-process HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::Method;

use crate::options::RequestOptions;

/// An incoming HTTP request, reconstructed from a gateway event rather than
/// parsed off a socket.
pub struct Request {
    method: Method,
    target: String,
    headers: HashMap<String, String>,
    body: Bytes,
    ssl: bool,
    remote_address: Option<String>,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(method: Method, options: RequestOptions, params: HashMap<String, String>) -> Self {
        Self {
            method,
            target: options.path,
            headers: options.headers,
            body: options.body,
            ssl: options.ssl,
            remote_address: options.remote_address,
            params,
        }
    }

    pub fn method(&self) -> &Method { &self.method }

    /// Path portion of the request target, query excluded.
    pub fn path(&self) -> &str {
        match self.target.split_once('?') {
            Some((path, _)) => path,
            None => &self.target,
        }
    }

    /// Raw query string, if the request carried one.
    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, query)| query)
    }

    pub fn body(&self) -> &[u8] { &self.body }

    /// Whether the original client connection was TLS.
    pub fn ssl(&self) -> bool { self.ssl }

    /// Best-effort original client IP, when the event carried one.
    pub fn remote_address(&self) -> Option<&str> { self.remote_address.as_deref() }

    /// Case-insensitive header lookup. Keys are stored lowercase.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// The full canonical header map: lowercase keys, one value each.
    pub fn headers(&self) -> &HashMap<String, String> { &self.headers }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}
