//! Outgoing HTTP response type and the [`IntoResponse`] conversion trait.
//!
//! Build a [`Response`] in your handler and return it; the executor packages
//! it into the gateway-shaped reply. That is the entire job description.

use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use http::StatusCode;

use crate::wire::GatewayResponse;

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`ResponseBuilder::bytes`].
pub enum ContentType {
    Csv,          // text/csv
    EventStream,  // text/event-stream  (SSE)
    FormData,     // application/x-www-form-urlencoded
    Html,         // text/html; charset=utf-8
    Json,         // application/json
    MsgPack,      // application/msgpack
    OctetStream,  // application/octet-stream  (binary / file download)
    Pdf,          // application/pdf
    Text,         // text/plain; charset=utf-8
    Xml,          // application/xml
}

impl ContentType {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Csv         => "text/csv",
            Self::EventStream => "text/event-stream",
            Self::FormData    => "application/x-www-form-urlencoded",
            Self::Html        => "text/html; charset=utf-8",
            Self::Json        => "application/json",
            Self::MsgPack     => "application/msgpack",
            Self::OctetStream => "application/octet-stream",
            Self::Pdf         => "application/pdf",
            Self::Text        => "text/plain; charset=utf-8",
            Self::Xml         => "application/xml",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// # Shortcuts (200 OK, no custom headers needed)
///
/// ```rust
/// use portico::Response;
/// use http::StatusCode;
///
/// Response::json(br#"{"id":1}"#.to_vec());
/// Response::text("hello");
/// Response::status(StatusCode::NO_CONTENT);
/// ```
///
/// # Builder (custom status or headers)
///
/// ```rust
/// use portico::{ContentType, Response};
/// use http::StatusCode;
///
/// Response::builder()
///     .status(StatusCode::CREATED)
///     .header("location", "/users/42")
///     .json(br#"{"id":42}"#.to_vec());
///
/// Response::builder()
///     .bytes(ContentType::Xml, b"<ok/>".to_vec());
/// ```
pub struct Response {
    pub(crate) body: Bytes,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: StatusCode,
}

impl Response {
    /// `200 OK` — `application/json`.
    ///
    /// Pass bytes from your serialiser directly — no intermediate allocation:
    /// - serde_json: `serde_json::to_vec(&val).unwrap()`
    /// - hand-built: `format!(r#"{{"id":{id}}}"#).into_bytes()`
    pub fn json(body: impl Into<Bytes>) -> Self {
        Self::bytes_raw("application/json", body.into())
    }

    /// `200 OK` — `text/plain; charset=utf-8`.
    pub fn text(body: impl Into<String>) -> Self {
        Self::bytes_raw("text/plain; charset=utf-8", Bytes::from(body.into()))
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self { body: Bytes::new(), headers: Vec::new(), status: code }
    }

    /// Builder for responses that need a custom status or extra headers.
    pub fn builder() -> ResponseBuilder {
        ResponseBuilder { headers: Vec::new(), status: StatusCode::OK }
    }

    fn bytes_raw(content_type: &str, body: Bytes) -> Self {
        Self {
            body,
            headers: vec![("content-type".to_owned(), content_type.to_owned())],
            status: StatusCode::OK,
        }
    }

    /// Packages this response into the shape the gateway accepts back.
    ///
    /// Headers are grouped by lowercase name into the multi-value map. The
    /// single-value map takes the sole value, or a comma-joined value for
    /// repeated headers — except `set-cookie`, whose repeats survive as
    /// case-permuted key variants (`set-cookie`, `Set-cookie`, `sEt-cookie`,
    /// …): single-value maps collapse duplicate keys, but HTTP header names
    /// are case-insensitive, so each permutation still reaches the client as
    /// its own cookie.
    ///
    /// The body ships as UTF-8 text when the content-type is textual and the
    /// response is not content-encoded; otherwise it ships base64 with
    /// `isBase64Encoded` set. A `content-length` is synthesized when the
    /// handler did not set one.
    pub fn into_gateway(self) -> GatewayResponse {
        let mut named = self.headers;
        if !named.iter().any(|(name, _)| name.eq_ignore_ascii_case("content-length")) {
            named.push(("content-length".to_owned(), self.body.len().to_string()));
        }

        // Group by lowercase name, preserving value order within a name.
        let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
        for (name, value) in named {
            let name = name.to_ascii_lowercase();
            match grouped.iter_mut().find(|(existing, _)| *existing == name) {
                Some((_, values)) => values.push(value),
                None => grouped.push((name, vec![value])),
            }
        }

        let mut headers = HashMap::new();
        let mut multi_value_headers = HashMap::new();
        for (name, values) in grouped {
            if name == "set-cookie" {
                for (i, value) in values.iter().enumerate() {
                    headers.insert(case_variant(&name, i), value.clone());
                }
            } else if let Some(sole) = values.first().filter(|_| values.len() == 1) {
                headers.insert(name.clone(), sole.clone());
            } else {
                headers.insert(name.clone(), values.join(", "));
            }
            multi_value_headers.insert(name, values);
        }

        let binary = is_binary(
            headers.get("content-type").map(String::as_str),
            headers.get("content-encoding").map(String::as_str),
        );
        let (body, is_base64_encoded) = if self.body.is_empty() {
            (String::new(), false)
        } else if binary {
            (STANDARD.encode(&self.body), true)
        } else {
            match std::str::from_utf8(&self.body) {
                Ok(text) => (text.to_owned(), false),
                // Claimed textual but isn't valid UTF-8: base64 is the only
                // lossless way through a JSON string field.
                Err(_) => (STANDARD.encode(&self.body), true),
            }
        };

        GatewayResponse {
            status_code: self.status.as_u16(),
            headers,
            multi_value_headers,
            body,
            is_base64_encoded,
        }
    }
}

/// `name` with its letters case-flipped by the bits of `variant` — binary
/// counting over letter positions, so variant 0 is the name itself, 1 is
/// `Set-cookie`, 2 is `sEt-cookie`, 3 is `SEt-cookie`, and so on.
fn case_variant(name: &str, variant: usize) -> String {
    let mut letter = 0;
    name.chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let flip = variant >> letter & 1 == 1;
                letter += 1;
                if flip { c.to_ascii_uppercase() } else { c }
            } else {
                c
            }
        })
        .collect()
}

fn is_binary(content_type: Option<&str>, content_encoding: Option<&str>) -> bool {
    if content_encoding.is_some_and(|encoding| encoding != "identity") {
        return true;
    }
    match content_type {
        None => false,
        Some(content_type) => {
            let mime = content_type.split(';').next().unwrap_or("").trim();
            !(mime.starts_with("text/")
                || mime == "application/json"
                || mime == "application/javascript"
                || mime == "application/xml"
                || mime.ends_with("+json")
                || mime.ends_with("+xml"))
        }
    }
}

// ── ResponseBuilder ───────────────────────────────────────────────────────────

/// Fluent builder for [`Response`].
///
/// Obtain via [`Response::builder()`]. Defaults to `200 OK`. Terminated by a
/// typed body method — you always know what you're sending.
pub struct ResponseBuilder {
    headers: Vec<(String, String)>,
    status: StatusCode,
}

impl ResponseBuilder {
    pub fn status(mut self, code: StatusCode) -> Self {
        self.status = code;
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Terminate with a JSON body (`application/json`).
    pub fn json(self, body: impl Into<Bytes>) -> Response {
        self.finish("application/json", body.into())
    }

    /// Terminate with a plain-text body (`text/plain; charset=utf-8`).
    pub fn text(self, body: impl Into<String>) -> Response {
        self.finish("text/plain; charset=utf-8", Bytes::from(body.into()))
    }

    /// Terminate with a typed body. Use this for XML, HTML, binary, SSE, etc.
    pub fn bytes(self, content_type: ContentType, body: impl Into<Bytes>) -> Response {
        self.finish(content_type.as_str(), body.into())
    }

    /// Terminate with no body (e.g. `NO_CONTENT`, `MOVED_PERMANENTLY`).
    pub fn no_body(self) -> Response {
        Response { body: Bytes::new(), headers: self.headers, status: self.status }
    }

    fn finish(self, content_type: &str, body: Bytes) -> Response {
        let mut headers = vec![("content-type".to_owned(), content_type.to_owned())];
        headers.extend(self.headers);
        Response { body, headers, status: self.status }
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into an HTTP [`Response`].
///
/// Implement on your own types to return them directly from handlers.
///
/// # Example — typed `Json<T>` wrapper with serde
///
/// ```rust,ignore
/// use portico::{IntoResponse, Response};
/// use http::StatusCode;
/// use serde::Serialize;
///
/// struct Json<T: Serialize>(T);
///
/// impl<T: Serialize> IntoResponse for Json<T> {
///     fn into_response(self) -> Response {
///         match serde_json::to_vec(&self.0) {
///             Ok(bytes) => Response::json(bytes),
///             Err(_)    => Response::status(StatusCode::INTERNAL_SERVER_ERROR),
///         }
///     }
/// }
/// ```
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

/// Return a [`StatusCode`] directly from a handler.
impl IntoResponse for StatusCode {
    fn into_response(self) -> Response { Response::status(self) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_variants_count_in_binary() {
        assert_eq!(case_variant("set-cookie", 0), "set-cookie");
        assert_eq!(case_variant("set-cookie", 1), "Set-cookie");
        assert_eq!(case_variant("set-cookie", 2), "sEt-cookie");
        assert_eq!(case_variant("set-cookie", 3), "SEt-cookie");
        assert_eq!(case_variant("set-cookie", 4), "seT-cookie");
    }

    #[test]
    fn textual_types_ship_as_text() {
        assert!(!is_binary(Some("text/html; charset=utf-8"), None));
        assert!(!is_binary(Some("application/json"), None));
        assert!(!is_binary(Some("application/problem+json"), None));
        assert!(!is_binary(None, None));
    }

    #[test]
    fn binary_types_and_encodings_ship_as_base64() {
        assert!(is_binary(Some("image/png"), None));
        assert!(is_binary(Some("application/octet-stream"), None));
        assert!(is_binary(Some("text/html"), Some("gzip")));
        assert!(!is_binary(Some("text/html"), Some("identity")));
    }

    #[test]
    fn packaging_synthesizes_content_length() {
        let reply = Response::text("hello").into_gateway();
        assert_eq!(reply.headers["content-length"], "5");
        assert_eq!(reply.body, "hello");
        assert!(!reply.is_base64_encoded);
    }

    #[test]
    fn packaging_respects_handler_content_length() {
        let reply = Response::builder()
            .header("content-length", "99")
            .text("hello")
            .into_gateway();
        assert_eq!(reply.headers["content-length"], "99");
    }

    #[test]
    fn repeated_set_cookie_survives_both_maps() {
        let reply = Response::builder()
            .header("set-cookie", "a=1")
            .header("set-cookie", "b=2")
            .header("set-cookie", "c=3")
            .no_body()
            .into_gateway();
        assert_eq!(reply.headers["set-cookie"], "a=1");
        assert_eq!(reply.headers["Set-cookie"], "b=2");
        assert_eq!(reply.headers["sEt-cookie"], "c=3");
        assert_eq!(reply.multi_value_headers["set-cookie"], vec!["a=1", "b=2", "c=3"]);
    }

    #[test]
    fn repeated_plain_headers_comma_join() {
        let reply = Response::builder()
            .header("vary", "accept")
            .header("vary", "accept-encoding")
            .no_body()
            .into_gateway();
        assert_eq!(reply.headers["vary"], "accept, accept-encoding");
        assert_eq!(reply.multi_value_headers["vary"], vec!["accept", "accept-encoding"]);
    }

    #[test]
    fn binary_body_is_base64_encoded() {
        let reply = Response::builder()
            .bytes(ContentType::OctetStream, vec![0u8, 159, 146, 150])
            .into_gateway();
        assert!(reply.is_base64_encoded);
        assert_eq!(reply.body, STANDARD.encode([0u8, 159, 146, 150]));
    }

    #[test]
    fn empty_body_is_plain_empty_string() {
        let reply = Response::status(StatusCode::NO_CONTENT).into_gateway();
        assert_eq!(reply.body, "");
        assert!(!reply.is_base64_encoded);
        assert_eq!(reply.status_code, 204);
    }
}
