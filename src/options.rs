//! The normalized request descriptor.
//!
//! [`RequestOptions::from_event`] is the heart of the crate: a pure,
//! synchronous translation of one gateway event into the canonical
//! description of the HTTP request it encodes. No routing, no handler
//! execution, no response — just the data shape the embedded stack needs.

use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;

use crate::error::Error;
use crate::merge::merge_single_and_multi;
use crate::path::path_and_query;
use crate::source::{self, EventSource};
use crate::wire::GatewayEvent;

/// The canonical, framework-agnostic description of one inbound HTTP
/// request, reconstructed from a gateway event.
///
/// Transient by design: built per invocation, handed to the executor,
/// discarded. Header keys are lowercase and unique.
#[derive(Clone, Debug)]
pub struct RequestOptions {
    /// HTTP method token, copied verbatim from the event.
    pub method: String,
    /// Request target: the event path plus the percent-encoded query string.
    pub path: String,
    pub headers: HashMap<String, String>,
    /// Decoded body. Never null — an absent body is an empty byte sequence.
    pub body: Bytes,
    /// Whether the original client connection was TLS.
    pub ssl: bool,
    /// Best-effort original client IP.
    pub remote_address: Option<String>,
}

impl RequestOptions {
    /// Normalizes one gateway event.
    ///
    /// Merge headers, classify the source, derive TLS/remote-address (and
    /// the ALB forwarding-header rewrite), merge query parameters, rebuild
    /// the request target, decode the body. Every well-formed event
    /// succeeds; the only rejections are the fail-fast guards in
    /// [`Error`] — an empty multi-value list or a body that claims base64
    /// and isn't.
    pub fn from_event(event: &GatewayEvent) -> Result<Self, Error> {
        let merged = merge_single_and_multi(event.headers.as_ref(), event.multi_value_headers.as_ref())?;
        let source = EventSource::of(event);
        let (origin, headers) = source::derive_origin(source, event, merged);
        let query = merge_single_and_multi(
            event.query_string_parameters.as_ref(),
            event.multi_value_query_string_parameters.as_ref(),
        )?;
        Ok(Self {
            method: event.http_method.clone(),
            path: path_and_query(&event.path, &query),
            headers,
            body: decode_body(event.body.as_deref(), event.is_base64_encoded)?,
            ssl: origin.ssl,
            remote_address: origin.remote_address,
        })
    }
}

fn decode_body(body: Option<&str>, is_base64: bool) -> Result<Bytes, Error> {
    match body {
        None => Ok(Bytes::new()),
        Some(text) if is_base64 => Ok(Bytes::from(STANDARD.decode(text).map_err(Error::Body)?)),
        Some(text) => Ok(Bytes::copy_from_slice(text.as_bytes())),
    }
}
