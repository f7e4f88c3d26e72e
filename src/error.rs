//! Unified error type.

use std::fmt;

/// The error type returned by event normalization.
///
/// Application-level failures (404, 500, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// the two ways a gateway event can be ill-formed enough to reject before
/// any part of the request descriptor is built.
#[derive(Debug)]
pub enum Error {
    /// A multi-value header or query entry carried an empty value list.
    /// The canonical form keeps the last value of each list; an entry with
    /// no values has no last value to keep.
    EmptyMultiValue(String),
    /// The body claimed base64 encoding and did not decode.
    Body(base64::DecodeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMultiValue(key) => write!(f, "multi-value entry `{key}` has no values"),
            Self::Body(e) => write!(f, "body is not valid base64: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyMultiValue(_) => None,
            Self::Body(e) => Some(e),
        }
    }
}
