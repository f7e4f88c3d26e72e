//! Gateway wire shapes.
//!
//! The JSON an invocation delivers ([`GatewayEvent`] with its
//! [`RequestContext`]/[`Identity`] context) and the JSON both gateways accept
//! back ([`GatewayResponse`]). These types are pure (de)serialization surface:
//! camelCase field names as the AWS payloads spell them, every inbound field
//! defaulted so any well-formed event deserializes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One inbound gateway invocation, as JSON.
///
/// Every field is defaulted, so any well-formed event deserializes: absent
/// keys fall back to their type's default rather than failing the parse.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewayEvent {
    pub http_method: String,
    pub path: String,
    pub headers: Option<HashMap<String, String>>,
    pub multi_value_headers: Option<HashMap<String, Vec<String>>>,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
    pub body: Option<String>,
    pub is_base64_encoded: bool,
    pub request_context: Option<RequestContext>,
}

/// The request context carried by an invocation.
///
/// The `elb` marker is present (and opaque) for ALB target-group
/// invocations; `identity` carries the caller address for API Gateway.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestContext {
    /// ALB marker — present for target-group invocations, opaque otherwise.
    pub elb: Option<serde_json::Value>,
    pub identity: Option<Identity>,
}

/// The API Gateway identity record.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Identity {
    pub source_ip: Option<String>,
}

/// The reply JSON both gateways accept back.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub multi_value_headers: HashMap<String, Vec<String>>,
    pub body: String,
    pub is_base64_encoded: bool,
}
