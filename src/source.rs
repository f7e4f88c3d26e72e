//! Event-source classification and origin derivation.
//!
//! The two gateway flavors disagree about where the original client's
//! address and protocol live. API Gateway terminates TLS at the edge and
//! records the caller in its identity record; an ALB passes the facts along
//! in the forwarding-chain headers and expects the target to peel off the
//! hop it appended. Classification happens once, up front, and the rest of
//! the derivation dispatches on the resulting tag — no repeated shape
//! sniffing.

use std::collections::HashMap;
use std::fmt;

use crate::wire::GatewayEvent;

/// Which gateway flavor produced an event.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EventSource {
    /// ALB target-group invocation: the request context carries an `elb`
    /// marker.
    Alb,
    /// API Gateway invocation — the default when the marker is absent.
    ApiGateway,
}

impl EventSource {
    /// Classifies an event by the shape of its request context.
    pub fn of(event: &GatewayEvent) -> Self {
        match &event.request_context {
            Some(context) if context.elb.is_some() => Self::Alb,
            _ => Self::ApiGateway,
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Alb => "alb",
            Self::ApiGateway => "api-gateway",
        })
    }
}

/// TLS and client-address facts derived from the classified source.
///
/// Derived exclusively from one source's rules — ALB facts come from the
/// forwarding chain, API Gateway facts from the identity record, never a
/// mix of the two.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Origin {
    pub ssl: bool,
    pub remote_address: Option<String>,
}

/// Hop separator in ALB's `x-forwarded-for` value.
///
/// A single space. The header is conventionally comma-separated everywhere
/// else; ALB-to-Lambda events join hops with spaces, and a regression test
/// pins this so the day it changes is a deliberate one.
pub(crate) const FORWARDED_FOR_DELIMITER: &str = " ";

/// Headers that only exist to carry forwarding-chain information.
const FORWARDING_HEADERS: [&str; 3] = ["x-forwarded-for", "x-forwarded-port", "x-forwarded-proto"];

/// Derives the [`Origin`] and the final header map for one event.
///
/// Takes the merged headers by value and returns the map that the request
/// descriptor should carry: unchanged for API Gateway, rewritten for ALB
/// (the hop closest to this service removed from `x-forwarded-for`, and the
/// forwarding headers dropped entirely once the chain is exhausted).
pub(crate) fn derive_origin(
    source: EventSource,
    event: &GatewayEvent,
    headers: HashMap<String, String>,
) -> (Origin, HashMap<String, String>) {
    match source {
        EventSource::Alb => alb_origin(headers),
        EventSource::ApiGateway => {
            let remote_address = event
                .request_context
                .as_ref()
                .and_then(|context| context.identity.as_ref())
                .and_then(|identity| identity.source_ip.clone());
            // Always TLS-terminated at the edge; the forwarding headers, if
            // any, are passed through untouched and not consulted.
            (Origin { ssl: true, remote_address }, headers)
        }
    }
}

fn alb_origin(headers: HashMap<String, String>) -> (Origin, HashMap<String, String>) {
    // Peel the chain into owned values before touching the map, so the
    // merged view is never aliased while it is being rewritten.
    let peeled = headers.get("x-forwarded-for").map(|chain| {
        let mut hops: Vec<&str> = chain.split(FORWARDED_FOR_DELIMITER).collect();
        // `split` yields at least one element, so `pop` always succeeds; the
        // last hop is the one the ALB itself appended for this client.
        let remote_address = hops.pop().map(str::to_owned);
        (remote_address, hops.join(FORWARDED_FOR_DELIMITER))
    });
    let Some((remote_address, remaining)) = peeled else {
        // No chain, no facts. Not TLS until proven otherwise.
        return (Origin { ssl: false, remote_address: None }, headers);
    };
    let ssl = headers.get("x-forwarded-proto").is_some_and(|proto| proto == "https");

    let mut rewritten = headers;
    if remaining.is_empty() {
        for name in FORWARDING_HEADERS {
            rewritten.remove(name);
        }
    } else {
        rewritten.insert("x-forwarded-for".to_owned(), remaining);
    }
    (Origin { ssl, remote_address }, rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{Identity, RequestContext};

    fn alb_event() -> GatewayEvent {
        GatewayEvent {
            request_context: Some(RequestContext {
                elb: Some(serde_json::json!({"targetGroupArn": "arn:aws:elasticloadbalancing:::tg"})),
                ..RequestContext::default()
            }),
            ..GatewayEvent::default()
        }
    }

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn elb_marker_classifies_as_alb() {
        assert_eq!(EventSource::of(&alb_event()), EventSource::Alb);
    }

    #[test]
    fn missing_context_classifies_as_api_gateway() {
        assert_eq!(EventSource::of(&GatewayEvent::default()), EventSource::ApiGateway);
    }

    #[test]
    fn context_without_marker_classifies_as_api_gateway() {
        let event = GatewayEvent {
            request_context: Some(RequestContext::default()),
            ..GatewayEvent::default()
        };
        assert_eq!(EventSource::of(&event), EventSource::ApiGateway);
    }

    #[test]
    fn alb_peels_the_closest_hop() {
        let (origin, rewritten) = derive_origin(
            EventSource::Alb,
            &alb_event(),
            headers(&[("x-forwarded-for", "1.2.3.4 5.6.7.8"), ("x-forwarded-proto", "https")]),
        );
        assert_eq!(origin, Origin { ssl: true, remote_address: Some("5.6.7.8".into()) });
        assert_eq!(rewritten["x-forwarded-for"], "1.2.3.4");
        assert_eq!(rewritten["x-forwarded-proto"], "https");
    }

    #[test]
    fn alb_drops_forwarding_headers_once_chain_is_exhausted() {
        let (origin, rewritten) = derive_origin(
            EventSource::Alb,
            &alb_event(),
            headers(&[
                ("x-forwarded-for", "9.9.9.9"),
                ("x-forwarded-port", "80"),
                ("x-forwarded-proto", "http"),
                ("host", "example.com"),
            ]),
        );
        assert_eq!(origin, Origin { ssl: false, remote_address: Some("9.9.9.9".into()) });
        for name in FORWARDING_HEADERS {
            assert!(!rewritten.contains_key(name), "{name} should be gone");
        }
        assert_eq!(rewritten["host"], "example.com");
    }

    #[test]
    fn alb_without_chain_yields_no_facts() {
        let (origin, rewritten) = derive_origin(
            EventSource::Alb,
            &alb_event(),
            headers(&[("x-forwarded-proto", "https")]),
        );
        assert_eq!(origin, Origin { ssl: false, remote_address: None });
        // Untouched: only a present chain triggers the rewrite.
        assert_eq!(rewritten["x-forwarded-proto"], "https");
    }

    #[test]
    fn api_gateway_reads_the_identity_record() {
        let event = GatewayEvent {
            request_context: Some(RequestContext {
                identity: Some(Identity { source_ip: Some("203.0.113.5".into()) }),
                ..RequestContext::default()
            }),
            ..GatewayEvent::default()
        };
        let (origin, rewritten) = derive_origin(
            EventSource::ApiGateway,
            &event,
            headers(&[("x-forwarded-for", "203.0.113.5, 70.132.29.78")]),
        );
        assert_eq!(origin, Origin { ssl: true, remote_address: Some("203.0.113.5".into()) });
        // Forwarding headers are not consulted and not rewritten.
        assert_eq!(rewritten["x-forwarded-for"], "203.0.113.5, 70.132.29.78");
    }

    #[test]
    fn api_gateway_without_identity_leaves_address_unset() {
        let (origin, _) = derive_origin(EventSource::ApiGateway, &GatewayEvent::default(), HashMap::new());
        assert_eq!(origin, Origin { ssl: true, remote_address: None });
    }
}
