use tracing::{debug, info};

use crate::constants::{header, method};
use crate::context::RequestContext;
use crate::policy::Policy;
use crate::response::Headers;
use crate::result::CorsDecision;

enum OriginOutcome {
    Allow(String),
    Disallow,
    Skip,
}

/// Negotiates one request against one resolved policy, producing the
/// response headers CORS calls for. Routing and header writing stay with
/// the caller; this function only decides.
pub fn negotiate(policy: &Policy, request: &RequestContext<'_>) -> CorsDecision {
    let origin_value = match resolve_origin(policy, request.origin) {
        OriginOutcome::Allow(value) => value,
        OriginOutcome::Disallow => {
            return match policy.invalid_status_code {
                Some(status) => CorsDecision::Reject(status),
                None => CorsDecision::NotApplicable,
            };
        }
        OriginOutcome::Skip => return CorsDecision::NotApplicable,
    };

    let wildcard_sent = origin_value == "*";
    let mut headers = Headers::new();

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN.to_string(),
        origin_value,
    );

    if let Some(expose) = policy.expose_headers_value() {
        headers.insert(header::ACCESS_CONTROL_EXPOSE_HEADERS.to_string(), expose);
    }

    if policy.supports_credentials {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_CREDENTIALS.to_string(),
            "true".to_string(),
        );
    }

    if request.method.eq_ignore_ascii_case(method::OPTIONS) {
        apply_preflight(policy, request, &mut headers);
    }

    apply_private_network(policy, request, &mut headers);

    if policy.vary_header && !wildcard_sent {
        headers.insert(header::VARY.to_string(), header::ORIGIN.to_string());
    }

    CorsDecision::Apply(headers)
}

fn resolve_origin(policy: &Policy, origin: Option<&str>) -> OriginOutcome {
    let origin = origin.map(str::trim).filter(|value| !value.is_empty());

    match origin {
        Some(value) => {
            debug!(origin = %value, "CORS request received");

            if policy.origins.has_wildcard() && policy.send_wildcard {
                debug!("policy sends the wildcard origin");
                OriginOutcome::Allow("*".to_string())
            } else if policy.origins.matches(value, false) {
                debug!("request origin matches the policy, echoing it back");
                OriginOutcome::Allow(value.to_string())
            } else {
                debug!("request origin does not match any allowed origin");
                OriginOutcome::Disallow
            }
        }
        None => {
            if !policy.always_send {
                debug!("request carries no origin header, CORS was not requested");
                return OriginOutcome::Skip;
            }

            if policy.origins.has_wildcard() {
                // a credentialed response may never advertise the wildcard
                if policy.supports_credentials {
                    return OriginOutcome::Skip;
                }

                return OriginOutcome::Allow("*".to_string());
            }

            let mut literals: Vec<&str> = policy.origins.literals().collect();
            literals.sort_unstable();

            let joined = literals.join(", ");

            if joined.is_empty() {
                OriginOutcome::Skip
            } else {
                OriginOutcome::Allow(joined)
            }
        }
    }
}

fn apply_preflight(policy: &Policy, request: &RequestContext<'_>, headers: &mut Headers) {
    let requested_method = request
        .access_control_request_method
        .map(|value| value.trim().to_ascii_uppercase())
        .unwrap_or_default();

    if requested_method.is_empty() {
        debug!("OPTIONS request without a requested method, leaving preflight headers out");
        return;
    }

    if !policy.allows_method(&requested_method) {
        info!(
            requested = %requested_method,
            "requested preflight method is not allowed, preflight headers withheld"
        );
        return;
    }

    if let Some(allow) = requested_headers_value(policy, request.access_control_request_headers) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS.to_string(), allow);
    }

    if let Some(max_age) = policy.max_age {
        headers.insert(
            header::ACCESS_CONTROL_MAX_AGE.to_string(),
            max_age.to_string(),
        );
    }

    if let Some(methods) = policy.methods_header_value() {
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS.to_string(), methods);
    }
}

/// Filters the requested header list down to entries the policy allows,
/// sorted and comma-joined. `None` when nothing survives the filter.
fn requested_headers_value(policy: &Policy, requested: Option<&str>) -> Option<String> {
    let requested = requested?;

    let mut allowed: Vec<&str> = requested
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter(|token| {
            policy.allow_headers.has_wildcard() || policy.allow_headers.matches(token, false)
        })
        .collect();

    if allowed.is_empty() {
        return None;
    }

    allowed.sort_unstable();

    Some(allowed.join(", "))
}

/// Answers `Access-Control-Request-Private-Network: true` on any request
/// shape, not just preflights, whenever the policy takes a stance.
fn apply_private_network(policy: &Policy, request: &RequestContext<'_>, headers: &mut Headers) {
    let Some(allow) = policy.allow_private_network else {
        return;
    };

    if request.access_control_request_private_network != Some("true") {
        return;
    }

    let value = if allow { "true" } else { "false" };

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_PRIVATE_NETWORK.to_string(),
        value.to_string(),
    );
}

#[cfg(test)]
#[path = "negotiate_test.rs"]
mod negotiate_test;
