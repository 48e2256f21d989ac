use tracing::debug;

use crate::constants::method;
use crate::context::RequestContext;
use crate::negotiate::negotiate;
use crate::options::CorsOptions;
use crate::policy::{ConfigurationError, Policy};
use crate::response::ResponseContext;
use crate::result::CorsDecision;

/// Per-route CORS, resolved once when the route is registered.
///
/// Hosts wrap a handler with one of these: ask [`RouteCors::handles_options`]
/// whether to answer the request outright, then run [`RouteCors::apply`] on
/// the outgoing response.
#[derive(Clone, Debug)]
pub struct RouteCors {
    policy: Policy,
}

impl RouteCors {
    /// Resolves `route_options` over `app_options` at registration time.
    pub fn new(
        app_options: &CorsOptions,
        route_options: &CorsOptions,
    ) -> Result<Self, ConfigurationError> {
        let policy = Policy::resolve(&[app_options, route_options])?;

        Ok(Self { policy })
    }

    pub fn from_policy(policy: Policy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Whether the wrapper should answer this `OPTIONS` request itself
    /// instead of invoking the wrapped handler.
    pub fn handles_options(&self, request: &RequestContext<'_>) -> bool {
        self.policy.automatic_options && request.method.eq_ignore_ascii_case(method::OPTIONS)
    }

    /// Negotiates and decorates in one step. The response is marked
    /// evaluated even when nothing applies, so a later global hook leaves
    /// it alone.
    pub fn apply(
        &self,
        request: &RequestContext<'_>,
        response: &mut ResponseContext,
    ) -> CorsDecision {
        let decision = negotiate(&self.policy, request);

        match &decision {
            CorsDecision::Apply(headers) => response.decorate(headers.clone()),
            CorsDecision::Reject(status) => {
                debug!(status = *status, "route rejects request with disallowed origin");
                response.mark_decided();
            }
            CorsDecision::NotApplicable => response.mark_decided(),
        }

        decision
    }
}

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;
