use tracing::{debug, info};

use crate::context::RequestContext;
use crate::negotiate::negotiate;
use crate::options::CorsOptions;
use crate::policy::ConfigurationError;
use crate::resources::{ResourceRouter, Resources};
use crate::response::ResponseContext;
use crate::result::CorsDecision;

/// Application-wide CORS driven by a response hook, the counterpart to
/// the per-route [`RouteCors`](crate::RouteCors) wrapper.
#[derive(Clone, Debug)]
pub struct Cors {
    router: ResourceRouter,
    intercept_exceptions: bool,
}

impl Cors {
    /// Covers every path with `options`.
    pub fn new(options: CorsOptions) -> Result<Self, ConfigurationError> {
        Self::with_resources(Resources::default(), options)
    }

    /// Covers only the given resources, layering each resource's
    /// overrides over `options`.
    pub fn with_resources(
        resources: impl Into<Resources>,
        options: CorsOptions,
    ) -> Result<Self, ConfigurationError> {
        let intercept_exceptions = options.intercept_exceptions.unwrap_or(true);
        let router = ResourceRouter::new(resources.into(), &options)?;

        info!(resources = router.len(), "configuring CORS");

        Ok(Self {
            router,
            intercept_exceptions,
        })
    }

    pub fn router(&self) -> &ResourceRouter {
        &self.router
    }

    /// Whether error responses should flow through [`Cors::after_request`]
    /// as well, keeping CORS headers on error payloads so browsers let
    /// clients read them.
    pub fn intercept_exceptions(&self) -> bool {
        self.intercept_exceptions
    }

    /// Response hook: negotiates the request against the matching resource
    /// and decorates `response`. A response already evaluated by a route
    /// wrapper is left untouched.
    pub fn after_request(
        &self,
        request: &RequestContext<'_>,
        response: &mut ResponseContext,
    ) -> CorsDecision {
        if response.is_decided() {
            debug!("response already evaluated, skipping");
            return CorsDecision::NotApplicable;
        }

        let Some(resource) = self.router.find(request.path) else {
            debug!(path = %request.path, "no CORS resource matches the request path");
            return CorsDecision::NotApplicable;
        };

        debug!(
            path = %request.path,
            pattern = %resource.pattern(),
            "request path matches CORS resource"
        );

        let decision = negotiate(resource.policy(), request);

        if let CorsDecision::Apply(headers) = &decision {
            response.decorate(headers.clone());
        }

        decision
    }
}

#[cfg(test)]
#[path = "extension_test.rs"]
mod extension_test;
