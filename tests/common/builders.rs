#![allow(dead_code)]

use scoped_cors::constants::method;
use scoped_cors::{Cors, CorsDecision, CorsOptions, Policy, RequestContext, ResponseContext};

/// Resolves a single options layer, panicking on configuration errors.
pub fn resolved(options: CorsOptions) -> Policy {
    Policy::resolve(&[&options]).expect("valid CORS configuration")
}

pub struct RequestBuilder {
    method: String,
    path: String,
    origin: Option<String>,
    request_method: Option<String>,
    request_headers: Option<String>,
    private_network: Option<String>,
}

impl RequestBuilder {
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: "/".into(),
            origin: None,
            request_method: None,
            request_headers: None,
            private_network: None,
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn request_method(mut self, method: impl Into<String>) -> Self {
        self.request_method = Some(method.into());
        self
    }

    pub fn request_headers(mut self, headers: impl Into<String>) -> Self {
        self.request_headers = Some(headers.into());
        self
    }

    pub fn private_network(mut self, value: impl Into<String>) -> Self {
        self.private_network = Some(value.into());
        self
    }

    pub fn context(&self) -> RequestContext<'_> {
        RequestContext {
            method: &self.method,
            path: &self.path,
            origin: self.origin.as_deref(),
            access_control_request_method: self.request_method.as_deref(),
            access_control_request_headers: self.request_headers.as_deref(),
            access_control_request_private_network: self.private_network.as_deref(),
        }
    }

    pub fn negotiate(&self, policy: &Policy) -> CorsDecision {
        scoped_cors::negotiate(policy, &self.context())
    }

    /// Runs the request through the response hook on a fresh response.
    pub fn through(&self, cors: &Cors) -> (CorsDecision, ResponseContext) {
        let mut response = ResponseContext::new();
        let decision = cors.after_request(&self.context(), &mut response);
        (decision, response)
    }
}

pub fn simple_request() -> RequestBuilder {
    RequestBuilder::new(method::GET)
}

pub fn preflight_request() -> RequestBuilder {
    RequestBuilder::new(method::OPTIONS)
}
