use crate::constants::header;

/// A borrowed view of the incoming request. Hosts build one per request
/// from whatever HTTP types they use; nothing is copied.
#[derive(Clone, Copy, Debug)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub path: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
    pub access_control_request_private_network: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn new(method: &'a str, path: &'a str) -> Self {
        Self {
            method,
            path,
            origin: None,
            access_control_request_method: None,
            access_control_request_headers: None,
            access_control_request_private_network: None,
        }
    }

    /// Builds a context by looking up the CORS request headers through
    /// `header`, typically a closure over the host's header map.
    pub fn from_headers<F>(method: &'a str, path: &'a str, mut header: F) -> Self
    where
        F: FnMut(&str) -> Option<&'a str>,
    {
        Self {
            method,
            path,
            origin: header(header::ORIGIN),
            access_control_request_method: header(header::ACCESS_CONTROL_REQUEST_METHOD),
            access_control_request_headers: header(header::ACCESS_CONTROL_REQUEST_HEADERS),
            access_control_request_private_network: header(
                header::ACCESS_CONTROL_REQUEST_PRIVATE_NETWORK,
            ),
        }
    }

    pub fn with_origin(mut self, origin: &'a str) -> Self {
        self.origin = Some(origin);
        self
    }

    pub fn with_request_method(mut self, method: &'a str) -> Self {
        self.access_control_request_method = Some(method);
        self
    }

    pub fn with_request_headers(mut self, headers: &'a str) -> Self {
        self.access_control_request_headers = Some(headers);
        self
    }

    pub fn with_private_network(mut self, value: &'a str) -> Self {
        self.access_control_request_private_network = Some(value);
        self
    }

    /// Preflights are `OPTIONS` requests carrying a requested method.
    pub fn is_preflight(&self) -> bool {
        self.method.eq_ignore_ascii_case(crate::constants::method::OPTIONS)
            && self.access_control_request_method.is_some()
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
