use crate::pattern::Pattern;
use std::time::Duration;

/// A partial set of CORS options. Every field is optional; absent fields
/// fall through to the next-lower configuration layer when resolved into a
/// [`Policy`](crate::Policy).
///
/// Layer precedence, lowest to highest: built-in defaults, application
/// options, per-resource options, per-route options.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CorsOptions {
    pub(crate) origins: Option<Vec<Pattern>>,
    pub(crate) methods: Option<Vec<String>>,
    pub(crate) allow_headers: Option<Vec<Pattern>>,
    pub(crate) expose_headers: Option<Vec<String>>,
    pub(crate) supports_credentials: Option<bool>,
    pub(crate) max_age: Option<u64>,
    pub(crate) send_wildcard: Option<bool>,
    pub(crate) always_send: Option<bool>,
    pub(crate) vary_header: Option<bool>,
    pub(crate) automatic_options: Option<bool>,
    pub(crate) intercept_exceptions: Option<bool>,
    pub(crate) allow_private_network: Option<bool>,
    pub(crate) invalid_status_code: Option<u16>,
}

impl CorsOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allowed origins. Values are classified per [`Pattern::compile`];
    /// pass [`Pattern::regex`] results for explicit regexes.
    pub fn origins<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Pattern>,
    {
        self.origins = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Methods offered during preflight. Stored upper-cased on resolution.
    pub fn methods<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Header patterns a preflight may request.
    pub fn allow_headers<I, T>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Pattern>,
    {
        self.allow_headers = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Headers exposed to cross-origin readers.
    pub fn expose_headers<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expose_headers = Some(values.into_iter().map(Into::into).collect());
        self
    }

    pub fn supports_credentials(mut self, enabled: bool) -> Self {
        self.supports_credentials = Some(enabled);
        self
    }

    /// Preflight cache lifetime; stored as whole seconds.
    pub fn max_age(mut self, value: Duration) -> Self {
        self.max_age = Some(value.as_secs());
        self
    }

    pub fn max_age_secs(mut self, seconds: u64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    /// When the origin set contains the wildcard, emit a literal `*`
    /// instead of echoing the request origin.
    pub fn send_wildcard(mut self, enabled: bool) -> Self {
        self.send_wildcard = Some(enabled);
        self
    }

    /// Emit `Access-Control-Allow-Origin` even when the request carries no
    /// `Origin` header. See [`negotiate`](crate::negotiate) for the
    /// protocol caveat attached to this option.
    pub fn always_send(mut self, enabled: bool) -> Self {
        self.always_send = Some(enabled);
        self
    }

    /// Emit `Vary: Origin` whenever the allow-origin value is dynamic.
    pub fn vary_header(mut self, enabled: bool) -> Self {
        self.vary_header = Some(enabled);
        self
    }

    /// Let the per-route wrapper intercept `OPTIONS` requests itself.
    pub fn automatic_options(mut self, enabled: bool) -> Self {
        self.automatic_options = Some(enabled);
        self
    }

    /// Route error responses through the same decoration hook.
    pub fn intercept_exceptions(mut self, enabled: bool) -> Self {
        self.intercept_exceptions = Some(enabled);
        self
    }

    /// Answer `Access-Control-Request-Private-Network: true` preflights
    /// with an explicit `true`/`false`. Unset leaves the header out.
    pub fn allow_private_network(mut self, enabled: bool) -> Self {
        self.allow_private_network = Some(enabled);
        self
    }

    /// Status code returned (with an empty body) when a request origin
    /// fails to match. Only client-error codes are honored.
    pub fn invalid_status_code(mut self, code: u16) -> Self {
        self.invalid_status_code = Some(code);
        self
    }

    /// Produces `self` with every `Some` field of `over` taking precedence.
    pub(crate) fn overlay(&self, over: &CorsOptions) -> CorsOptions {
        CorsOptions {
            origins: over.origins.clone().or_else(|| self.origins.clone()),
            methods: over.methods.clone().or_else(|| self.methods.clone()),
            allow_headers: over
                .allow_headers
                .clone()
                .or_else(|| self.allow_headers.clone()),
            expose_headers: over
                .expose_headers
                .clone()
                .or_else(|| self.expose_headers.clone()),
            supports_credentials: over.supports_credentials.or(self.supports_credentials),
            max_age: over.max_age.or(self.max_age),
            send_wildcard: over.send_wildcard.or(self.send_wildcard),
            always_send: over.always_send.or(self.always_send),
            vary_header: over.vary_header.or(self.vary_header),
            automatic_options: over.automatic_options.or(self.automatic_options),
            intercept_exceptions: over.intercept_exceptions.or(self.intercept_exceptions),
            allow_private_network: over.allow_private_network.or(self.allow_private_network),
            invalid_status_code: over.invalid_status_code.or(self.invalid_status_code),
        }
    }
}

#[cfg(test)]
#[path = "options_test.rs"]
mod options_test;
