use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::constants::ALL_METHODS;
use crate::options::CorsOptions;
use crate::pattern::{Pattern, PatternSet};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(
        "cannot combine `supports_credentials` with `send_wildcard`; browsers reject a credentialed response whose allow-origin is `*`"
    )]
    CredentialedWildcard,
    #[error("the resolved origin list is empty; configure at least one origin pattern or `*`")]
    EmptyOrigins,
}

/// A fully resolved CORS configuration. Every optional layer has been
/// merged and validated; negotiation reads this without further lookups.
///
/// A `Policy` is immutable once built. To change behavior, resolve a new
/// one from updated [`CorsOptions`] layers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    pub(crate) origins: PatternSet,
    pub(crate) methods: BTreeSet<String>,
    pub(crate) allow_headers: PatternSet,
    pub(crate) expose_headers: BTreeSet<String>,
    pub(crate) supports_credentials: bool,
    pub(crate) max_age: Option<u64>,
    pub(crate) send_wildcard: bool,
    pub(crate) always_send: bool,
    pub(crate) vary_header: bool,
    pub(crate) automatic_options: bool,
    pub(crate) intercept_exceptions: bool,
    pub(crate) allow_private_network: Option<bool>,
    pub(crate) invalid_status_code: Option<u16>,
}

/// The lowest configuration layer. Explicit layers override these.
fn base_layer() -> CorsOptions {
    CorsOptions::new()
        .origins([Pattern::Wildcard])
        .methods(ALL_METHODS.iter().copied())
        .allow_headers([Pattern::Wildcard])
        .supports_credentials(false)
        .send_wildcard(false)
        .always_send(true)
        .vary_header(true)
        .automatic_options(true)
        .intercept_exceptions(true)
}

impl Policy {
    /// Merges `layers` over the built-in defaults, lowest precedence
    /// first, and validates the result.
    pub fn resolve(layers: &[&CorsOptions]) -> Result<Self, ConfigurationError> {
        let mut merged = base_layer();

        for layer in layers {
            merged = merged.overlay(layer);
        }

        let origin_patterns = merged.origins.unwrap_or_else(|| vec![Pattern::Wildcard]);

        if origin_patterns.is_empty() {
            return Err(ConfigurationError::EmptyOrigins);
        }

        let origins = PatternSet::new(origin_patterns);
        let supports_credentials = merged.supports_credentials.unwrap_or(false);
        let send_wildcard = merged.send_wildcard.unwrap_or(false);

        if origins.has_wildcard() && supports_credentials && send_wildcard {
            return Err(ConfigurationError::CredentialedWildcard);
        }

        let methods: BTreeSet<String> = merged
            .methods
            .unwrap_or_else(|| ALL_METHODS.iter().map(|method| (*method).to_string()).collect())
            .into_iter()
            .map(|method| method.trim().to_ascii_uppercase())
            .filter(|method| !method.is_empty())
            .collect();

        let allow_headers =
            PatternSet::new(merged.allow_headers.unwrap_or_else(|| vec![Pattern::Wildcard]));

        let expose_headers: BTreeSet<String> = merged
            .expose_headers
            .unwrap_or_default()
            .into_iter()
            .map(|header| header.trim().to_string())
            .filter(|header| !header.is_empty())
            .collect();

        let invalid_status_code = match merged.invalid_status_code {
            Some(code) if !(400..500).contains(&code) => {
                warn!(code, "`invalid_status_code` must be a client error status; ignoring");
                None
            }
            other => other,
        };

        let policy = Policy {
            origins,
            methods,
            allow_headers,
            expose_headers,
            supports_credentials,
            max_age: merged.max_age,
            send_wildcard,
            always_send: merged.always_send.unwrap_or(true),
            vary_header: merged.vary_header.unwrap_or(true),
            automatic_options: merged.automatic_options.unwrap_or(true),
            intercept_exceptions: merged.intercept_exceptions.unwrap_or(true),
            allow_private_network: merged.allow_private_network,
            invalid_status_code,
        };

        debug!(?policy, "resolved CORS policy");

        Ok(policy)
    }

    pub fn origins(&self) -> &PatternSet {
        &self.origins
    }

    pub fn methods(&self) -> &BTreeSet<String> {
        &self.methods
    }

    pub fn allow_headers(&self) -> &PatternSet {
        &self.allow_headers
    }

    pub fn expose_headers(&self) -> &BTreeSet<String> {
        &self.expose_headers
    }

    pub fn supports_credentials(&self) -> bool {
        self.supports_credentials
    }

    pub fn max_age(&self) -> Option<u64> {
        self.max_age
    }

    pub fn send_wildcard(&self) -> bool {
        self.send_wildcard
    }

    pub fn always_send(&self) -> bool {
        self.always_send
    }

    pub fn vary_header(&self) -> bool {
        self.vary_header
    }

    pub fn automatic_options(&self) -> bool {
        self.automatic_options
    }

    pub fn intercept_exceptions(&self) -> bool {
        self.intercept_exceptions
    }

    pub fn allow_private_network(&self) -> Option<bool> {
        self.allow_private_network
    }

    pub fn invalid_status_code(&self) -> Option<u16> {
        self.invalid_status_code
    }

    /// `method` is expected upper-cased, as produced by resolution.
    pub(crate) fn allows_method(&self, method: &str) -> bool {
        self.methods.contains(method)
    }

    pub(crate) fn methods_header_value(&self) -> Option<String> {
        if self.methods.is_empty() {
            return None;
        }

        Some(
            self.methods
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }

    pub(crate) fn expose_headers_value(&self) -> Option<String> {
        if self.expose_headers.is_empty() {
            return None;
        }

        Some(
            self.expose_headers
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
