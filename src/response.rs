use indexmap::IndexMap;
use tracing::debug;

use crate::constants::header;
use crate::util::equals_ignore_case;

/// Header names to values, in insertion order.
pub type Headers = IndexMap<String, String>;

/// Mutable response state threaded through decoration. Hosts copy the
/// final header map back onto their concrete response type.
#[derive(Clone, Debug, Default)]
pub struct ResponseContext {
    headers: Headers,
    decided: bool,
}

impl ResponseContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the context with headers already present on the response so
    /// that `Vary` entries merge instead of clobbering each other.
    pub fn with_headers(headers: Headers) -> Self {
        Self {
            headers,
            decided: false,
        }
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Case-insensitive lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether a CORS evaluation has already been recorded. Once set, the
    /// flag never clears for the lifetime of the response.
    pub fn is_decided(&self) -> bool {
        self.decided
    }

    /// Records an evaluation without writing any headers.
    pub fn mark_decided(&mut self) {
        self.decided = true;
    }

    /// Writes `headers` onto the response and records the evaluation. The
    /// first decoration wins; later calls are skipped entirely.
    pub fn decorate(&mut self, headers: Headers) {
        if self.decided {
            debug!("response already carries a CORS evaluation, skipping");
            return;
        }

        for (name, value) in headers {
            if name.eq_ignore_ascii_case(header::VARY) {
                self.merge_vary(&value);
            } else {
                self.headers.insert(name, value);
            }
        }

        self.decided = true;
    }

    /// Folds `value` into any existing `Vary` header, deduplicating
    /// entries case-insensitively and preserving the existing key casing.
    fn merge_vary(&mut self, value: &str) {
        let existing_key = self
            .headers
            .keys()
            .find(|key| key.eq_ignore_ascii_case(header::VARY))
            .cloned();

        let mut entries: Vec<String> = existing_key
            .as_deref()
            .and_then(|key| self.headers.get(key))
            .map(|existing| {
                existing
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        for part in value.split(',') {
            let part = part.trim();

            if part.is_empty() {
                continue;
            }

            if entries.iter().any(|entry| equals_ignore_case(entry, part)) {
                continue;
            }

            entries.push(part.to_string());
        }

        if entries.is_empty() {
            return;
        }

        let key = existing_key.unwrap_or_else(|| header::VARY.to_string());
        self.headers.insert(key, entries.join(", "));
    }

    pub fn into_headers(self) -> Headers {
        self.headers
    }
}

#[cfg(test)]
#[path = "response_test.rs"]
mod response_test;
