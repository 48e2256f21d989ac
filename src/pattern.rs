use crate::util::equals_ignore_case;
use regex_automata::meta::{BuildError, Regex};
use regex_automata::{Anchored, Input};
use std::fmt;
use thiserror::Error;

const MAX_PATTERN_LENGTH: usize = 50_000;

/// Characters that mark a configured value as regex-shaped rather than a
/// plain literal. A marked value compiles as a regex and falls back to
/// literal matching when the compile fails.
const REGEX_MARKERS: &[char] = &['*', '\\', '?', '$', '^', '[', ']', '(', ')'];

/// Errors produced when a pattern is explicitly requested as a regex.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile pattern `{pattern}`")]
    Build {
        pattern: String,
        #[source]
        source: Box<BuildError>,
    },
    #[error("pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
}

/// A single origin, header, or path pattern, tagged at construction time.
#[derive(Clone)]
pub enum Pattern {
    /// `*` (or its regex spelling `.*`): matches every candidate.
    Wildcard,
    /// Exact string comparison.
    Literal(String),
    /// Anchored-at-start regular expression.
    Regex(PatternRegex),
}

/// A compiled pattern kept in both case-sensitive and case-insensitive
/// forms so the sensitivity can be chosen per call site (paths are
/// case-sensitive, origins and header names are not).
#[derive(Clone)]
pub struct PatternRegex {
    source: String,
    sensitive: Regex,
    insensitive: Regex,
}

impl PatternRegex {
    fn build(spec: &str) -> Result<Self, PatternError> {
        if spec.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: spec.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let sensitive = Regex::new(spec).map_err(|err| PatternError::Build {
            pattern: spec.to_owned(),
            source: Box::new(err),
        })?;
        let insensitive =
            Regex::new(&format!("(?i:{spec})")).map_err(|err| PatternError::Build {
                pattern: spec.to_owned(),
                source: Box::new(err),
            })?;

        Ok(Self {
            source: spec.to_owned(),
            sensitive,
            insensitive,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn is_match(&self, candidate: &str, case_sensitive: bool) -> bool {
        let regex = if case_sensitive {
            &self.sensitive
        } else {
            &self.insensitive
        };
        // Anchored at the start only, so `/api` matches `/api/v1/users`.
        regex.is_match(Input::new(candidate).anchored(Anchored::Yes))
    }
}

impl Pattern {
    /// Classifies an arbitrary configured value. Regex-shaped values that
    /// fail to compile degrade to literals so an unescaped user string can
    /// never take a request down.
    pub fn compile(spec: &str) -> Self {
        if spec == "*" || spec == ".*" {
            return Self::Wildcard;
        }
        if spec.contains(REGEX_MARKERS) {
            if let Ok(regex) = PatternRegex::build(spec) {
                return Self::Regex(regex);
            }
            return Self::Literal(spec.to_owned());
        }
        Self::Literal(spec.to_owned())
    }

    /// Builds a regex pattern, surfacing compile failures instead of
    /// falling back. Use this when the caller knows the value is a regex.
    pub fn regex(spec: &str) -> Result<Self, PatternError> {
        if spec == "*" || spec == ".*" {
            return Ok(Self::Wildcard);
        }
        PatternRegex::build(spec).map(Self::Regex)
    }

    pub fn literal<S: Into<String>>(spec: S) -> Self {
        Self::Literal(spec.into())
    }

    pub fn matches(&self, candidate: &str, case_sensitive: bool) -> bool {
        match self {
            Pattern::Wildcard => true,
            Pattern::Literal(value) => {
                if case_sensitive {
                    value == candidate
                } else {
                    equals_ignore_case(value, candidate)
                }
            }
            Pattern::Regex(regex) => regex.is_match(candidate, case_sensitive),
        }
    }

    /// Serialized form, used for specificity sorting and log lines.
    pub fn as_str(&self) -> &str {
        match self {
            Pattern::Wildcard => "*",
            Pattern::Literal(value) => value,
            Pattern::Regex(regex) => regex.source(),
        }
    }

    pub fn is_regex(&self) -> bool {
        matches!(self, Pattern::Regex(_))
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => f.write_str("Wildcard"),
            Pattern::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Pattern::Regex(regex) => f.debug_tuple("Regex").field(&regex.source).finish(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Pattern::Wildcard, Pattern::Wildcard) => true,
            (Pattern::Literal(a), Pattern::Literal(b)) => a == b,
            (Pattern::Regex(a), Pattern::Regex(b)) => a.source == b.source,
            _ => false,
        }
    }
}

impl Eq for Pattern {}

impl From<&str> for Pattern {
    fn from(value: &str) -> Self {
        Pattern::compile(value)
    }
}

impl From<String> for Pattern {
    fn from(value: String) -> Self {
        Pattern::compile(&value)
    }
}

/// An ordered pattern set with wildcard membership cached at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    wildcard: bool,
}

impl PatternSet {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        let wildcard = patterns
            .iter()
            .any(|pattern| matches!(pattern, Pattern::Wildcard));
        Self { patterns, wildcard }
    }

    pub fn compile<I, T>(specs: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Pattern>,
    {
        Self::new(specs.into_iter().map(Into::into).collect())
    }

    /// The default set: a single wildcard pattern.
    pub fn any() -> Self {
        Self::new(vec![Pattern::Wildcard])
    }

    pub fn has_wildcard(&self) -> bool {
        self.wildcard
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// First-match short-circuit over the ordered patterns.
    pub fn matches(&self, candidate: &str, case_sensitive: bool) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.matches(candidate, case_sensitive))
    }

    /// The literal members only; wildcard and regex shapes are excluded
    /// because they cannot be echoed as concrete origin values.
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().filter_map(|pattern| match pattern {
            Pattern::Literal(value) => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::any()
    }
}

#[cfg(test)]
#[path = "pattern_test.rs"]
mod pattern_test;
