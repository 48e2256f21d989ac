use indexmap::IndexMap;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::constants::DEFAULT_RESOURCE_PATTERN;
use crate::options::CorsOptions;
use crate::pattern::Pattern;
use crate::policy::{ConfigurationError, Policy};

static CATCH_ALL: Lazy<Pattern> = Lazy::new(|| Pattern::compile(DEFAULT_RESOURCE_PATTERN));

/// Declares which paths receive CORS handling and which per-resource
/// option overrides apply to each.
#[derive(Clone, Debug)]
pub enum Resources {
    /// One path pattern sharing the application options.
    Single(Pattern),
    /// Several path patterns sharing the application options.
    List(Vec<Pattern>),
    /// Path patterns carrying their own option overrides.
    Map(Vec<(Pattern, CorsOptions)>),
}

impl Resources {
    pub fn list<I, T>(patterns: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Pattern>,
    {
        Resources::List(patterns.into_iter().map(Into::into).collect())
    }

    pub fn map<I, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (T, CorsOptions)>,
        T: Into<Pattern>,
    {
        Resources::Map(
            entries
                .into_iter()
                .map(|(pattern, options)| (pattern.into(), options))
                .collect(),
        )
    }

    fn into_entries(self) -> Vec<(Pattern, Option<CorsOptions>)> {
        match self {
            Resources::Single(pattern) => vec![(pattern, None)],
            Resources::List(patterns) => {
                patterns.into_iter().map(|pattern| (pattern, None)).collect()
            }
            Resources::Map(entries) => entries
                .into_iter()
                .map(|(pattern, options)| (pattern, Some(options)))
                .collect(),
        }
    }
}

impl Default for Resources {
    fn default() -> Self {
        Resources::Single(CATCH_ALL.clone())
    }
}

impl From<&str> for Resources {
    fn from(value: &str) -> Self {
        Resources::Single(Pattern::compile(value))
    }
}

impl From<String> for Resources {
    fn from(value: String) -> Self {
        Resources::Single(Pattern::compile(&value))
    }
}

impl From<Pattern> for Resources {
    fn from(value: Pattern) -> Self {
        Resources::Single(value)
    }
}

impl<const N: usize> From<[&str; N]> for Resources {
    fn from(value: [&str; N]) -> Self {
        Resources::list(value)
    }
}

impl<const N: usize> From<[(&str, CorsOptions); N]> for Resources {
    fn from(value: [(&str, CorsOptions); N]) -> Self {
        Resources::map(value)
    }
}

impl From<IndexMap<String, CorsOptions>> for Resources {
    fn from(value: IndexMap<String, CorsOptions>) -> Self {
        Resources::Map(
            value
                .into_iter()
                .map(|(pattern, options)| (Pattern::compile(&pattern), options))
                .collect(),
        )
    }
}

/// A path pattern bound to its fully resolved policy.
#[derive(Clone, Debug)]
pub struct Resource {
    pattern: Pattern,
    policy: Policy,
}

impl Resource {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}

/// Routes request paths to the most specific registered resource.
///
/// Every policy is resolved once here; per-request lookups only run
/// pattern matches.
#[derive(Clone, Debug)]
pub struct ResourceRouter {
    resources: Vec<Resource>,
}

impl ResourceRouter {
    pub fn new(
        resources: Resources,
        app_options: &CorsOptions,
    ) -> Result<Self, ConfigurationError> {
        let mut resolved = Vec::new();

        for (pattern, overrides) in resources.into_entries() {
            let policy = match &overrides {
                Some(options) => Policy::resolve(&[app_options, options])?,
                None => Policy::resolve(&[app_options])?,
            };

            resolved.push(Resource { pattern, policy });
        }

        // longest pattern first; ties keep registration order
        resolved.sort_by(|a, b| b.pattern.as_str().len().cmp(&a.pattern.as_str().len()));

        debug!(
            patterns = ?resolved.iter().map(|resource| resource.pattern.as_str()).collect::<Vec<_>>(),
            "registered CORS resources"
        );

        Ok(Self {
            resources: resolved,
        })
    }

    /// First resource whose pattern matches `path`. Paths compare
    /// case-sensitively.
    pub fn find(&self, path: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|resource| resource.pattern.matches(path, true))
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }
}

#[cfg(test)]
#[path = "resources_test.rs"]
mod resources_test;
