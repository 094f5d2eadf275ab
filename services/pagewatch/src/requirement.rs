//! Requirement checkers and the registry that dispatches to them by name

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use regex::Regex;

use crate::config::Requirement;
use crate::{PagewatchError, Result};

pub const CONTENT_INCLUDES: &str = "content_includes";
pub const CONTENT_DOES_NOT_INCLUDE: &str = "content_does_not_include";

/// A pure predicate over a response body
pub trait RequirementChecker: Send + Sync + fmt::Debug {
    /// Name used to reference this checker from the config file
    fn name(&self) -> &str;

    /// Evaluate the requirement against the response text
    fn evaluate(&self, text: &str, params: &[String]) -> Result<bool>;
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| PagewatchError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

/// Passes when every parameter, as a regular expression, matches somewhere in the text
#[derive(Debug, Default)]
pub struct ContentIncludes;

impl RequirementChecker for ContentIncludes {
    fn name(&self) -> &str {
        CONTENT_INCLUDES
    }

    fn evaluate(&self, text: &str, params: &[String]) -> Result<bool> {
        for pattern in params {
            if !compile(pattern)?.is_match(text) {
                tracing::info!("Pattern {:?} not found in response body:\n{}", pattern, text);
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Fails as soon as any parameter, as a regular expression, matches the text
#[derive(Debug, Default)]
pub struct ContentDoesNotInclude;

impl RequirementChecker for ContentDoesNotInclude {
    fn name(&self) -> &str {
        CONTENT_DOES_NOT_INCLUDE
    }

    fn evaluate(&self, text: &str, params: &[String]) -> Result<bool> {
        for pattern in params {
            if compile(pattern)?.is_match(text) {
                tracing::debug!("Forbidden pattern {:?} found in response body", pattern);
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Maps requirement names to checkers
#[derive(Debug, Clone, Default)]
pub struct RequirementRegistry {
    checkers: HashMap<String, Arc<dyn RequirementChecker>>,
}

impl RequirementRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in content checkers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(ContentIncludes));
        registry.register(Arc::new(ContentDoesNotInclude));
        registry
    }

    /// Register a checker under its own name, replacing any previous one
    pub fn register(&mut self, checker: Arc<dyn RequirementChecker>) {
        self.checkers.insert(checker.name().to_string(), checker);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn RequirementChecker>> {
        self.checkers.get(name)
    }

    /// Look up the requirement's checker and evaluate it against `text`
    pub fn evaluate(&self, requirement: &Requirement, text: &str) -> Result<bool> {
        let checker = self
            .get(&requirement.name)
            .ok_or_else(|| PagewatchError::UnknownRequirement(requirement.name.clone()))?;
        checker.evaluate(text, &requirement.params)
    }
}
