//! Page configuration loaded from the JSON config file

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A named check plus its string parameters.
///
/// On disk a requirement is a JSON array whose first element is the checker
/// name, e.g. `["content_includes", "Example", "Domain"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Requirement {
    pub name: String,
    pub params: Vec<String>,
}

impl Requirement {
    pub fn new(name: impl Into<String>, params: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name: name.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for Requirement {
    type Error = String;

    fn try_from(parts: Vec<String>) -> Result<Self, Self::Error> {
        let mut parts = parts.into_iter();
        let name = parts
            .next()
            .ok_or_else(|| "requirement must start with a checker name".to_string())?;
        Ok(Self {
            name,
            params: parts.collect(),
        })
    }
}

impl From<Requirement> for Vec<String> {
    fn from(requirement: Requirement) -> Self {
        std::iter::once(requirement.name)
            .chain(requirement.params)
            .collect()
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// Configuration of a single page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub url: String,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

/// All configured pages, in the order they appear in the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagesConfig {
    pages: Vec<(String, PageConfig)>,
}

impl PagesConfig {
    pub fn new(pages: Vec<(String, PageConfig)>) -> Self {
        Self { pages }
    }

    /// Parse a config document: an object mapping page name to page config
    pub fn from_json(content: &str) -> crate::Result<Self> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;
        let mut pages = Vec::with_capacity(raw.len());
        for (name, value) in raw {
            let page: PageConfig = serde_json::from_value(value).map_err(|e| {
                crate::PagewatchError::Config(format!("Invalid config for page {:?}: {}", name, e))
            })?;
            pages.push((name, page));
        }
        Ok(Self { pages })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageConfig)> {
        self.pages.iter().map(|(name, page)| (name.as_str(), page))
    }

    pub fn get(&self, name: &str) -> Option<&PageConfig> {
        self.iter().find(|(n, _)| *n == name).map(|(_, page)| page)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Load page configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<PagesConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::PagewatchError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    PagesConfig::from_json(&content)
}
