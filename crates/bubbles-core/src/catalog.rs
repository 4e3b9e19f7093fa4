//! Prompt catalog: the JSON data file and the tag list derived from it.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tag value meaning "no tag filter applied".
pub const TAG_ALL: &str = "all";

/// One entry of the catalog. Loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug)]
pub enum CatalogError {
    Io(io::Error),
    Parse(serde_json::Error),
    DuplicateId(String),
}

impl From<io::Error> for CatalogError {
    fn from(e: io::Error) -> Self {
        CatalogError::Io(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e)
    }
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "cannot read prompt file: {e}"),
            CatalogError::Parse(e) => write!(f, "invalid prompt file: {e}"),
            CatalogError::DuplicateId(id) => write!(f, "duplicate prompt id: {id}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(e) => Some(e),
            CatalogError::Parse(e) => Some(e),
            CatalogError::DuplicateId(_) => None,
        }
    }
}

/// Read and parse the prompt file at `path`.
pub fn load_catalog(path: &Path) -> Result<Vec<Prompt>, CatalogError> {
    let content = fs::read_to_string(path)?;
    let prompts = parse_catalog(&content)?;
    tracing::info!(path = %path.display(), count = prompts.len(), "catalog loaded");
    Ok(prompts)
}

/// Parse a JSON array of prompts. Ids must be unique since they double as
/// deep-link anchors.
pub fn parse_catalog(json: &str) -> Result<Vec<Prompt>, CatalogError> {
    let prompts: Vec<Prompt> = serde_json::from_str(json)?;
    let mut seen = HashSet::new();
    for prompt in &prompts {
        if !seen.insert(prompt.id.as_str()) {
            return Err(CatalogError::DuplicateId(prompt.id.clone()));
        }
    }
    Ok(prompts)
}

/// `"all"` followed by every distinct tag, sorted for display.
pub fn unique_tags(prompts: &[Prompt]) -> Vec<String> {
    let distinct: BTreeSet<&str> = prompts
        .iter()
        .flat_map(|p| p.tags.iter().map(String::as_str))
        .collect();
    let mut tags: Vec<&str> = distinct.into_iter().collect();
    tags.sort_by(|a, b| compare_tags(a, b));

    let mut result = Vec::with_capacity(tags.len() + 1);
    result.push(TAG_ALL.to_string());
    result.extend(tags.into_iter().map(String::from));
    result
}

// Case-insensitive first so "Writing" sits next to "writing"; lowercase wins ties.
fn compare_tags(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
pub(crate) fn prompt(id: &str, title: &str, text: &str, tags: &[&str]) -> Prompt {
    Prompt {
        id: id.to_string(),
        title: title.to_string(),
        text: text.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}
