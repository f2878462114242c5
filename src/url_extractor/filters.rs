use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use tracing::{debug, trace, warn};
use url::Url;

use crate::error::{ExtractError, ExtractResult};
use super::file_types::{normalize_extension, FileCategory};

/// Collapses repeated URLs, keeping the first occurrence of each
pub fn dedupe(urls: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(urls.len());
    urls.iter()
        .filter(|url| seen.insert(url.as_str()))
        .cloned()
        .collect()
}

/// Keeps URLs whose path ends with one of a set of extensions
///
/// The path is taken from the parsed URL, so the query string and fragment
/// never count. A URL that does not parse never passes an active filter.
/// With no extensions selected every URL passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTypeFilter {
    extensions: Vec<String>,
}

impl FileTypeFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::default();
        for extension in extensions {
            filter.insert(extension.as_ref());
        }
        filter
    }

    pub fn is_active(&self) -> bool {
        !self.extensions.is_empty()
    }

    /// Selected extensions in the order they were chosen
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn contains(&self, extension: &str) -> bool {
        let extension = normalize_extension(extension);
        self.extensions.iter().any(|e| *e == extension)
    }

    /// Adds an extension; returns false if it was already selected
    pub fn insert(&mut self, extension: &str) -> bool {
        let extension = normalize_extension(extension);
        if self.extensions.contains(&extension) {
            return false;
        }
        self.extensions.push(extension);
        true
    }

    /// Selects the extension if absent, deselects it otherwise
    pub fn toggle(&mut self, extension: &str) {
        let extension = normalize_extension(extension);
        if let Some(pos) = self.extensions.iter().position(|e| *e == extension) {
            self.extensions.remove(pos);
        } else {
            self.extensions.push(extension);
        }
    }

    /// Selects every extension of a category, or clears them all if the
    /// whole category was already selected
    pub fn toggle_category(&mut self, category: FileCategory) {
        let all_selected = category.extensions().iter().all(|ext| self.contains(ext));
        if all_selected {
            self.extensions.retain(|e| !category.extensions().iter().any(|ext| *ext == e.as_str()));
        } else {
            for ext in category.extensions() {
                self.insert(ext);
            }
        }
    }

    pub fn clear(&mut self) {
        self.extensions.clear();
    }

    pub fn matches(&self, url: &str) -> bool {
        if !self.is_active() {
            return true;
        }
        match Url::parse(url) {
            Ok(parsed) => {
                let path = parsed.path().to_lowercase();
                self.extensions.iter().any(|ext| path.ends_with(ext.as_str()))
            }
            Err(e) => {
                trace!("Excluding unparseable URL '{}': {}", url, e);
                false
            }
        }
    }

    pub fn apply(&self, urls: Vec<String>) -> Vec<String> {
        if !self.is_active() {
            return urls;
        }
        let before = urls.len();
        let kept: Vec<String> = urls.into_iter().filter(|url| self.matches(url)).collect();
        debug!("File type filter kept {} of {} URLs", kept.len(), before);
        kept
    }
}

/// A user-supplied regular expression matched case-insensitively against
/// the whole URL
#[derive(Debug, Clone)]
pub struct UrlPattern {
    source: String,
    regex: Regex,
}

impl UrlPattern {
    /// Compiles a pattern; empty text means no pattern at all
    pub fn compile(pattern: &str) -> ExtractResult<Option<Self>> {
        if pattern.is_empty() {
            return Ok(None);
        }
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| {
                warn!("Rejected URL pattern '{}': {}", pattern, source);
                ExtractError::InvalidPattern { pattern: pattern.to_string(), source }
            })?;
        Ok(Some(Self { source: pattern.to_string(), regex }))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    pub fn apply(&self, urls: Vec<String>) -> Vec<String> {
        let before = urls.len();
        let kept: Vec<String> = urls.into_iter().filter(|url| self.is_match(url)).collect();
        debug!("Pattern '{}' kept {} of {} URLs", self.source, kept.len(), before);
        kept
    }
}
