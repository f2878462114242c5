use tracing::{debug, instrument};

use crate::error::ExtractError;
use super::filters::{dedupe, FileTypeFilter, UrlPattern};
use super::sorter::{sort_urls, SortOption};

/// User-selected filter and sort parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlOptions {
    /// Collapse repeated URLs to their first occurrence
    pub unique: bool,
    pub file_types: FileTypeFilter,
    /// Regular expression text; empty means no pattern
    pub pattern: String,
    pub sort: SortOption,
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self {
            unique: true,
            file_types: FileTypeFilter::default(),
            pattern: String::new(),
            sort: SortOption::default(),
        }
    }
}

/// Result of one pipeline run
#[derive(Debug)]
pub struct PipelineOutput {
    /// Filtered and sorted URLs, ready for display and export
    pub urls: Vec<String>,
    /// Set when the pattern did not compile; the pattern was then skipped
    pub pattern_error: Option<ExtractError>,
}

impl PipelineOutput {
    pub fn pattern_is_valid(&self) -> bool {
        self.pattern_error.is_none()
    }
}

/// Runs uniqueness, file type, pattern and sort, in that order
///
/// Always starts again from the raw list. An invalid pattern does not
/// exclude anything; the error is reported alongside the result instead.
#[instrument(level = "debug", skip_all, fields(raw = raw.len(), sort = %options.sort))]
pub fn process_urls(raw: &[String], options: &UrlOptions) -> PipelineOutput {
    let (pattern, pattern_error) = match UrlPattern::compile(&options.pattern) {
        Ok(pattern) => (pattern, None),
        Err(e) => (None, Some(e)),
    };

    PipelineOutput {
        urls: filter_and_sort(raw, options, pattern.as_ref()),
        pattern_error,
    }
}

/// The stages of [`process_urls`] with the pattern already compiled
///
/// `options.pattern` is ignored; `pattern` is applied instead when present.
pub fn filter_and_sort(raw: &[String], options: &UrlOptions, pattern: Option<&UrlPattern>) -> Vec<String> {
    let urls = if options.unique { dedupe(raw) } else { raw.to_vec() };
    debug!("{} URLs after uniqueness stage", urls.len());

    let urls = options.file_types.apply(urls);
    let urls = match pattern {
        Some(pattern) => pattern.apply(urls),
        None => urls,
    };

    sort_urls(urls, options.sort)
}
