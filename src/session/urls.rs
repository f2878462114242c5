use anyhow::Result;
use std::path::Path;
use tracing::{debug, instrument};

use crate::error::ExtractError;
use crate::url_extractor::{filter_and_sort, scan_urls, FileCategory, SortOption, UrlOptions, UrlPattern};
use super::read_input_file;

/// State of the URL extractor
#[derive(Debug, Default)]
pub struct UrlSession {
    input: String,
    raw_urls: Vec<String>,
    options: UrlOptions,
    urls: Vec<String>,
    /// Compiled form of `options.pattern`, rebuilt only when it changes
    pattern: Option<UrlPattern>,
    pattern_error: Option<ExtractError>,
}

impl UrlSession {
    /// An empty session; the pattern is compiled once here
    pub fn new(options: UrlOptions) -> Self {
        let mut session = Self { options, ..Self::default() };
        session.compile_pattern();
        session
    }

    /// Replaces the input text and rescans it
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.raw_urls = scan_urls(&self.input);
        self.recompute();
    }

    /// Replaces the input with the contents of a file
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let text = read_input_file(path)?;
        self.set_input(text);
        Ok(())
    }

    pub fn set_unique(&mut self, unique: bool) {
        self.options.unique = unique;
        self.recompute();
    }

    pub fn toggle_file_type(&mut self, extension: &str) {
        self.options.file_types.toggle(extension);
        self.recompute();
    }

    pub fn toggle_category(&mut self, category: FileCategory) {
        self.options.file_types.toggle_category(category);
        self.recompute();
    }

    pub fn clear_file_types(&mut self) {
        self.options.file_types.clear();
        self.recompute();
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.options.pattern = pattern.into();
        self.compile_pattern();
        self.recompute();
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        self.options.sort = sort;
        self.recompute();
    }

    fn compile_pattern(&mut self) {
        match UrlPattern::compile(&self.options.pattern) {
            Ok(pattern) => {
                self.pattern = pattern;
                self.pattern_error = None;
            }
            Err(e) => {
                self.pattern = None;
                self.pattern_error = Some(e);
            }
        }
    }

    /// Runs the whole filter and sort pipeline again from the raw list
    #[instrument(level = "trace", skip(self))]
    fn recompute(&mut self) {
        self.urls = filter_and_sort(&self.raw_urls, &self.options, self.pattern.as_ref());
        debug!("Recomputed URL session: {} raw, {} shown", self.raw_urls.len(), self.urls.len());
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn options(&self) -> &UrlOptions {
        &self.options
    }

    /// Every URL occurrence found in the input
    pub fn raw_urls(&self) -> &[String] {
        &self.raw_urls
    }

    /// The filtered and sorted list
    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn is_pattern_valid(&self) -> bool {
        self.pattern_error.is_none()
    }

    pub fn pattern_error(&self) -> Option<&ExtractError> {
        self.pattern_error.as_ref()
    }

    /// Label for the file type dropdown
    pub fn file_type_label(&self) -> String {
        match self.options.file_types.extensions().len() {
            0 => "Filter by File Type".to_string(),
            n => format!("Filter by Type ({})", n),
        }
    }
}
