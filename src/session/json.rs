use anyhow::Result;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{ExtractError, InputOrigin};
use crate::json_extractor::{filter_keys, key_picker_label, JsonDocument, TraversalLimits};
use super::read_input_file;

/// State of the JSON key extractor
#[derive(Debug, Default)]
pub struct JsonSession {
    input: String,
    limits: TraversalLimits,
    document: Option<JsonDocument>,
    key_search: String,
    selected_key: Option<String>,
    values: Vec<Value>,
    error: Option<ExtractError>,
}

impl JsonSession {
    pub fn new(limits: TraversalLimits) -> Self {
        Self { limits, ..Self::default() }
    }

    /// Replaces the input with typed or pasted text
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.replace_input(text.into(), InputOrigin::Typed);
    }

    /// Replaces the input with the contents of a file
    ///
    /// Only an unreadable file is an error here; invalid JSON in a readable
    /// file is reported through [`JsonSession::error`] like typed input.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let text = read_input_file(path)?;
        self.replace_input(text, InputOrigin::File);
        Ok(())
    }

    fn replace_input(&mut self, text: String, origin: InputOrigin) {
        self.input = text;
        self.selected_key = None;
        self.key_search.clear();

        match JsonDocument::parse(&self.input, origin, self.limits) {
            Ok(document) => {
                self.document = document;
                self.error = None;
            }
            Err(e) => {
                warn!("JSON input rejected: {}", e);
                self.document = None;
                self.error = Some(e);
            }
        }
        self.recompute();
    }

    pub fn set_key_search(&mut self, query: impl Into<String>) {
        self.key_search = query.into();
    }

    /// Selects a key and extracts its values
    ///
    /// An empty key clears the selection.
    pub fn select_key(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.selected_key = if key.is_empty() { None } else { Some(key) };
        self.recompute();
    }

    pub fn clear_selection(&mut self) {
        self.selected_key = None;
        self.recompute();
    }

    /// Rebuilds the value list from the document and the selected key
    fn recompute(&mut self) {
        self.values = match (&self.document, &self.selected_key) {
            (Some(document), Some(key)) => match document.values_for(key) {
                Ok(values) => values,
                Err(e) => {
                    warn!("Value extraction failed: {}", e);
                    self.error = Some(e);
                    Vec::new()
                }
            },
            _ => Vec::new(),
        };
        debug!(
            "Recomputed JSON session: {} keys, {} values",
            self.keys().len(),
            self.values.len()
        );
        if let Some(key) = &self.selected_key {
            info!("Key '{}' has {} values", key, self.values.len());
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn document(&self) -> Option<&JsonDocument> {
        self.document.as_ref()
    }

    /// Every key in the document, sorted
    pub fn keys(&self) -> &[String] {
        self.document.as_ref().map(JsonDocument::keys).unwrap_or_default()
    }

    pub fn key_search(&self) -> &str {
        &self.key_search
    }

    /// Keys matching the current search text
    pub fn filtered_keys(&self) -> Vec<&str> {
        filter_keys(self.keys(), &self.key_search)
    }

    pub fn key_picker_label(&self) -> String {
        key_picker_label(self.keys().len(), self.filtered_keys().len())
    }

    pub fn selected_key(&self) -> Option<&str> {
        self.selected_key.as_deref()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn error(&self) -> Option<&ExtractError> {
        self.error.as_ref()
    }

    /// User-facing error text, if the input was rejected
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    const SAMPLE: &str = r#"{"a":{"b":1},"c":[{"b":2},{"d":3}]}"#;

    #[test]
    fn test_select_key_extracts_values() {
        let mut session = JsonSession::default();
        session.set_input(SAMPLE);
        assert_eq!(session.keys(), ["a", "b", "c", "d"]);

        session.select_key("b");
        assert_eq!(session.values(), [json!(1), json!(2)]);
        assert_eq!(session.selected_key(), Some("b"));
    }

    #[test]
    fn test_invalid_input_clears_derived_state() {
        let mut session = JsonSession::default();
        session.set_input(SAMPLE);
        session.select_key("b");

        session.set_input("not json");
        assert_eq!(session.error_message().as_deref(), Some("Invalid JSON format."));
        assert!(session.keys().is_empty());
        assert!(session.values().is_empty());
        assert!(session.document().is_none());
        assert_eq!(session.input(), "not json");
    }

    #[test]
    fn test_blank_input_resets_without_error() {
        let mut session = JsonSession::default();
        session.set_input("not json");
        session.set_input("   ");
        assert!(session.error().is_none());
        assert!(session.keys().is_empty());
    }

    #[test]
    fn test_new_input_clears_selection_and_search() {
        let mut session = JsonSession::default();
        session.set_input(SAMPLE);
        session.set_key_search("B");
        session.select_key("b");

        session.set_input(r#"{"b":5}"#);
        assert_eq!(session.selected_key(), None);
        assert_eq!(session.key_search(), "");
        assert!(session.values().is_empty());
    }

    #[test]
    fn test_key_search_is_a_view() {
        let mut session = JsonSession::default();
        session.set_input(SAMPLE);
        session.set_key_search("D");

        assert_eq!(session.filtered_keys(), vec!["d"]);
        assert_eq!(session.keys().len(), 4);
        assert_eq!(session.key_picker_label(), "1 of 4 keys... Select a key");

        session.set_key_search("zzz");
        assert_eq!(session.key_picker_label(), "No matching keys found");
    }

    #[test]
    fn test_unknown_key_is_empty_not_error() {
        let mut session = JsonSession::default();
        session.set_input(SAMPLE);
        session.select_key("missing");
        assert!(session.values().is_empty());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_load_file_uses_file_message() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{broken").unwrap();

        let mut session = JsonSession::default();
        session.load_file(file.path()).unwrap();
        assert_eq!(
            session.error_message().as_deref(),
            Some("Invalid JSON format in the uploaded file.")
        );
        assert_eq!(session.input(), "{broken");
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let mut session = JsonSession::default();
        assert!(session.load_file(Path::new("/definitely/not/here.json")).is_err());
    }
}
