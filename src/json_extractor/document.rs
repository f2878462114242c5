use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ExtractError, ExtractResult, InputOrigin};
use crate::utils::preview;
use super::prescan::{nesting_depth, replace_lone_surrogates};
use super::traversal::{discover_keys, extract_values, TraversalLimits};

/// A parsed JSON document together with its key set
///
/// Object properties keep the order they were written in, so values come
/// back in the same order a reader sees them in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDocument {
    root: Value,
    keys: Vec<String>,
    limits: TraversalLimits,
}

impl JsonDocument {
    /// Parses `text` and discovers its keys
    ///
    /// Returns `Ok(None)` for blank input, which is not an error: there is
    /// simply nothing to extract from yet.
    pub fn parse(text: &str, origin: InputOrigin, limits: TraversalLimits) -> ExtractResult<Option<Self>> {
        if text.trim().is_empty() {
            debug!("Blank JSON input, nothing to parse");
            return Ok(None);
        }

        // A container at `max_depth + 1` may still be empty, anything deeper
        // is rejected by traversal anyway
        let depth = nesting_depth(text);
        if depth > limits.max_depth + 1 {
            warn!("JSON input nested {} levels deep, limit is {}", depth, limits.max_depth);
            return Err(ExtractError::DepthLimitExceeded { limit: limits.max_depth });
        }

        let text = replace_lone_surrogates(text);
        let root = parse_value(&text).map_err(|source| {
            warn!("Failed to parse JSON input ({:?}): {}", origin, source);
            ExtractError::InvalidJson { origin, source }
        })?;

        Self::from_value(root, limits).map(Some)
    }

    /// Wraps an already parsed value
    pub fn from_value(root: Value, limits: TraversalLimits) -> ExtractResult<Self> {
        let keys = discover_keys(&root, limits)?;
        info!("Parsed JSON document with {} distinct keys", keys.len());
        Ok(Self { root, keys, limits })
    }

    /// All distinct keys, sorted ascending
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.keys.binary_search_by(|k| k.as_str().cmp(key)).is_ok()
    }

    /// Every value assigned to `key` anywhere in the document
    ///
    /// A key that never occurs yields an empty list.
    pub fn values_for(&self, key: &str) -> ExtractResult<Vec<Value>> {
        if !self.contains_key(key) {
            debug!("Key '{}' not present in document", preview(key, 40));
            return Ok(Vec::new());
        }
        extract_values(&self.root, key, self.limits)
    }
}

/// Parses one complete JSON value
///
/// Nesting has already been bounded by the caller, so the parser's own
/// recursion limit is lifted.
fn parse_value(text: &str) -> serde_json::Result<Value> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let root = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_input_is_not_an_error() {
        let doc = JsonDocument::parse("   \n\t", InputOrigin::Typed, TraversalLimits::default()).unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn test_invalid_input_reports_origin() {
        let err = JsonDocument::parse("{oops", InputOrigin::File, TraversalLimits::default()).unwrap_err();
        assert!(matches!(err, ExtractError::InvalidJson { origin: InputOrigin::File, .. }));
    }

    #[test]
    fn test_unknown_key_yields_empty_list() {
        let doc = JsonDocument::parse(r#"{"a":1}"#, InputOrigin::Typed, TraversalLimits::default())
            .unwrap()
            .unwrap();
        assert!(doc.values_for("missing").unwrap().is_empty());
        assert_eq!(doc.values_for("a").unwrap(), vec![json!(1)]);
    }

    #[test]
    fn test_duplicate_keys_keep_last_value() {
        let doc = JsonDocument::parse(r#"{"a":1,"b":2,"a":3}"#, InputOrigin::Typed, TraversalLimits::default())
            .unwrap()
            .unwrap();
        assert_eq!(doc.values_for("a").unwrap(), vec![json!(3)]);
        assert_eq!(doc.keys(), ["a", "b"]);
    }

    fn nested_arrays(levels: usize) -> String {
        format!("{}1{}", "[".repeat(levels), "]".repeat(levels))
    }

    #[test]
    fn test_deep_nesting_within_limit_parses() {
        let doc = JsonDocument::parse(&nested_arrays(200), InputOrigin::Typed, TraversalLimits::default())
            .unwrap()
            .unwrap();
        assert!(doc.keys().is_empty());
    }

    #[test]
    fn test_deep_nesting_beyond_limit_is_a_depth_error() {
        let err = JsonDocument::parse(&nested_arrays(600), InputOrigin::Typed, TraversalLimits::default())
            .unwrap_err();
        assert!(matches!(err, ExtractError::DepthLimitExceeded { limit: 512 }));

        let limits = TraversalLimits::default().with_max_depth(3);
        assert!(JsonDocument::parse(&nested_arrays(3), InputOrigin::Typed, limits).unwrap().is_some());
        assert!(JsonDocument::parse("[[[[]]]]", InputOrigin::Typed, limits).unwrap().is_some());
        for text in [nested_arrays(4), "[[[[[]]]]]".to_string()] {
            assert!(matches!(
                JsonDocument::parse(&text, InputOrigin::Typed, limits).unwrap_err(),
                ExtractError::DepthLimitExceeded { limit: 3 }
            ));
        }
    }

    #[test]
    fn test_out_of_range_numbers_parse() {
        let doc = JsonDocument::parse(r#"{"a":1e400,"b":-1e400}"#, InputOrigin::Typed, TraversalLimits::default())
            .unwrap()
            .unwrap();
        assert_eq!(doc.keys(), ["a", "b"]);
        assert_eq!(doc.values_for("a").unwrap().len(), 1);
    }

    #[test]
    fn test_lone_surrogate_becomes_replacement_character() {
        let doc = JsonDocument::parse(r#"{"s":"x\ud800y"}"#, InputOrigin::Typed, TraversalLimits::default())
            .unwrap()
            .unwrap();
        assert_eq!(doc.values_for("s").unwrap(), vec![json!("x\u{FFFD}y")]);
    }
}
