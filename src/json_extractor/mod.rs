//! JSON key discovery and value extraction
//!
//! Parses a JSON document once, then answers two questions about it: which
//! object keys appear anywhere in the tree, and which values were assigned to
//! a given key name at any depth.

pub mod document;
pub mod keys;
pub mod prescan;
pub mod traversal;


pub use document::JsonDocument;
pub use keys::{filter_keys, key_picker_label};
pub use traversal::{discover_keys, extract_values, TraversalLimits, DEFAULT_MAX_DEPTH};
