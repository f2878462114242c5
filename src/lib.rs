//! Key and value extraction from JSON documents, and URL extraction from
//! free text.
//!
//! The two pipelines are pure functions in [`json_extractor`] and
//! [`url_extractor`]. [`session`] wraps them in explicit state for
//! interactive use and [`export`] renders results for saving or printing.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod json_extractor;
pub mod session;
pub mod url_extractor;
pub mod utils;

pub use error::{ExtractError, ExtractResult, InputOrigin};
pub use json_extractor::{discover_keys, extract_values, JsonDocument, TraversalLimits};
pub use session::{JsonSession, UrlSession, ViewState};
pub use url_extractor::{process_urls, scan_urls, SortOption, UrlOptions};
