//! URL discovery, filtering and sorting over free text
//!
//! `scan_urls` pulls URL-shaped tokens out of the text; `process_urls` then
//! narrows and orders them according to `UrlOptions`.

pub mod file_types;
pub mod filters;
pub mod pipeline;
pub mod scanner;
pub mod sorter;


pub use file_types::FileCategory;
pub use filters::{dedupe, FileTypeFilter, UrlPattern};
pub use pipeline::{filter_and_sort, process_urls, PipelineOutput, UrlOptions};
pub use scanner::scan_urls;
pub use sorter::{sort_urls, SortOption};

/// Heading used when the URL list is rendered for print or PDF
pub fn summary_heading(count: usize) -> String {
    format!("Extracted URLs ({})", count)
}
