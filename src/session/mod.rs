//! Explicit state for an interactive extraction session
//!
//! Each session type owns its raw input and every piece of state derived
//! from it. Mutating methods finish by recomputing the derived state from
//! scratch, so callers never observe a half-updated session.

pub mod json;
pub mod urls;
pub mod view;

pub use json::JsonSession;
pub use urls::UrlSession;
pub use view::{Mode, ViewState, COPIED_RESET};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Reads an uploaded file as text
pub(crate) fn read_input_file(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file {}", path.display()))?;
    debug!("Read {} bytes from {}", text.len(), path.display());
    Ok(text)
}
