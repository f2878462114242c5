//! Rendering of extracted data for saving, printing and copying
//!
//! Exporters receive finished data and only decide how it looks. Each one
//! returns an [`Export`] carrying a suggested file name, a MIME type and the
//! rendered bytes; writing them anywhere is up to the caller.

pub mod csv;
pub mod pdf;
pub mod print;
pub mod text;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Base file name for extracted JSON values
pub const VALUES_FILE_STEM: &str = "extracted_values";
/// Base file name for extracted URLs
pub const URLS_FILE_STEM: &str = "extracted_urls";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain text
    #[default]
    Text,
    /// Comma separated values
    Csv,
    /// Paginated PDF document
    Pdf,
    /// HTML page that opens the print dialog when loaded
    Print,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Print => "html",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Print => "text/html",
        }
    }

    /// Whether the rendered bytes are printable text
    pub fn is_textual(self) -> bool {
        !matches!(self, ExportFormat::Pdf)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Text => "text",
            ExportFormat::Csv => "csv",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Print => "print",
        };
        f.write_str(name)
    }
}

/// A rendered export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl Export {
    fn new(stem: &str, format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            format,
            file_name: format!("{}.{}", stem, format.extension()),
            mime_type: format.mime_type(),
            bytes,
        }
    }

    /// The content as text, for formats that are textual
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Writes the export into `dir` under its suggested file name
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        let path = dir.join(&self.file_name);
        self.save_as(&path)?;
        Ok(path)
    }

    /// Writes the export to an explicit path
    pub fn save_as(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Saved {} ({} bytes) to {}", self.mime_type, self.bytes.len(), path.display());
        Ok(())
    }
}

/// Renders the values extracted for `key` in the chosen format
pub fn export_values(key: &str, values: &[Value], format: ExportFormat) -> Result<Export> {
    let bytes = match format {
        ExportFormat::Text => text::values_to_text(values)?.into_bytes(),
        ExportFormat::Csv => csv::values_to_csv(key, values)?.into_bytes(),
        ExportFormat::Pdf => pdf::values_to_pdf(key, values)?,
        ExportFormat::Print => print::values_to_html(key, values)?.into_bytes(),
    };
    Ok(Export::new(VALUES_FILE_STEM, format, bytes))
}

/// Renders a URL list in the chosen format
pub fn export_urls(urls: &[String], format: ExportFormat) -> Result<Export> {
    let bytes = match format {
        ExportFormat::Text => text::urls_to_text(urls).into_bytes(),
        ExportFormat::Csv => csv::urls_to_csv(urls).into_bytes(),
        ExportFormat::Pdf => pdf::urls_to_pdf(urls)?,
        ExportFormat::Print => print::urls_to_html(urls).into_bytes(),
    };
    Ok(Export::new(URLS_FILE_STEM, format, bytes))
}
