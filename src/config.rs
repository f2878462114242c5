//! Layered application settings
//!
//! Defaults, then an optional TOML file, then `DATA_EXTRACTOR__*`
//! environment variables (`DATA_EXTRACTOR__URLS__SORT=domain`). Command line
//! flags are applied on top by the caller.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::export::ExportFormat;
use crate::json_extractor::{TraversalLimits, DEFAULT_MAX_DEPTH};
use crate::url_extractor::{FileTypeFilter, SortOption, UrlOptions};

/// File picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "data_extractor.toml";
pub const ENV_PREFIX: &str = "DATA_EXTRACTOR";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory for log files; logs go to stderr when unset
    pub log_dir: Option<String>,
    pub json: JsonConfig,
    pub urls: UrlConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub max_depth: usize,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct UrlConfig {
    pub unique: bool,
    pub sort: SortOption,
    /// Extensions selected by default, e.g. `[".pdf", ".zip"]`
    pub file_types: Vec<String>,
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            unique: true,
            sort: SortOption::default(),
            file_types: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    /// Directory exports are saved in when no explicit path is given
    pub output_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Loads settings from `path`, or from the default file if it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        match path {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                builder = builder.add_source(File::from(path).required(true));
            }
            None => {
                builder = builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
            }
        }

        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("urls.file_types")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to load configuration")?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    pub fn traversal_limits(&self) -> TraversalLimits {
        TraversalLimits::default().with_max_depth(self.json.max_depth)
    }

    pub fn url_options(&self) -> UrlOptions {
        UrlOptions {
            unique: self.urls.unique,
            file_types: FileTypeFilter::new(&self.urls.file_types),
            pattern: String::new(),
            sort: self.urls.sort,
        }
    }
}
