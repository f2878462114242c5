//! Command line definitions and command handlers.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::config::AppConfig;
use crate::export::{export_urls, export_values, Export, ExportFormat};
use crate::session::{JsonSession, UrlSession};
use crate::url_extractor::{FileCategory, SortOption};

/// Extract keys and values from JSON, or URLs from any text.
#[derive(Debug, Parser)]
#[command(name = "data_extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to a timestamped file in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every key in a JSON document
    Keys(KeysArgs),

    /// Extract every value stored under a key
    Values(ValuesArgs),

    /// Extract, filter and sort URLs found in text
    Urls(UrlsArgs),
}

/// Where output goes
#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Write to this file instead of stdout
    #[arg(short, long, conflicts_with = "output_dir")]
    pub output: Option<PathBuf>,

    /// Save under the default file name in this directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct KeysArgs {
    /// Input file; reads stdin when absent or `-`
    pub input: Option<PathBuf>,

    /// Only list keys containing this text (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
}

#[derive(Debug, Parser)]
pub struct ValuesArgs {
    /// Input file; reads stdin when absent or `-`
    pub input: Option<PathBuf>,

    /// Key whose values to extract
    #[arg(short, long)]
    pub key: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Parser)]
pub struct UrlsArgs {
    /// Input file; reads stdin when absent or `-`
    pub input: Option<PathBuf>,

    /// Keep repeated URLs instead of collapsing them
    #[arg(short, long)]
    pub all: bool,

    /// Only keep URLs whose path ends with this extension (repeatable)
    #[arg(short = 't', long = "type", value_name = "EXT")]
    pub types: Vec<String>,

    /// Only keep URLs with an extension from this category (repeatable)
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<FileCategory>,

    /// Only keep URLs matching this regular expression (case-insensitive)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// Sort order
    #[arg(long, value_enum)]
    pub sort: Option<SortOption>,

    #[command(flatten)]
    pub output: OutputArgs,
}

/// Reads the input file, or stdin for `None` and `-`
fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Sends an export to a file, a directory, or stdout
fn emit(export: &Export, output: &OutputArgs, config: &AppConfig) -> Result<()> {
    if let Some(path) = &output.output {
        return export.save_as(path);
    }
    if let Some(dir) = output.output_dir.as_ref().or(config.export.output_dir.as_ref()) {
        let path = export.save_in(dir)?;
        eprintln!("Saved {}", path.display());
        return Ok(());
    }
    if !export.format.is_textual() {
        bail!("{} output is binary; use --output or --output-dir", export.format);
    }
    let text = export.as_text().context("Export is not valid UTF-8")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", text)?;
    Ok(())
}

#[instrument(level = "debug", skip_all)]
pub fn run_keys(args: KeysArgs, config: &AppConfig) -> Result<()> {
    let mut session = JsonSession::new(config.traversal_limits());
    load_json(&mut session, args.input.as_deref())?;
    if let Some(search) = args.search {
        session.set_key_search(search);
    }

    let keys = session.filtered_keys();
    if keys.is_empty() {
        eprintln!("{}", session.key_picker_label());
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    for key in keys {
        writeln!(stdout, "{}", key)?;
    }
    Ok(())
}

#[instrument(level = "debug", skip_all, fields(key = %args.key))]
pub fn run_values(args: ValuesArgs, config: &AppConfig) -> Result<()> {
    let mut session = JsonSession::new(config.traversal_limits());
    load_json(&mut session, args.input.as_deref())?;
    session.select_key(args.key.as_str());

    if session.values().is_empty() {
        eprintln!("No values found for key \"{}\"", args.key);
        return Ok(());
    }

    info!("Extracted {} values for '{}'", session.values().len(), args.key);
    let format = args.output.format.unwrap_or(config.export.format);
    let export = export_values(&args.key, session.values(), format)?;
    emit(&export, &args.output, config)
}

#[instrument(level = "debug", skip_all)]
pub fn run_urls(args: UrlsArgs, config: &AppConfig) -> Result<()> {
    let mut options = config.url_options();
    if args.all {
        options.unique = false;
    }
    for extension in &args.types {
        options.file_types.insert(extension);
    }
    for category in &args.categories {
        for extension in category.extensions() {
            options.file_types.insert(extension);
        }
    }
    if let Some(pattern) = args.pattern {
        options.pattern = pattern;
    }
    if let Some(sort) = args.sort {
        options.sort = sort;
    }

    let mut session = UrlSession::new(options);
    let text = read_input(args.input.as_deref())?;
    session.set_input(text);

    // The filter is skipped, the rest of the list is still written
    if let Some(error) = session.pattern_error() {
        eprintln!("{} ({})", error, session.options().pattern);
    }
    if session.urls().is_empty() {
        eprintln!("No URLs found");
        return Ok(());
    }

    info!("{} of {} URLs after filtering", session.urls().len(), session.raw_urls().len());
    let format = args.output.format.unwrap_or(config.export.format);
    let export = export_urls(session.urls(), format)?;
    emit(&export, &args.output, config)
}

fn load_json(session: &mut JsonSession, input: Option<&Path>) -> Result<()> {
    match input {
        Some(path) if path != Path::new("-") => session.load_file(path)?,
        _ => {
            let text = read_input(None)?;
            session.set_input(text);
        }
    }
    if let Some(message) = session.error_message() {
        bail!("{}", message);
    }
    Ok(())
}
