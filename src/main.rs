use anyhow::Result;
use clap::Parser;
use data_extractor::cli::{run_keys, run_urls, run_values, Cli, Command};
use data_extractor::config::AppConfig;
use data_extractor::utils::logger::{init_logger, level_for_verbosity};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if cli.log_dir.is_some() {
        config.log_dir = cli.log_dir.clone();
    }

    // Initialize logger
    init_logger(config.log_dir.as_deref(), level_for_verbosity(cli.verbose))?;

    match cli.command {
        Command::Keys(args) => run_keys(args, &config),
        Command::Values(args) => run_values(args, &config),
        Command::Urls(args) => run_urls(args, &config),
    }
}
