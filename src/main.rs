//! uidl - UI message DTO generator
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use uidl::cli::{Cli, Commands};
use uidl::config::{Config, ConfigManager};
use uidl::error::{UidlError, UidlResult};

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, config: Option<&Config>) {
    // 0 = warn, 1 = info (one line per generated file), 2+ = debug
    let filter = match verbose {
        0 => EnvFilter::new("uidl=warn"),
        1 => EnvFilter::new("uidl=info"),
        _ => EnvFilter::new("uidl=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if config.is_some_and(|c| c.general.log_format == "json") {
        builder.json().init();
    } else {
        builder.without_time().init();
    }
}

async fn run() -> UidlResult<()> {
    let cli = Cli::parse();

    // Completions don't need config loading
    if let Commands::Completions(args) = cli.command {
        init_logging(cli.verbose, None);
        return uidl::cli::commands::completions(args);
    }

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    let local_config_path = if cli.no_local {
        None
    } else {
        let cwd =
            std::env::current_dir().map_err(|e| UidlError::io("getting current directory", e))?;
        ConfigManager::find_local_config(&cwd)
    };

    let config = config_manager
        .load_merged(local_config_path.as_deref())
        .await?;

    init_logging(cli.verbose, Some(&config));
    uidl::ui::init_theme();

    match (&local_config_path, cli.no_local) {
        (_, true) => debug!("Local config discovery disabled (--no-local)"),
        (Some(path), false) => debug!("Using local config: {}", path.display()),
        (None, false) => debug!("No local config found"),
    }

    // Dispatch to command
    match cli.command {
        Commands::Completions(_) => unreachable!("Completions handled above"),
        Commands::Generate(args) => uidl::cli::commands::generate(args, &config).await,
        Commands::Check(args) => uidl::cli::commands::check(args, &config).await,
        Commands::Config(args) => uidl::cli::commands::config(args, &config, cli.config).await,
    }
}
