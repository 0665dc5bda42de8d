use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use chanview::cli::commands::{Cli, Commands};
use chanview::cli::handlers;
use chanview::io::config_io::load_config;
use clap::Parser;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CHANVIEW_LOG";

fn main() {
    let cli = Cli::parse();

    let tui = matches!(cli.command, None | Some(Commands::Open(_)));
    if let Err(e) = init_logging(cli.log.as_deref(), tui) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    let config = match load_config(cli.config.as_deref(), &cli.site_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = handlers::dispatch(cli, config) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to `--log` when given. Without it only the one-shot commands log,
/// to stderr and only when CHANVIEW_LOG is set; the TUI owns the terminal.
fn init_logging(log_file: Option<&Path>, tui: bool) -> Result<(), Box<dyn std::error::Error>> {
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("cannot open log file {}: {}", path.display(), e))?;
            let filter =
                EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
            tracing_subscriber::fmt()
                .with_ansi(false)
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if !tui => {
            if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(std::io::stderr)
                    .init();
            }
        }
        None => {}
    }
    Ok(())
}
