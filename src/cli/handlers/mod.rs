use std::path::Path;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::http_site::HttpSite;
use crate::io::site::{Site, SnapshotSite};
use crate::model::{Config, board_dataset};
use crate::ops::board_search::rank_boards;
use crate::tui::{self, RunOptions};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let site_dir = cli.site_dir.as_path();
    let site = open_site(site_dir, cli.remote, &config)?;

    match cli.command {
        None => cmd_open(site, site_dir, "/", config),
        Some(Commands::Open(args)) => cmd_open(site, site_dir, &args.url, config),
        Some(Commands::Boards(args)) => cmd_boards(site.as_ref(), args, &config, json),
        Some(Commands::Show(args)) => cmd_show(site.as_ref(), args, json),
    }
}

/// The live API with `--remote`, else the snapshot directory
fn open_site(
    site_dir: &Path,
    remote: bool,
    config: &Config,
) -> Result<Box<dyn Site>, Box<dyn std::error::Error>> {
    if remote {
        tracing::info!(api = %config.site.api_url, "using live api");
        Ok(Box::new(HttpSite::new(&config.site)?))
    } else {
        Ok(Box::new(SnapshotSite::new(site_dir)))
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_open(
    site: Box<dyn Site>,
    site_dir: &Path,
    url: &str,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    tui::run(RunOptions {
        site,
        site_dir: site_dir.to_path_buf(),
        url: url.to_string(),
        config,
    })
}

fn cmd_boards(
    site: &dyn Site,
    args: BoardsArgs,
    config: &Config,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let home = site.load("/")?;
    let dataset = board_dataset(&home);

    // No query lists every board; a query gets the overlay's cap
    let (query, limit) = match args.query.as_deref() {
        Some(q) => (q, config.nav.max_results),
        None => ("", usize::MAX),
    };
    let ranked = rank_boards(&dataset, query, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else if ranked.is_empty() {
        println!("No matching boards");
    } else {
        for entry in ranked {
            println!("{}", format_board_line(entry));
        }
    }
    Ok(())
}

fn cmd_show(site: &dyn Site, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let page = site.load(&args.url)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page_to_json(&page))?);
    } else {
        for line in format_page(&page) {
            println!("{}", line);
        }
    }
    Ok(())
}
