use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chv", about = concat!("chanview v", env!("CARGO_PKG_VERSION"), " - browse an imageboard from the keyboard"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Snapshot directory to browse
    #[arg(short = 'C', long = "site-dir", global = true, default_value = ".")]
    pub site_dir: PathBuf,

    /// Fetch pages from the live API ([site] in the config) instead of the
    /// snapshot directory
    #[arg(long, global = true)]
    pub remote: bool,

    /// Config file (default: chanview.toml in the snapshot directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (filter with CHANVIEW_LOG)
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the browser at a URL
    Open(OpenArgs),
    /// Rank the snapshot's boards the way quick-jump does
    Boards(BoardsArgs),
    /// Print a page's items and their links
    Show(ShowArgs),
}

#[derive(Args)]
pub struct OpenArgs {
    /// Page to start on (e.g. /board/g/catalog)
    pub url: String,
}

#[derive(Args)]
pub struct BoardsArgs {
    /// Quick-jump query; all boards when omitted
    pub query: Option<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Page to print (e.g. /board/g/thread/100)
    pub url: String,
}
