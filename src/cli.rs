use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Track things to learn, grouped into categories.
/// Storage defaults to ~/.tolearn/data.json or a path passed via --data.
#[derive(Parser)]
#[command(name = "tolearn", version, about = "Terminal tracker for things to learn")]
pub struct Cli {
    /// Path to the JSON data file.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Write debug entries to the log file.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Without a subcommand the interactive menu starts.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
