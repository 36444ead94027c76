//! # tolearn - a terminal list of things to learn
//!
//! Organise learning items into named categories. Each item has a name, a
//! reference URL, a numeric priority (lower is more urgent), a free-text note
//! and a completion flag.
//!
//! ## Quick Start
//!
//! ```bash
//! # Open the interactive menu on ~/.tolearn/data.json
//! tolearn
//!
//! # Use a different data file
//! tolearn --data ./learning.json
//!
//! # Snapshot the data file into ~/.tolearn/backup/
//! tolearn backup
//! ```
//!
//! ## Menu
//!
//! - `1` add a category, `2` add a task, `3` choose a category's sort order
//! - `5` view or modify one task
//! - `f <n>` fold or unfold category `n`
//! - `4` save and exit (end of input also saves)
//!
//! Everything is kept in memory while the menu runs and written back as one
//! pretty-printed JSON document on exit. Logs go to `tolearn.log` beside the
//! data file.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod fields;
pub mod logging;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod layout;
    pub mod render;
    pub mod style;
}

use cli::Cli;
use cmd::*;
use config::Config;

fn main() {
    let cli = Cli::parse();

    match &cli.command {
        // Completions need no data directory
        Some(Commands::Completions { shell }) => cmd_completions(*shell),
        Some(Commands::Backup) => cmd_backup(&setup(&cli).data_file),
        None => cmd_run(&setup(&cli)),
    }
}

/// Resolve paths and start logging; exits when the data directory is unusable.
fn setup(cli: &Cli) -> Config {
    let config = match Config::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };
    logging::init(&config.log_file, config.verbose);
    log::info!(
        "tolearn {} using {} (data dir {})",
        env!("CARGO_PKG_VERSION"),
        config.data_file.display(),
        config.data_dir.display()
    );
    config
}
