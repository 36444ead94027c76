//! Command implementations for the CLI interface.
//!
//! The default command runs the interactive menu; the subcommands cover
//! housekeeping around the data file.

use std::io;
use std::path::Path;

use clap::Subcommand;
use clap_complete::{generate, Shell};
use log::{error, info, warn};

use crate::config::Config;
use crate::db::{create_backup, Database};
use crate::tui::app::App;
use crate::tui::input::Prompter;
use crate::tui::style::AnsiStyle;

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completion scripts.
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Copy the data file into the backup directory next to it.
    Backup,
}

/// Load the data file and run the interactive menu until save & exit.
pub fn cmd_run(config: &Config) {
    let (db, load_error) = match Database::load(&config.data_file) {
        Ok(db) => (db, None),
        Err(e) => {
            warn!("Starting with an empty list: {e}");
            (Database::after_failed_load(), Some(format!("Load error: {e}")))
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());
    let mut app = App::new(db, config.data_file.clone(), AnsiStyle);
    if let Some(message) = load_error {
        app = app.with_status(message);
    }
    if let Err(e) = app.run(&mut prompter) {
        error!("Command loop failed: {e}");
        eprintln!("Terminal error: {e}");
        std::process::exit(1);
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}

/// Create a timestamped backup of the data file.
pub fn cmd_backup(data_file: &Path) {
    match create_backup(data_file) {
        Ok(backup_path) => {
            info!("Manual backup written to {}", backup_path.display());
            println!("Backup created: {}", backup_path.display());
        }
        Err(e) => {
            error!("Manual backup failed: {e}");
            eprintln!("Failed to create backup: {e}");
            std::process::exit(1);
        }
    }
}
