//! File logging.
//!
//! Standard output carries the menu, so log records go to a file only.

use std::fs::OpenOptions;
use std::path::Path;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

/// Append log records to `path`; `verbose` enables debug records.
///
/// Logging is best effort: if the file cannot be opened the program runs without it.
pub fn init(path: &Path, verbose: bool) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(log_file) => {
            let _ = WriteLogger::init(level, log_config, log_file);
        }
        Err(e) => eprintln!("Logging disabled, cannot open {}: {}", path.display(), e),
    }
}
