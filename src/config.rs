use std::path::PathBuf;

use crate::cli::Cli;
use crate::types::{LogLevel, TransferMode};

/// Application configuration, built once from the CLI and immutable after.
///
/// The verbose/progress mutual exclusion and the link-mode precedence are
/// both resolved here so the export engine never re-interprets raw flags.
#[derive(Debug, Clone)]
pub struct Config {
    pub library_root: PathBuf,
    pub destination_root: PathBuf,
    #[allow(dead_code)] // Resolved into `progress` and the tracing filter at construction
    pub verbose: bool,
    pub progress: bool,
    pub compare: bool,
    pub dry_run: bool,
    pub masters_only: bool,
    pub link_mode: TransferMode,
    #[allow(dead_code)] // Resolved into the tracing filter via Cli::log_filter before Config is built
    pub log_level: LogLevel,
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        // Verbose wins when both verbosity and the progress bar are requested.
        let progress = !cli.no_progress && !cli.verbose;

        // Link modes are not mutually exclusive on the CLI; symlinks take
        // precedence over hardlinks, either over plain copy.
        if cli.links && cli.hardlinks {
            tracing::warn!("both --links and --hardlinks set, using symbolic links");
        }
        let link_mode = if cli.links {
            TransferMode::Symlink
        } else if cli.hardlinks {
            TransferMode::Hardlink
        } else {
            TransferMode::Copy
        };

        Self {
            library_root: expand_tilde(&cli.source),
            destination_root: expand_tilde(&cli.destination),
            verbose: cli.verbose,
            progress,
            compare: cli.compare,
            dry_run: cli.dry_run,
            masters_only: cli.masters,
            link_mode,
            log_level: cli.log_level,
        }
    }

}
