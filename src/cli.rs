use clap::Parser;

use crate::types::LogLevel;

#[derive(Parser, Debug)]
#[command(
    name = "photos-export",
    about = "Export a Photos.app library to a plain directory tree"
)]
pub struct Cli {
    /// Path to the Photos.app library (the .photoslibrary directory)
    #[arg(short = 's', long)]
    pub source: String,

    /// Destination directory for the exported albums
    #[arg(short = 'd', long)]
    pub destination: String,

    /// Increase output verbosity (disables the progress bar)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Re-transfer destination files that are not the same underlying
    /// file as the source (identity comparison, not byte content)
    #[arg(short = 'c', long)]
    pub compare: bool,

    /// Compute and log plans without touching the destination
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Export unedited masters instead of edited renders
    #[arg(short = 'm', long)]
    pub masters: bool,

    /// Create symbolic links instead of copying
    #[arg(short = 'l', long)]
    pub links: bool,

    /// Create hard links instead of copying
    #[arg(short = 'i', long)]
    pub hardlinks: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Cli {
    /// Effective tracing filter directive: `--verbose` forces debug.
    ///
    /// Derived from the raw CLI because the subscriber must be installed
    /// before `Config::from_cli` runs (the config constructor may emit a
    /// warning about conflicting link flags).
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            self.log_level.as_str()
        }
    }
}
