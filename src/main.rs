//! photos-export-rs — export a Photos.app library to a plain directory tree.
//!
//! Reads album, version and master metadata from temporary copies of the
//! library's SQLite databases, resolves each version to its on-disk source
//! (unedited master or edited render), and copies or links the file into one
//! destination directory per album. Per-item failures are logged and counted;
//! the run continues to the next item.

#![warn(clippy::all)]

mod cli;
mod config;
mod export;
mod library;
mod types;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // The subscriber comes first: building the config may already warn
    // about conflicting link flags.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .init();

    let config = config::Config::from_cli(cli);

    // The only fatal precondition: checked before any database access.
    if !config.destination_root.is_dir() {
        anyhow::bail!(
            "destination is not a directory: {}",
            config.destination_root.display()
        );
    }

    // Copy the databases so the original library is never touched. The
    // copies are removed on the normal exit path when `temp` drops.
    let temp = library::TempDatabases::create(&config.library_root)?;
    let library_db = library::LibraryDb::open(temp.library_path())?;
    let proxies_db = library::ProxiesDb::open(temp.proxies_path())?;

    let exporter = export::Exporter::new(&config, library_db, proxies_db);
    let stats = exporter.run()?;

    // Failed transfers do not change the exit code; they are reported here.
    println!(
        "Images: {}\tcopied: {}\tfailed: {}",
        stats.images, stats.copied, stats.failed
    );

    Ok(())
}
