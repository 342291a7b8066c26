//! The export engine: traversal, planning and transfer.

mod error;
pub mod paths;
pub mod plan;
pub mod transfer;

pub use error::TransferError;

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Config;
use crate::library::{LibraryDb, MasterImage, ProxiesDb};

/// Counters accumulated over one export run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExportStats {
    /// Total from the counting pass; this is what the summary reports.
    ///
    /// Under concurrent external mutation the export pass may visit a
    /// different set, so `found` can diverge from this.
    pub images: u64,
    /// Versions visited during the export pass.
    pub found: u64,
    /// Transfer attempts (incremented in dry-run too).
    pub copied: u64,
    /// Transfers that errored.
    pub failed: u64,
}

/// Drives the full albums → versions → files traversal.
pub struct Exporter<'a> {
    config: &'a Config,
    library: LibraryDb,
    proxies: ProxiesDb,
}

impl<'a> Exporter<'a> {
    pub fn new(config: &'a Config, library: LibraryDb, proxies: ProxiesDb) -> Self {
        Self {
            config,
            library,
            proxies,
        }
    }

    /// Count exportable images across all regular albums.
    ///
    /// Sizes the progress bar. The export pass re-derives everything
    /// independently; if the library is mutated while we run, the two passes
    /// may diverge — that is out of scope to guard against.
    pub fn count_images(&self) -> anyhow::Result<u64> {
        let mut total = 0u64;
        for album in self.library.albums()? {
            total += self.library.album_versions(album.model_id)?.len() as u64;
        }
        Ok(total)
    }

    /// Run the export and return the final counters.
    ///
    /// Per-item failures are logged and counted, never propagated; only
    /// metadata-store errors and destination directory creation abort.
    pub fn run(&self) -> anyhow::Result<ExportStats> {
        let total = self.count_images()?;
        tracing::info!("Found {} images", total);

        let pb = create_progress_bar(self.config.progress, total);
        let mut stats = ExportStats {
            images: total,
            ..ExportStats::default()
        };

        for album in self.library.albums()? {
            let destination_dir = self.config.destination_root.join(&album.name);
            std::fs::create_dir_all(&destination_dir).with_context(|| {
                format!(
                    "Failed to create album directory {}",
                    destination_dir.display()
                )
            })?;
            pb.suspend(|| {
                tracing::debug!("---------------- ALBUM: {} ----------------", album.name)
            });

            for version_id in self.library.album_versions(album.model_id)? {
                stats.found += 1;
                pb.inc(1);

                let master = match self.library.version_master(version_id)? {
                    Some(master) => master,
                    None => {
                        pb.suspend(|| {
                            tracing::warn!(
                                "No master/version row for version {}, skipping",
                                version_id
                            )
                        });
                        continue;
                    }
                };

                let source = self.resolve_source(&master, &pb)?;
                if !source.exists() {
                    // Flagged but still carried forward: the transfer stage
                    // fails per item and the run continues.
                    pb.suspend(|| {
                        tracing::warn!("Source file does not exist: {}", source.display())
                    });
                }

                let destination = destination_dir.join(&master.file_name);
                let plan = plan::plan(&source, &destination, self.config.compare);
                pb.suspend(|| {
                    tracing::debug!(
                        "({}/{}) {:?} ({}): {} -> {}",
                        stats.found,
                        total,
                        plan.action,
                        plan.reason,
                        source.display(),
                        destination.display()
                    )
                });

                if !plan.action.transfers() {
                    continue;
                }

                stats.copied += 1;
                if let Err(e) = transfer::transfer(
                    &source,
                    &destination,
                    self.config.link_mode,
                    self.config.dry_run,
                ) {
                    stats.failed += 1;
                    pb.suspend(|| {
                        tracing::error!(
                            "Failed to transfer {}: {}. Skipping this element.",
                            source.display(),
                            e
                        )
                    });
                }
            }
        }

        pb.finish_and_clear();
        Ok(stats)
    }

    /// Resolve one version to its source file, preferring the edited render
    /// unless masters-only mode is set or the version is unadjusted.
    fn resolve_source(&self, master: &MasterImage, pb: &ProgressBar) -> anyhow::Result<PathBuf> {
        let master_path = paths::master_source_path(&self.config.library_root, master);
        if self.config.masters_only || master.is_unadjusted() {
            return Ok(master_path);
        }

        match self.proxies.adjustment_resource(&master.adjustment_tag)? {
            Some(resource) => {
                match paths::adjusted_source_path(&self.config.library_root, &resource) {
                    Some(path) => Ok(path),
                    None => {
                        pb.suspend(|| {
                            tracing::warn!(
                                "Resource id too short to shard: {:?}, using master",
                                resource.resource_id
                            )
                        });
                        Ok(master_path)
                    }
                }
            }
            None => {
                // Known library quirk: a non-sentinel tag with no resource
                // row falls back to the unedited master.
                pb.suspend(|| {
                    tracing::warn!("No adjustment row for {}", master.adjustment_tag)
                });
                Ok(master_path)
            }
        }
    }
}

/// Create a progress bar with a consistent template.
///
/// Returns `ProgressBar::hidden()` when progress is disabled or stdout is
/// not a TTY (piped output, cron jobs).
fn create_progress_bar(progress: bool, total: u64) -> ProgressBar {
    if !progress || !std::io::stdout().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .expect("valid template")
            .progress_chars("=> "),
    );
    pb
}
