use std::io;
use std::path::Path;

/// What to do with one (source, destination) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    /// Destination does not exist yet; transfer it.
    Create,
    /// Destination exists but is not the same underlying file; re-transfer.
    Overwrite,
    /// Destination is already in place; do nothing.
    Skip,
}

impl SyncAction {
    /// Whether this action reaches the transfer stage.
    pub fn transfers(&self) -> bool {
        matches!(self, SyncAction::Create | SyncAction::Overwrite)
    }
}

/// A planning decision plus the reason it was made.
#[derive(Debug, Clone, Copy)]
pub struct SyncPlan {
    pub action: SyncAction,
    pub reason: &'static str,
}

/// Decide what to do for one resolved source and its destination path.
///
/// Planning never deletes or truncates anything; an `Overwrite` decision
/// relies on the transfer primitive itself failing if the destination still
/// exists as a conflicting entry.
pub fn plan(source: &Path, destination: &Path, compare: bool) -> SyncPlan {
    if !destination.is_file() {
        return SyncPlan {
            action: SyncAction::Create,
            reason: "destination absent",
        };
    }
    if !compare {
        return SyncPlan {
            action: SyncAction::Skip,
            reason: "destination exists",
        };
    }
    // Identity comparison, not byte content: a destination that is the same
    // underlying file (hard link, or the source itself through a symlink)
    // needs no re-transfer.
    match same_identity(source, destination) {
        Ok(true) => SyncPlan {
            action: SyncAction::Skip,
            reason: "destination is the same file",
        },
        Ok(false) => SyncPlan {
            action: SyncAction::Overwrite,
            reason: "destination differs from source",
        },
        Err(e) => {
            tracing::debug!(
                "Identity check failed for {} vs {}: {}",
                source.display(),
                destination.display(),
                e
            );
            SyncPlan {
                action: SyncAction::Overwrite,
                reason: "identity check failed",
            }
        }
    }
}

/// Whether two paths refer to the same underlying file.
#[cfg(unix)]
fn same_identity(a: &Path, b: &Path) -> io::Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let ma = std::fs::metadata(a)?;
    let mb = std::fs::metadata(b)?;
    Ok(ma.dev() == mb.dev() && ma.ino() == mb.ino())
}

#[cfg(not(unix))]
fn same_identity(a: &Path, b: &Path) -> io::Result<bool> {
    Ok(std::fs::canonicalize(a)? == std::fs::canonicalize(b)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absent_destination_is_create() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src.jpg");
        std::fs::write(&source, b"data").unwrap();

        let plan = plan(&source, &dir.path().join("missing.jpg"), false);
        assert_eq!(plan.action, SyncAction::Create);
    }

    #[test]
    fn test_present_destination_without_compare_is_skip() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src.jpg");
        let dest = dir.path().join("dst.jpg");
        std::fs::write(&source, b"data").unwrap();
        std::fs::write(&dest, b"other").unwrap();

        let plan = plan(&source, &dest, false);
        assert_eq!(plan.action, SyncAction::Skip);
    }

    #[test]
    fn test_compare_same_underlying_file_is_skip() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src.jpg");
        let dest = dir.path().join("dst.jpg");
        std::fs::write(&source, b"data").unwrap();
        std::fs::hard_link(&source, &dest).unwrap();

        let plan = plan(&source, &dest, true);
        assert_eq!(plan.action, SyncAction::Skip);
    }

    #[test]
    fn test_compare_different_identity_is_overwrite() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src.jpg");
        let dest = dir.path().join("dst.jpg");
        std::fs::write(&source, b"data").unwrap();
        std::fs::write(&dest, b"data").unwrap();

        // Identical bytes, different files: identity comparison re-transfers.
        let plan = plan(&source, &dest, true);
        assert_eq!(plan.action, SyncAction::Overwrite);
    }

    #[test]
    fn test_directory_destination_is_create() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src.jpg");
        std::fs::write(&source, b"data").unwrap();
        let dest = dir.path().join("subdir");
        std::fs::create_dir(&dest).unwrap();

        // Not a regular file, so the planner decides Create; the transfer
        // primitive will then fail on the conflicting entry.
        let plan = plan(&source, &dest, false);
        assert_eq!(plan.action, SyncAction::Create);
    }

    #[test]
    fn test_missing_source_with_compare_is_overwrite() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("dst.jpg");
        std::fs::write(&dest, b"data").unwrap();

        let plan = plan(&dir.path().join("gone.jpg"), &dest, true);
        assert_eq!(plan.action, SyncAction::Overwrite);
    }
}
