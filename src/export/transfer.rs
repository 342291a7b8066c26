use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use super::error::TransferError;
use crate::types::TransferMode;

/// Execute one planned transfer.
///
/// The destination is the final file path; the primitive for every mode
/// fails if an entry already exists there, so nothing is ever truncated or
/// replaced in place. In dry-run mode the would-be action is logged and no
/// filesystem write happens.
pub fn transfer(
    source: &Path,
    destination: &Path,
    mode: TransferMode,
    dry_run: bool,
) -> Result<(), TransferError> {
    if dry_run {
        tracing::info!(
            "[DRY RUN] Would {} {} -> {}",
            mode.as_str(),
            source.display(),
            destination.display()
        );
        return Ok(());
    }

    let io_err = |e: io::Error| TransferError::Io {
        mode: mode.as_str(),
        path: source.to_path_buf(),
        source: e,
    };

    match mode {
        TransferMode::Copy => copy_file(source, destination).map_err(io_err),
        TransferMode::Symlink => symlink_file(source, destination).map_err(io_err),
        TransferMode::Hardlink => std::fs::hard_link(source, destination).map_err(io_err),
    }
}

/// Duplicate bytes and permission metadata, failing if the destination
/// already exists.
///
/// `std::fs::copy` is not used because it truncates an existing destination;
/// `create_new` preserves the fail-on-conflict contract.
fn copy_file(source: &Path, destination: &Path) -> io::Result<()> {
    let mut src = File::open(source)?;
    let mut dst = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(destination)?;
    io::copy(&mut src, &mut dst)?;
    let permissions = src.metadata()?.permissions();
    std::fs::set_permissions(destination, permissions)?;
    Ok(())
}

/// Create a symbolic link pointing at the absolute source path.
///
/// The target may not exist; a dangling link is still created, matching the
/// copy modes' behavior of failing later rather than here.
#[cfg(unix)]
fn symlink_file(source: &Path, destination: &Path) -> io::Result<()> {
    let absolute = std::path::absolute(source)?;
    std::os::unix::fs::symlink(absolute, destination)
}

#[cfg(windows)]
fn symlink_file(source: &Path, destination: &Path) -> io::Result<()> {
    let absolute = std::path::absolute(source)?;
    std::os::windows::fs::symlink_file(absolute, destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("src.jpg");
        std::fs::write(&source, b"image bytes").unwrap();
        let dest = dir.path().join("out").join("src.jpg");
        std::fs::create_dir(dir.path().join("out")).unwrap();
        (dir, source, dest)
    }

    #[test]
    fn test_copy_duplicates_bytes() {
        let (_dir, source, dest) = fixture();
        transfer(&source, &dest, TransferMode::Copy, false).unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"image bytes");
    }

    #[test]
    fn test_copy_fails_on_existing_destination() {
        let (_dir, source, dest) = fixture();
        std::fs::write(&dest, b"already here").unwrap();
        let err = transfer(&source, &dest, TransferMode::Copy, false).unwrap_err();
        assert!(matches!(err, TransferError::Io { mode: "copy", .. }));
        // Existing content untouched
        assert_eq!(std::fs::read(&dest).unwrap(), b"already here");
    }

    #[test]
    fn test_copy_missing_source_fails() {
        let (dir, _source, dest) = fixture();
        let gone = dir.path().join("gone.jpg");
        assert!(transfer(&gone, &dest, TransferMode::Copy, false).is_err());
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_points_at_absolute_source() {
        let (_dir, source, dest) = fixture();
        transfer(&source, &dest, TransferMode::Symlink, false).unwrap();
        let target = std::fs::read_link(&dest).unwrap();
        assert!(target.is_absolute());
        assert_eq!(std::fs::canonicalize(&dest).unwrap(), source.canonicalize().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_hardlink_shares_identity() {
        use std::os::unix::fs::MetadataExt;

        let (_dir, source, dest) = fixture();
        transfer(&source, &dest, TransferMode::Hardlink, false).unwrap();
        let ma = std::fs::metadata(&source).unwrap();
        let mb = std::fs::metadata(&dest).unwrap();
        assert_eq!(ma.ino(), mb.ino());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (_dir, source, dest) = fixture();
        for mode in [TransferMode::Copy, TransferMode::Symlink, TransferMode::Hardlink] {
            transfer(&source, &dest, mode, true).unwrap();
            assert!(!dest.exists());
        }
    }
}
