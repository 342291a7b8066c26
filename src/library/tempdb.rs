//! Temporary read-only copies of the library databases.
//!
//! The original `.apdb` files are never opened directly; each run copies
//! them to temporary files first so the library is never touched, even by
//! SQLite journal side effects. The copies are removed when the run exits
//! normally (tempfile drop); abnormal termination may leave them behind.

use std::path::Path;

use tempfile::NamedTempFile;

use super::error::LibraryError;

/// Relative location of the main metadata database inside the library.
const LIBRARY_DB: &str = "Database/Library.apdb";
/// Relative location of the edited-render metadata database.
const PROXIES_DB: &str = "Database/ImageProxies.apdb";

/// Temporary copies of `Library.apdb` and `ImageProxies.apdb`.
#[derive(Debug)]
pub struct TempDatabases {
    library: NamedTempFile,
    proxies: NamedTempFile,
}

impl TempDatabases {
    /// Copy both databases out of the library into temp files.
    pub fn create(library_root: &Path) -> Result<Self, LibraryError> {
        let library = copy_database(&library_root.join(LIBRARY_DB), "Library")?;
        let proxies = copy_database(&library_root.join(PROXIES_DB), "ImageProxies")?;
        tracing::debug!(
            library = %library.path().display(),
            proxies = %proxies.path().display(),
            "Copied library databases"
        );
        Ok(Self { library, proxies })
    }

    pub fn library_path(&self) -> &Path {
        self.library.path()
    }

    pub fn proxies_path(&self) -> &Path {
        self.proxies.path()
    }
}

fn copy_database(source: &Path, prefix: &str) -> Result<NamedTempFile, LibraryError> {
    if !source.is_file() {
        return Err(LibraryError::MissingDatabase(source.to_path_buf()));
    }
    let temp = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(".apdb")
        .tempfile()
        .map_err(|e| LibraryError::CopyDatabase {
            path: source.to_path_buf(),
            source: e,
        })?;
    std::fs::copy(source, temp.path()).map_err(|e| LibraryError::CopyDatabase {
        path: source.to_path_buf(),
        source: e,
    })?;
    Ok(temp)
}
