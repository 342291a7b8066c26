//! Metadata queries against the library databases.
//!
//! Two separate stores: `Library.apdb` holds albums, versions and masters;
//! `ImageProxies.apdb` holds the edited-render resources. Both are opened
//! read-only against the temporary copies made by [`super::TempDatabases`].

use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension};

use super::error::LibraryError;
use super::types::{AdjustmentResource, Album, MasterImage};

/// `RKAlbum.albumSubclass` value for regular (user-created) albums.
const ALBUM_SUBCLASS_REGULAR: i64 = 3;

fn open_read_only(path: &Path) -> Result<Connection, LibraryError> {
    Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|e| LibraryError::Open {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read-only view of `Library.apdb`: albums, versions, masters.
pub struct LibraryDb {
    conn: Connection,
}

impl LibraryDb {
    pub fn open(path: &Path) -> Result<Self, LibraryError> {
        Ok(Self {
            conn: open_read_only(path)?,
        })
    }

    /// All exportable (regular) albums.
    ///
    /// Order is whatever SQLite returns, which is implementation-defined;
    /// no sort is imposed.
    pub fn albums(&self) -> Result<Vec<Album>, LibraryError> {
        let mut stmt = self
            .conn
            .prepare("SELECT modelId, name FROM RKAlbum WHERE albumSubclass = ?1")?;
        let albums = stmt
            .query_map([ALBUM_SUBCLASS_REGULAR], |row| {
                Ok(Album {
                    model_id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(albums)
    }

    /// Version ids belonging to an album.
    pub fn album_versions(&self, album_id: i64) -> Result<Vec<i64>, LibraryError> {
        let mut stmt = self
            .conn
            .prepare("SELECT versionId FROM RKAlbumVersion WHERE albumId = ?1")?;
        let versions = stmt
            .query_map([album_id], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(versions)
    }

    /// The master/version join for one version.
    ///
    /// Returns `None` when the join yields no row; callers treat that as a
    /// recoverable skip, not a fatal error.
    pub fn version_master(&self, version_id: i64) -> Result<Option<MasterImage>, LibraryError> {
        let mut stmt = self.conn.prepare(
            "SELECT M.imagePath, V.fileName, V.adjustmentUUID \
             FROM RKVersion AS V \
             INNER JOIN RKMaster AS M ON V.masterUuid = M.uuid \
             WHERE V.modelId = ?1",
        )?;
        let master = stmt
            .query_row([version_id], |row| {
                Ok(MasterImage {
                    image_path: row.get(0)?,
                    file_name: row.get(1)?,
                    adjustment_tag: row.get(2)?,
                })
            })
            .optional()?;
        Ok(master)
    }
}

/// Read-only view of `ImageProxies.apdb`: edited-render resources.
pub struct ProxiesDb {
    conn: Connection,
}

impl ProxiesDb {
    pub fn open(path: &Path) -> Result<Self, LibraryError> {
        Ok(Self {
            conn: open_read_only(path)?,
        })
    }

    /// Look up the edited render for an adjustment tag.
    ///
    /// Absence is a normal, reportable condition: the caller falls back to
    /// the unedited master.
    pub fn adjustment_resource(
        &self,
        adjustment_tag: &str,
    ) -> Result<Option<AdjustmentResource>, LibraryError> {
        let mut stmt = self
            .conn
            .prepare("SELECT resourceUuid, filename FROM RKModelResource WHERE resourceTag = ?1")?;
        let resource = stmt
            .query_row([adjustment_tag], |row| {
                Ok(AdjustmentResource {
                    resource_id: row.get(0)?,
                    file_name: row.get(1)?,
                })
            })
            .optional()?;
        Ok(resource)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rusqlite::Connection;
    use std::path::Path;

    /// Create a `Library.apdb` fixture with the tables the queries touch.
    pub fn create_library_db(path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE RKAlbum (modelId INTEGER PRIMARY KEY, name TEXT, albumSubclass INTEGER);
             CREATE TABLE RKAlbumVersion (albumId INTEGER, versionId INTEGER);
             CREATE TABLE RKVersion (modelId INTEGER PRIMARY KEY, masterUuid TEXT, \
                                     fileName TEXT, adjustmentUUID TEXT);
             CREATE TABLE RKMaster (uuid TEXT PRIMARY KEY, imagePath TEXT);",
        )
        .unwrap();
    }

    /// Create an `ImageProxies.apdb` fixture.
    pub fn create_proxies_db(path: &Path) {
        let conn = Connection::open(path).unwrap();
        conn.execute_batch(
            "CREATE TABLE RKModelResource (resourceTag TEXT, resourceUuid TEXT, filename TEXT);",
        )
        .unwrap();
    }

    pub fn insert_album(path: &Path, id: i64, name: &str, subclass: i64) {
        let conn = Connection::open(path).unwrap();
        conn.execute(
            "INSERT INTO RKAlbum (modelId, name, albumSubclass) VALUES (?1, ?2, ?3)",
            rusqlite::params![id, name, subclass],
        )
        .unwrap();
    }

    pub fn insert_version(
        path: &Path,
        album_id: i64,
        version_id: i64,
        image_path: &str,
        file_name: &str,
        adjustment_tag: &str,
    ) {
        let conn = Connection::open(path).unwrap();
        let master_uuid = format!("master-{version_id}");
        conn.execute(
            "INSERT INTO RKAlbumVersion (albumId, versionId) VALUES (?1, ?2)",
            rusqlite::params![album_id, version_id],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO RKVersion (modelId, masterUuid, fileName, adjustmentUUID) \
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![version_id, master_uuid, file_name, adjustment_tag],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO RKMaster (uuid, imagePath) VALUES (?1, ?2)",
            rusqlite::params![master_uuid, image_path],
        )
        .unwrap();
    }

    pub fn insert_resource(path: &Path, tag: &str, resource_id: &str, file_name: &str) {
        let conn = Connection::open(path).unwrap();
        conn.execute(
            "INSERT INTO RKModelResource (resourceTag, resourceUuid, filename) \
             VALUES (?1, ?2, ?3)",
            rusqlite::params![tag, resource_id, file_name],
        )
        .unwrap();
    }
}
