//! Read-only access to the Photos.app library metadata.

mod db;
mod error;
mod tempdb;
mod types;

pub use db::{LibraryDb, ProxiesDb};
#[cfg(test)]
pub(crate) use db::fixtures;
pub use error::LibraryError;
pub use tempdb::TempDatabases;
pub use types::{Album, AdjustmentResource, MasterImage};
