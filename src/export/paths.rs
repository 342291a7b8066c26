use std::path::{Path, PathBuf};

use crate::library::{AdjustmentResource, MasterImage};

/// Build the on-disk path of an unedited master.
///
/// The stored `imagePath` is OS-separator-delimited; each segment becomes its
/// own path component under `<library>/Masters`, so `2016/01/02/img.jpg`
/// turns into four nested components, not one literal name.
pub fn master_source_path(library_root: &Path, master: &MasterImage) -> PathBuf {
    let mut path = library_root.join("Masters");
    for segment in master.image_path.split(std::path::MAIN_SEPARATOR) {
        if !segment.is_empty() {
            path.push(segment);
        }
    }
    path
}

/// Build the on-disk path of an edited render.
///
/// The library shards renders under
/// `resources/modelresources/<p1>/<p2>/<resourceId>/<fileName>` where `p1`
/// and `p2` are the decimal code-point values of the first two characters of
/// the resource id (e.g. `"Ab…"` → `65/98`). The sharding must match the
/// library's layout exactly.
///
/// Returns `None` for resource ids shorter than two characters; the caller
/// falls back to the master path.
pub fn adjusted_source_path(
    library_root: &Path,
    resource: &AdjustmentResource,
) -> Option<PathBuf> {
    let (p1, p2) = shard_components(&resource.resource_id)?;
    Some(
        library_root
            .join("resources")
            .join("modelresources")
            .join(p1)
            .join(p2)
            .join(&resource.resource_id)
            .join(&resource.file_name),
    )
}

/// Decimal code points of the first two characters of a resource id.
fn shard_components(resource_id: &str) -> Option<(String, String)> {
    let mut chars = resource_id.chars();
    let first = chars.next()?;
    let second = chars.next()?;
    Some(((first as u32).to_string(), (second as u32).to_string()))
}
