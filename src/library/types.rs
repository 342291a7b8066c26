/// A regular (user-created) album from `RKAlbum`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub model_id: i64,
    pub name: String,
}

/// The master/version join for one version: everything needed to locate
/// the source file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterImage {
    /// Relative path under `Masters/`, OS-separator-delimited.
    pub image_path: String,
    /// Display file name used for the destination file.
    pub file_name: String,
    /// Opaque adjustment tag; sentinel values mean "no edit exists".
    pub adjustment_tag: String,
}

/// An edited render from `RKModelResource` in the proxies database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentResource {
    /// Resource identifier; its first two characters drive path sharding.
    pub resource_id: String,
    pub file_name: String,
}

/// Adjustment tags that mean the version carries no edit.
pub const UNADJUSTED_TAGS: [&str; 2] = ["UNADJUSTEDNONRAW", "UNADJUSTED"];

impl MasterImage {
    /// Whether the adjustment tag is one of the "no edit" sentinels.
    pub fn is_unadjusted(&self) -> bool {
        UNADJUSTED_TAGS.contains(&self.adjustment_tag.as_str())
    }
}
