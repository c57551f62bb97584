//! The manifest record for one exported component.

use serde::Serialize;

/// One exported component, as written to the `data.json` manifest.
///
/// Records are created by the tree walk, gain their `image` URL during the
/// render-URL fetch, and are read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentRecord {
    /// Node id, unique within the source file.
    pub id: String,
    /// Component name as authored. Not unique, not filesystem-safe.
    pub name: String,
    /// Output filename: sanitized lower-cased name plus format extension.
    ///
    /// Two components whose names sanitize identically collide; the last
    /// download wins. Accepted limitation.
    pub filename: String,
    /// Stable cross-file component key from the metadata side table.
    pub key: String,
    /// Key of the source file; constant for the whole run.
    #[serde(rename = "fileId")]
    pub file_id: String,
    /// Component description, empty when unset.
    pub description: String,
    /// Bounding-box width in canvas units.
    pub width: f64,
    /// Bounding-box height in canvas units.
    pub height: f64,
    /// Short-lived render URL; absent until the fetch stage sets it, and
    /// still absent for ids the render service dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
