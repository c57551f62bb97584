//! Serde types mirroring the Figma API wire format.
//!
//! Only the fields the exporter reads are modeled; serde ignores the rest
//! of the (large) file response.

use std::collections::HashMap;

use serde::Deserialize;

/// Response of `GET /v1/files/{key}`.
///
/// The document tree and the component metadata side table arrive in the
/// same response; metadata is keyed by node id.
#[derive(Debug, Clone, Deserialize)]
pub struct FileResponse {
    /// Root node of the document tree.
    pub document: Node,
    /// Component metadata keyed by the component node's id.
    #[serde(default)]
    pub components: HashMap<String, ComponentMeta>,
}

/// One node of the document tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Node id, unique within the file.
    pub id: String,
    /// Human-readable node name. Not unique, not filesystem-safe.
    pub name: String,
    /// Node type tag, e.g. `DOCUMENT`, `CANVAS`, `FRAME`, `COMPONENT`.
    #[serde(rename = "type")]
    pub node_type: String,
    /// Child nodes. Leaf node types omit this field entirely.
    #[serde(default)]
    pub children: Vec<Node>,
    /// Bounding box in absolute canvas coordinates. Absent on the root.
    pub absolute_bounding_box: Option<Rectangle>,
}

/// Bounding box of a node.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Rectangle {
    /// Width in canvas units.
    pub width: f64,
    /// Height in canvas units.
    pub height: f64,
}

/// Per-component metadata from the file response side table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentMeta {
    /// Stable cross-file component key.
    #[serde(default)]
    pub key: String,
    /// Component description, empty when unset.
    #[serde(default)]
    pub description: String,
}

/// Response of `GET /v1/images/{key}`.
///
/// `images` maps each requested node id to a short-lived render URL, or to
/// `null` when the service could not render that node.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageResponse {
    /// Error reported by the render service, if any.
    #[serde(default)]
    pub err: Option<String>,
    /// Rendered image URL per requested node id.
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
}
