//! Document tree walk extracting component records.

use std::collections::HashMap;

use tracing::debug;

use super::error::ExportError;
use super::filename::component_filename;
use super::record::ComponentRecord;
use crate::api::{ComponentMeta, Node};
use crate::config::ImageFormat;

/// Type tag of a component node.
const COMPONENT_NODE_TYPE: &str = "COMPONENT";

/// Walks the document tree depth-first and returns one [`ComponentRecord`]
/// per component node, keyed by node id.
///
/// Component nodes contribute a record built from their own geometry plus
/// the `key`/`description` from the metadata side table (missing side
/// entries yield empty strings). Non-component nodes are recursed into via
/// their children; childless non-components are skipped. A component's own
/// children are not descended into.
///
/// # Errors
///
/// Returns [`ExportError::NoComponents`] when the tree holds no component
/// nodes. This aborts the pipeline before any render request is issued.
pub fn collect_components(
    root: &Node,
    meta: &HashMap<String, ComponentMeta>,
    file_key: &str,
    format: ImageFormat,
) -> Result<HashMap<String, ComponentRecord>, ExportError> {
    let mut records = HashMap::new();
    visit(root, meta, file_key, format, &mut records);

    if records.is_empty() {
        return Err(ExportError::NoComponents);
    }
    Ok(records)
}

fn visit(
    node: &Node,
    meta: &HashMap<String, ComponentMeta>,
    file_key: &str,
    format: ImageFormat,
    records: &mut HashMap<String, ComponentRecord>,
) {
    if node.node_type == COMPONENT_NODE_TYPE {
        let (key, description) = meta
            .get(&node.id)
            .map(|m| (m.key.clone(), m.description.clone()))
            .unwrap_or_default();
        let (width, height) = node
            .absolute_bounding_box
            .map(|bounds| (bounds.width, bounds.height))
            .unwrap_or_default();

        debug!(id = %node.id, name = %node.name, "found component");
        records.insert(
            node.id.clone(),
            ComponentRecord {
                id: node.id.clone(),
                name: node.name.clone(),
                filename: component_filename(&node.name, format),
                key,
                file_id: file_key.to_string(),
                description,
                width,
                height,
                image: None,
            },
        );
    } else {
        for child in &node.children {
            visit(child, meta, file_key, format, records);
        }
    }
}
