//! Manifest persistence: the record map as `<outputDir>/data.json`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::info;

use super::error::ExportError;
use super::record::ComponentRecord;

/// Filename of the manifest inside the output directory.
pub const MANIFEST_FILENAME: &str = "data.json";

/// Serializes the record map to `<output_dir>/data.json`, creating the
/// output directory if needed.
///
/// Runs after the render-URL fetch and before the download stage, so the
/// manifest reflects fetch results even if downloads later fail.
///
/// # Errors
///
/// Returns [`ExportError::Io`] on directory or write failure and
/// [`ExportError::Serialize`] if the records cannot be encoded.
pub async fn write_manifest(
    records: &HashMap<String, ComponentRecord>,
    output_dir: &Path,
) -> Result<PathBuf, ExportError> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| ExportError::io(output_dir, e))?;

    let json = serde_json::to_vec(records).map_err(|source| ExportError::Serialize { source })?;

    let path = output_dir.join(MANIFEST_FILENAME);
    tokio::fs::write(&path, json)
        .await
        .map_err(|e| ExportError::io(&path, e))?;

    info!(path = %path.display(), entries = records.len(), "manifest written");
    Ok(path)
}
