//! Render-URL fetch: concurrent batch requests merged into the records.

use std::collections::HashMap;

use futures_util::future::try_join_all;
use tracing::{debug, info, warn};

use super::batch::{DEFAULT_CHUNK_SIZE, chunk_ids};
use super::error::ExportError;
use super::record::ComponentRecord;
use crate::api::FigmaClient;
use crate::config::ExportConfig;

/// Requests a render URL for every record and merges the results.
///
/// The id list is split into chunks of [`DEFAULT_CHUNK_SIZE`] and all batch
/// requests are issued concurrently; batch count is bounded by document
/// size over chunk size, so no concurrency cap is applied here (unlike the
/// download stage, which fans out per component). The stage completes only
/// once every batch response has been merged.
///
/// Ids the service dropped or returned `null` for leave their record
/// without an `image`; that is logged and otherwise ignored.
///
/// # Errors
///
/// Any single batch failure aborts the whole fetch with an
/// [`ExportError::Api`]; there is no partial-success continuation.
pub async fn fetch_render_urls(
    client: &FigmaClient,
    config: &ExportConfig,
    records: &mut HashMap<String, ComponentRecord>,
) -> Result<(), ExportError> {
    let ids: Vec<String> = records.keys().cloned().collect();
    let batches = chunk_ids(&ids, DEFAULT_CHUNK_SIZE);

    let with_image = records.values().filter(|r| r.image.is_some()).count();
    info!(
        components = ids.len(),
        with_image,
        batches = batches.len(),
        "getting export urls"
    );

    let requests = batches.iter().map(|batch| {
        client.get_image_urls(&config.file_key, batch, config.format, config.scale)
    });
    let responses = try_join_all(requests).await?;

    merge_image_urls(records, responses);

    let with_image = records.values().filter(|r| r.image.is_some()).count();
    info!(
        components = records.len(),
        with_image, "render URLs merged"
    );
    Ok(())
}

/// Merges batch responses into the record map.
///
/// Each id present in a response with a non-null URL gets its record's
/// `image` set; no record is ever removed or duplicated.
fn merge_image_urls(
    records: &mut HashMap<String, ComponentRecord>,
    responses: Vec<HashMap<String, Option<String>>>,
) {
    for images in responses {
        for (id, url) in images {
            match url {
                Some(url) => {
                    if let Some(record) = records.get_mut(&id) {
                        record.image = Some(url);
                    } else {
                        debug!(id = %id, "response contains an id that is not a known component");
                    }
                }
                None => warn!(id = %id, "render service returned no URL for component"),
            }
        }
    }
}
