//! Top-level export pipeline driver.

use std::path::PathBuf;

use tracing::info;

use super::downloader::ImageDownloader;
use super::error::ExportError;
use super::fetcher::fetch_render_urls;
use super::manifest::write_manifest;
use super::walker::collect_components;
use crate::api::FigmaClient;
use crate::config::ExportConfig;

/// Result of a successful export run.
#[derive(Debug)]
pub struct ExportSummary {
    /// Components found in the document tree.
    pub components: usize,
    /// Components that received a render URL.
    pub with_image: usize,
    /// Images written to disk.
    pub downloaded: usize,
    /// Components skipped for lack of a render URL.
    pub skipped: usize,
    /// Failed downloads (non-zero only in keep-going mode).
    pub failed: usize,
    /// Path of the written manifest.
    pub manifest_path: PathBuf,
}

/// Runs the whole export: fetch file, walk tree, fetch render URLs, write
/// the manifest, download images.
///
/// Stage order is fixed: the walk needs the file response, the render
/// fetch needs the id set, the manifest is written before any download so
/// it reflects fetch results even if downloads fail, and the download pool
/// joins before this function returns. A failure in any stage aborts the
/// rest of the pipeline; files already written stay on disk.
///
/// # Errors
///
/// Returns the first stage's [`ExportError`]: a failed API call, an empty
/// component set, a filesystem error, or (in fail-fast mode) a failed
/// image download.
pub async fn run_export(
    client: &FigmaClient,
    config: &ExportConfig,
) -> Result<ExportSummary, ExportError> {
    info!(url = %config.file_url, "exporting components");
    let file = client.get_file(&config.file_key).await?;

    info!("processing file response");
    let mut records =
        collect_components(&file.document, &file.components, &config.file_key, config.format)?;
    info!(components = records.len(), "components found in the figma file");

    fetch_render_urls(client, config, &mut records).await?;

    let manifest_path = write_manifest(&records, &config.output_dir).await?;

    let downloader = ImageDownloader::new(config.concurrency, config.failure_mode)?;
    let stats = downloader.download_all(client, &records, config).await?;

    let with_image = records.values().filter(|r| r.image.is_some()).count();
    Ok(ExportSummary {
        components: records.len(),
        with_image,
        downloaded: stats.downloaded(),
        skipped: stats.skipped(),
        failed: stats.failed(),
        manifest_path,
    })
}
