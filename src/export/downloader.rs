//! Bounded worker pool for image downloads.
//!
//! The pool uses a semaphore to cap concurrent outbound connections: a
//! permit is acquired before each task is spawned and released by RAII when
//! the task finishes. The stage joins every spawned handle before
//! returning, so completion means no task is pending or in flight.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};

use super::error::ExportError;
use super::record::ComponentRecord;
use crate::api::FigmaClient;
use crate::config::{ExportConfig, FailureMode, ImageFormat};

/// Default number of concurrent image downloads.
///
/// One network fetch per component can mean hundreds of requests; the pool
/// keeps the render CDN and the local network stack from being flooded.
pub const DEFAULT_DOWNLOAD_CONCURRENCY: usize = 3;

/// Counters for one download run.
///
/// Atomic so concurrent download tasks can update them without locking.
#[derive(Debug, Default)]
pub struct DownloadStats {
    downloaded: AtomicUsize,
    skipped: AtomicUsize,
    failed: AtomicUsize,
}

impl DownloadStats {
    /// Creates a stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of images written to disk.
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.downloaded.load(Ordering::SeqCst)
    }

    /// Number of records skipped for lack of a render URL.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::SeqCst)
    }

    /// Number of failed downloads.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    fn increment_downloaded(&self) {
        self.downloaded.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_skipped(&self) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
    }

    fn increment_failed(&self) {
        self.failed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Bounded downloader for rendered component images.
///
/// # Concurrency Model
///
/// - Each download runs in its own Tokio task
/// - A semaphore permit is acquired before spawning each task
/// - Permits are released automatically when tasks complete (RAII)
/// - Output paths are disjoint by filename, so tasks share nothing but the
///   filesystem; the per-format directory is created idempotently and may
///   race harmlessly across tasks
///
/// # Failure Semantics
///
/// With [`FailureMode::FailFast`] (the default) the first task failure
/// aborts the run - after every task has settled, so no download is left
/// in flight. [`FailureMode::KeepGoing`] logs and counts failures instead.
#[derive(Debug)]
pub struct ImageDownloader {
    semaphore: Arc<Semaphore>,
    concurrency: usize,
    failure_mode: FailureMode,
}

impl ImageDownloader {
    /// Creates a downloader with the given pool size and failure policy.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::InvalidConcurrency`] if `concurrency` is zero.
    pub fn new(concurrency: usize, failure_mode: FailureMode) -> Result<Self, ExportError> {
        if concurrency == 0 {
            return Err(ExportError::InvalidConcurrency { value: concurrency });
        }

        debug!(concurrency, ?failure_mode, "creating image downloader");
        Ok(Self {
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
            failure_mode,
        })
    }

    /// Returns the configured pool size.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Downloads every record that has a render URL into
    /// `<output_dir>/<format>/<filename>`.
    ///
    /// Records without a URL were already logged as omissions by the fetch
    /// stage and are skipped here (counted in the stats).
    ///
    /// # Errors
    ///
    /// In fail-fast mode, returns the first task's [`ExportError`] once all
    /// tasks have settled. Also errors if the semaphore is closed.
    #[instrument(skip(self, client, records, config), fields(records = records.len()))]
    pub async fn download_all(
        &self,
        client: &FigmaClient,
        records: &HashMap<String, ComponentRecord>,
        config: &ExportConfig,
    ) -> Result<DownloadStats, ExportError> {
        let format_dir = config.output_dir.join(config.format.extension());
        let stats = Arc::new(DownloadStats::new());
        let mut handles = Vec::new();

        info!(concurrency = self.concurrency, "starting image downloads");

        for record in records.values() {
            let Some(image_url) = record.image.clone() else {
                debug!(id = %record.id, name = %record.name, "skipping component without render URL");
                stats.increment_skipped();
                continue;
            };

            // Acquire semaphore permit (blocks while the pool is full)
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|_| ExportError::SemaphoreClosed)?;

            let client = client.clone();
            let stats = Arc::clone(&stats);
            let dest_dir = format_dir.clone();
            let filename = record.filename.clone();
            let format = config.format;

            handles.push(tokio::spawn(async move {
                // Permit is dropped when this block exits (RAII)
                let _permit = permit;

                let result = download_one(&client, &image_url, format, &dest_dir, &filename).await;
                match &result {
                    Ok(path) => {
                        info!(path = %path.display(), "image downloaded");
                        stats.increment_downloaded();
                    }
                    Err(e) => {
                        warn!(filename = %filename, error = %e, "image download failed");
                        stats.increment_failed();
                    }
                }
                result.map(|_| ())
            }));
        }

        debug!(task_count = handles.len(), "waiting for downloads to settle");

        // Join every task before deciding the stage outcome, so completion
        // always means no pending or in-flight work.
        let mut first_error = None;
        for handle in handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
                Err(source) => {
                    if first_error.is_none() {
                        first_error = Some(ExportError::TaskJoin { source });
                    }
                }
            }
        }

        if let Some(error) = first_error {
            match self.failure_mode {
                FailureMode::FailFast => return Err(error),
                FailureMode::KeepGoing => {
                    warn!(failed = stats.failed(), "continuing despite download failures");
                }
            }
        }

        info!(
            downloaded = stats.downloaded(),
            skipped = stats.skipped(),
            failed = stats.failed(),
            "image downloads complete"
        );

        // All tasks are joined, so this Arc should be sole-owned now.
        match Arc::try_unwrap(stats) {
            Ok(stats) => Ok(stats),
            Err(arc_stats) => {
                let fresh = DownloadStats::new();
                fresh
                    .downloaded
                    .store(arc_stats.downloaded(), Ordering::SeqCst);
                fresh.skipped.store(arc_stats.skipped(), Ordering::SeqCst);
                fresh.failed.store(arc_stats.failed(), Ordering::SeqCst);
                Ok(fresh)
            }
        }
    }
}

/// Downloads one image and writes it under the per-format directory.
async fn download_one(
    client: &FigmaClient,
    url: &str,
    format: ImageFormat,
    dest_dir: &Path,
    filename: &str,
) -> Result<PathBuf, ExportError> {
    let body = client
        .download_image(url, format)
        .await
        .map_err(|source| ExportError::Download {
            filename: filename.to_string(),
            source,
        })?;

    tokio::fs::create_dir_all(dest_dir)
        .await
        .map_err(|e| ExportError::io(dest_dir, e))?;

    let path = dest_dir.join(filename);
    tokio::fs::write(&path, &body)
        .await
        .map_err(|e| ExportError::io(&path, e))?;

    Ok(path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_concurrency() {
        let result = ImageDownloader::new(0, FailureMode::FailFast);
        assert!(matches!(
            result,
            Err(ExportError::InvalidConcurrency { value: 0 })
        ));
    }

    #[test]
    fn test_new_stores_concurrency() {
        let downloader = ImageDownloader::new(3, FailureMode::FailFast).unwrap();
        assert_eq!(downloader.concurrency(), 3);
    }

    #[test]
    fn test_default_concurrency_constant() {
        assert_eq!(DEFAULT_DOWNLOAD_CONCURRENCY, 3);
    }

    #[test]
    fn test_stats_default_is_zero() {
        let stats = DownloadStats::default();
        assert_eq!(stats.downloaded(), 0);
        assert_eq!(stats.skipped(), 0);
        assert_eq!(stats.failed(), 0);
    }

    #[test]
    fn test_stats_increment() {
        let stats = DownloadStats::new();
        stats.increment_downloaded();
        stats.increment_downloaded();
        stats.increment_skipped();
        stats.increment_failed();

        assert_eq!(stats.downloaded(), 2);
        assert_eq!(stats.skipped(), 1);
        assert_eq!(stats.failed(), 1);
    }

    #[test]
    fn test_stats_thread_safe() {
        use std::thread;

        let stats = Arc::new(DownloadStats::new());
        let mut handles = Vec::new();

        for _ in 0..10 {
            let stats = Arc::clone(&stats);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    stats.increment_downloaded();
                    stats.increment_failed();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(stats.downloaded(), 1000);
        assert_eq!(stats.failed(), 1000);
    }
}
