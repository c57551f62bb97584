//! The export pipeline.
//!
//! A linear pipeline over one in-memory record map:
//!
//! 1. [`collect_components`] walks the document tree into
//!    [`ComponentRecord`]s (fatal if none are found),
//! 2. [`fetch_render_urls`] chunks the id list with [`chunk_ids`], issues
//!    all batch render calls concurrently, and merges the returned URLs
//!    into the records,
//! 3. [`write_manifest`] persists the record map as `data.json`,
//! 4. [`ImageDownloader`] downloads every record with a render URL through
//!    a bounded worker pool.
//!
//! [`run_export`] drives the stages in that order. Records are mutated by
//! exactly one stage at a time; the download stage only reads them.

mod batch;
mod downloader;
mod error;
mod fetcher;
mod filename;
mod manifest;
mod pipeline;
mod record;
mod walker;

pub use batch::{DEFAULT_CHUNK_SIZE, chunk_ids};
pub use downloader::{DEFAULT_DOWNLOAD_CONCURRENCY, DownloadStats, ImageDownloader};
pub use error::ExportError;
pub use fetcher::fetch_render_urls;
pub use filename::component_filename;
pub use manifest::{MANIFEST_FILENAME, write_manifest};
pub use pipeline::{ExportSummary, run_export};
pub use record::ComponentRecord;
pub use walker::collect_components;
