//! Figma Component Export Library
//!
//! This library exports the components of a Figma file as rendered images
//! plus a JSON manifest. It walks the document tree for component nodes,
//! requests short-lived render URLs for them in batches, writes a
//! `data.json` manifest, and downloads every rendered image under a bounded
//! worker pool.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`api`] - Figma REST client (file fetch, render URLs, image download)
//! - [`config`] - Immutable export configuration from env and CLI overrides
//! - [`export`] - The export pipeline: walk, batch, fetch, manifest, download

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod config;
pub mod export;

// Re-export commonly used types
pub use api::{ApiError, DEFAULT_API_BASE, FigmaClient};
pub use config::{ConfigError, ExportConfig, FailureMode, ImageFormat};
pub use export::{
    ComponentRecord, DEFAULT_CHUNK_SIZE, DEFAULT_DOWNLOAD_CONCURRENCY, DownloadStats, ExportError,
    ExportSummary, ImageDownloader, MANIFEST_FILENAME, chunk_ids, collect_components,
    component_filename, run_export, write_manifest,
};
