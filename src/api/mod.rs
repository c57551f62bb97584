//! Figma REST API client.
//!
//! This module wraps the three remote calls the exporter needs:
//!
//! - fetching a file (document tree plus component metadata),
//! - requesting rendered image URLs for a batch of node ids,
//! - downloading a rendered image from its short-lived URL.
//!
//! Authentication is a static personal access token sent as the
//! `X-Figma-Token` header on API requests. Network failures surface as
//! structured [`ApiError`] values; there is no retry policy.

mod client;
mod error;
mod types;

pub use client::{DEFAULT_API_BASE, FigmaClient};
pub use error::ApiError;
pub use types::{ComponentMeta, FileResponse, ImageResponse, Node, Rectangle};
