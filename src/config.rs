//! Export configuration from environment variables and CLI overrides.
//!
//! The configuration is built exactly once at startup and passed by
//! reference into every pipeline stage. No component reads ambient state
//! after this point.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::api::DEFAULT_API_BASE;
use crate::export::DEFAULT_DOWNLOAD_CONCURRENCY;

/// Environment variable holding the Figma personal access token.
pub const TOKEN_ENV: &str = "FIGMA_TOKEN";

/// Environment variable holding the URL of the Figma file to export.
pub const FILE_URL_ENV: &str = "FIGMA_FILE_URL";

/// Environment variable overriding the API base URL (used by tests).
pub const API_BASE_ENV: &str = "FIGMA_API_BASE";

/// Default output directory for the manifest and rendered files.
pub const DEFAULT_OUTPUT_DIR: &str = "./build/";

/// Default render scale passed to the Figma images endpoint.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Regex extracting the file key from a Figma file URL.
/// Figma share links embed the key as `.../file/<key>/<file-name>`.
#[allow(clippy::expect_used)]
static FILE_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)file/([0-9a-z]+)/").expect("file-key regex is valid") // Static pattern, safe to panic
});

/// Errors raised while building the export configuration.
///
/// All of these are fatal and occur before any network call is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The access token environment variable is not set.
    #[error("cannot find {TOKEN_ENV} in the process environment")]
    MissingToken,

    /// The file URL environment variable is not set.
    #[error("cannot find {FILE_URL_ENV} in the process environment")]
    MissingFileUrl,

    /// The file URL does not contain a recognizable file key.
    #[error("cannot find a file key in {url}: expected a `file/<key>/` path segment")]
    MissingFileKey {
        /// The URL that was searched.
        url: String,
    },

    /// The `format` override is not a format the render service supports.
    #[error("unrecognized image format {value:?}: expected one of jpg, png, svg, pdf")]
    InvalidFormat {
        /// The value that failed to parse.
        value: String,
    },

    /// The `scale` override is not a number.
    #[error("invalid render scale {value:?}: expected a number")]
    InvalidScale {
        /// The value that failed to parse.
        value: String,
    },

    /// The `keepGoing` override is not a boolean.
    #[error("invalid keepGoing value {value:?}: expected true or false")]
    InvalidKeepGoing {
        /// The value that failed to parse.
        value: String,
    },
}

/// Output format for rendered component images.
///
/// These are the formats the Figma images endpoint can render. `svg` is the
/// only textual format; everything else is binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG raster image (default).
    #[default]
    Jpg,
    /// PNG raster image.
    Png,
    /// SVG vector image (text).
    Svg,
    /// PDF document.
    Pdf,
}

impl ImageFormat {
    /// Returns the file extension for this format, without a leading dot.
    ///
    /// Also used as the `format` query parameter on the render request and
    /// as the per-format output subdirectory name.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }

    /// Returns the MIME type sent as the Content-Type header when
    /// downloading a rendered image.
    #[must_use]
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpg => "image/jpeg",
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
            Self::Pdf => "application/pdf",
        }
    }

    /// Returns true for textual formats (SVG only).
    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(self, Self::Svg)
    }
}

impl FromStr for ImageFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ConfigError::InvalidFormat {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// How the download pool reacts to a failed image download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Abort the whole export once every task has settled (default).
    ///
    /// Already-written files are left on disk; there is no cleanup.
    #[default]
    FailFast,
    /// Log per-task failures, count them, and let the export succeed.
    KeepGoing,
}

/// Immutable configuration for one export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// URL of the Figma file, as supplied by the environment.
    pub file_url: String,
    /// Personal access token for the Figma API.
    pub token: String,
    /// File key extracted from `file_url`.
    pub file_key: String,
    /// Base URL of the Figma API.
    pub api_base: String,
    /// Output image format.
    pub format: ImageFormat,
    /// Directory receiving `data.json` and the per-format image directory.
    pub output_dir: PathBuf,
    /// Render scale (the Figma API accepts 0.01 to 4).
    pub scale: f64,
    /// Size of the bounded download worker pool.
    pub concurrency: usize,
    /// Download failure policy.
    pub failure_mode: FailureMode,
}

impl ExportConfig {
    /// Builds a configuration from a token and a file URL, with defaults
    /// for everything else.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFileKey`] if no file key can be
    /// extracted from the URL.
    pub fn new(token: impl Into<String>, file_url: impl Into<String>) -> Result<Self, ConfigError> {
        let file_url = file_url.into();
        let file_key = extract_file_key(&file_url).ok_or_else(|| ConfigError::MissingFileKey {
            url: file_url.clone(),
        })?;

        Ok(Self {
            file_url,
            token: token.into(),
            file_key,
            api_base: DEFAULT_API_BASE.to_string(),
            format: ImageFormat::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            scale: DEFAULT_SCALE,
            concurrency: DEFAULT_DOWNLOAD_CONCURRENCY,
            failure_mode: FailureMode::default(),
        })
    }

    /// Builds a configuration from the process environment.
    ///
    /// Reads `FIGMA_TOKEN` and `FIGMA_FILE_URL` (both required) and the
    /// optional `FIGMA_API_BASE` override.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if either required variable is missing or
    /// the URL carries no file key. No network call is attempted first.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = std::env::var(TOKEN_ENV).map_err(|_| ConfigError::MissingToken)?;
        let file_url = std::env::var(FILE_URL_ENV).map_err(|_| ConfigError::MissingFileUrl)?;

        let mut config = Self::new(token, file_url)?;
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            debug!(api_base = %base, "using API base override from environment");
            config.api_base = base;
        }
        Ok(config)
    }

    /// Applies `key=value` command-line overrides.
    ///
    /// Recognized keys: `format`, `outputDir`, `scale`, `keepGoing`.
    /// Unrecognized keys and arguments without a `=` are ignored with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a recognized key carries a value that
    /// does not parse (bad format name, non-numeric scale, non-boolean
    /// keepGoing).
    pub fn apply_overrides<I>(&mut self, args: I) -> Result<(), ConfigError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for arg in args {
            let arg = arg.as_ref();
            let Some((key, value)) = arg.split_once('=') else {
                warn!(arg = %arg, "ignoring argument without key=value form");
                continue;
            };

            match key {
                "format" => self.format = value.parse()?,
                "outputDir" => self.output_dir = PathBuf::from(value),
                "scale" => {
                    self.scale = value.parse().map_err(|_| ConfigError::InvalidScale {
                        value: value.to_string(),
                    })?;
                }
                "keepGoing" => match value {
                    "true" | "1" => self.failure_mode = FailureMode::KeepGoing,
                    "false" | "0" => self.failure_mode = FailureMode::FailFast,
                    other => {
                        return Err(ConfigError::InvalidKeepGoing {
                            value: other.to_string(),
                        });
                    }
                },
                other => warn!(key = %other, "ignoring unrecognized option"),
            }
        }

        debug!(
            format = %self.format,
            output_dir = %self.output_dir.display(),
            scale = self.scale,
            failure_mode = ?self.failure_mode,
            "export configuration resolved"
        );
        Ok(())
    }
}

/// Extracts the file key from a Figma file URL.
///
/// Returns `None` if the URL contains no `file/<key>/` segment.
#[must_use]
pub fn extract_file_key(url: &str) -> Option<String> {
    FILE_KEY_PATTERN
        .captures(url)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn test_config() -> ExportConfig {
        ExportConfig::new("token", "https://www.figma.com/file/aBc123/Design?node-id=0").unwrap()
    }

    #[test]
    fn test_extract_file_key_from_share_url() {
        let key = extract_file_key("https://www.figma.com/file/aBc123/My-Design?node-id=0");
        assert_eq!(key.as_deref(), Some("aBc123"));
    }

    #[test]
    fn test_extract_file_key_is_case_insensitive() {
        let key = extract_file_key("https://www.figma.com/FILE/XYZ789/thing");
        assert_eq!(key.as_deref(), Some("XYZ789"));
    }

    #[test]
    fn test_extract_file_key_requires_trailing_segment() {
        // No trailing slash after the key, so the pattern cannot match.
        assert_eq!(extract_file_key("https://www.figma.com/file/aBc123"), None);
        assert_eq!(extract_file_key("https://www.figma.com/"), None);
    }

    #[test]
    fn test_new_rejects_url_without_key() {
        let result = ExportConfig::new("token", "https://example.com/nothing-here");
        assert!(matches!(result, Err(ConfigError::MissingFileKey { .. })));
    }

    #[test]
    fn test_defaults() {
        let config = test_config();
        assert_eq!(config.file_key, "aBc123");
        assert_eq!(config.format, ImageFormat::Jpg);
        assert_eq!(config.output_dir, PathBuf::from("./build/"));
        assert!((config.scale - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.concurrency, DEFAULT_DOWNLOAD_CONCURRENCY);
        assert_eq!(config.failure_mode, FailureMode::FailFast);
    }

    #[test]
    fn test_apply_overrides_recognized_keys() {
        let mut config = test_config();
        config
            .apply_overrides(["format=png", "outputDir=./out/", "scale=2", "keepGoing=true"])
            .unwrap();
        assert_eq!(config.format, ImageFormat::Png);
        assert_eq!(config.output_dir, PathBuf::from("./out/"));
        assert!((config.scale - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.failure_mode, FailureMode::KeepGoing);
    }

    #[test]
    fn test_apply_overrides_ignores_unrecognized_key() {
        let mut config = test_config();
        config.apply_overrides(["colour=blue"]).unwrap();
        assert_eq!(config.format, ImageFormat::Jpg);
    }

    #[test]
    fn test_apply_overrides_ignores_malformed_pair() {
        let mut config = test_config();
        config.apply_overrides(["justaword"]).unwrap();
        assert_eq!(config.format, ImageFormat::Jpg);
        assert_eq!(config.output_dir, PathBuf::from("./build/"));
    }

    #[test]
    fn test_apply_overrides_rejects_bad_format() {
        let mut config = test_config();
        let result = config.apply_overrides(["format=bmp"]);
        assert!(matches!(result, Err(ConfigError::InvalidFormat { .. })));
    }

    #[test]
    fn test_apply_overrides_rejects_bad_scale() {
        let mut config = test_config();
        let result = config.apply_overrides(["scale=big"]);
        assert!(matches!(result, Err(ConfigError::InvalidScale { .. })));
    }

    #[test]
    fn test_apply_overrides_rejects_bad_keep_going() {
        let mut config = test_config();
        let result = config.apply_overrides(["keepGoing=maybe"]);
        assert!(matches!(result, Err(ConfigError::InvalidKeepGoing { .. })));
        // Bad value for a recognized key is fatal, not silently ignored.
        assert_eq!(config.failure_mode, FailureMode::FailFast);
    }

    #[test]
    fn test_image_format_parsing() {
        assert_eq!("jpg".parse::<ImageFormat>().unwrap(), ImageFormat::Jpg);
        assert_eq!("JPEG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpg);
        assert_eq!("png".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
        assert_eq!("svg".parse::<ImageFormat>().unwrap(), ImageFormat::Svg);
        assert_eq!("pdf".parse::<ImageFormat>().unwrap(), ImageFormat::Pdf);
        assert!("gif".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn test_image_format_content_types() {
        assert_eq!(ImageFormat::Jpg.content_type(), "image/jpeg");
        assert_eq!(ImageFormat::Png.content_type(), "image/png");
        assert_eq!(ImageFormat::Svg.content_type(), "image/svg+xml");
        assert!(ImageFormat::Svg.is_text());
        assert!(!ImageFormat::Jpg.is_text());
    }
}
