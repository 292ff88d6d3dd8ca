//! Media fetching.
//!
//! Turns a [`FetchSource`] into bytes plus, when it can be inferred, a file
//! extension. The actual I/O goes through [`FetchPrimitives`]; [`MediaFetcher`]
//! is the default implementation backed by `tokio::fs` and `reqwest`.
//!
//! Nothing here retries. Errors from the primitives are surfaced as they are.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::classify::FetchSource;
use crate::logging::redact_url;

/// Default request timeout (30 seconds)
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 30_000;

/// Default connect timeout (10 seconds)
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 10_000;

/// Upper bound accepted for `timeout_ms`
pub const MAX_FETCH_TIMEOUT_MS: u64 = 300_000;

/// Default maximum media size (25 MiB)
pub const DEFAULT_MAX_SIZE: u64 = 25 * 1024 * 1024;

/// Longest URL the fetcher will request
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur while fetching media
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("media too large: {size} bytes exceeds limit of {limit} bytes")]
    TooLarge { size: u64, limit: u64 },
}

/// Bytes produced by a fetch, with the extension inferred for them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedFile {
    /// File contents
    pub buffer: Bytes,
    /// Lower-cased extension with leading dot (".mp3"), or empty when unknown
    pub extension: String,
}

impl FetchedFile {
    /// Wrap bytes that have no known extension
    pub fn from_bytes(buffer: Bytes) -> Self {
        Self {
            buffer,
            extension: String::new(),
        }
    }
}

/// Body and metadata of a remote resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub bytes: Bytes,
    /// `Content-Type` response header, if any
    pub content_type: Option<String>,
}

/// Low-level byte fetching
#[async_trait]
pub trait FetchPrimitives: Send + Sync {
    /// Read a local file.
    async fn read_file(&self, path: &Path) -> Result<Bytes, FetchError>;

    /// Download a remote resource.
    async fn fetch_url(&self, url: &Url) -> Result<RemoteFile, FetchError>;
}

/// Fetch the bytes behind `source`.
///
/// Local paths only use [`FetchPrimitives::read_file`], URLs only use
/// [`FetchPrimitives::fetch_url`], and buffers are returned without any I/O.
pub async fn dispatch(
    source: &FetchSource,
    primitives: &dyn FetchPrimitives,
) -> Result<FetchedFile, FetchError> {
    match source {
        FetchSource::FilePath(path) => {
            debug!(path = %path.display(), "reading audio file");
            let buffer = primitives.read_file(path).await?;
            Ok(FetchedFile {
                buffer,
                extension: extension_from_path(path).unwrap_or_default(),
            })
        }
        FetchSource::Url(url) => {
            debug!(url = %redact_url(url.as_str()), "downloading audio");
            let remote = primitives.fetch_url(url).await?;
            let extension = remote
                .content_type
                .as_deref()
                .and_then(extension_for_content_type)
                .map(str::to_string)
                .or_else(|| extension_from_url(url))
                .unwrap_or_default();
            Ok(FetchedFile {
                buffer: remote.bytes,
                extension,
            })
        }
        FetchSource::Buffer(bytes) => Ok(FetchedFile::from_bytes(bytes.clone())),
    }
}

/// Extension of a path, lower-cased with a leading dot.
pub fn extension_from_path(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Extension of the last segment of a URL path.
pub fn extension_from_url(url: &Url) -> Option<String> {
    let last = url.path_segments()?.next_back()?;
    extension_from_path(Path::new(last))
}

/// Map an audio content type to a file extension.
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let base = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_lowercase();
    match base.as_str() {
        "audio/mpeg" | "audio/mp3" | "audio/mpeg3" | "audio/x-mpeg-3" => Some(".mp3"),
        "audio/ogg" | "audio/opus" => Some(".ogg"),
        "audio/wav" | "audio/x-wav" | "audio/wave" => Some(".wav"),
        "audio/mp4" | "audio/m4a" | "audio/x-m4a" => Some(".m4a"),
        "audio/aac" => Some(".aac"),
        "audio/webm" => Some(".webm"),
        "audio/flac" | "audio/x-flac" => Some(".flac"),
        _ => None,
    }
}

/// Configuration for [`MediaFetcher`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FetchConfig {
    /// Whole-request timeout in milliseconds
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Largest file accepted, in bytes
    pub max_size: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

/// Default [`FetchPrimitives`] backed by the local filesystem and an HTTP client
#[derive(Debug, Clone)]
pub struct MediaFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl MediaFetcher {
    /// Create a fetcher with default configuration
    pub fn new() -> Result<Self, FetchError> {
        Self::with_config(FetchConfig::default())
    }

    /// Create a fetcher with custom configuration
    pub fn with_config(config: FetchConfig) -> Result<Self, FetchError> {
        let timeout_ms = config.timeout_ms.clamp(1, MAX_FETCH_TIMEOUT_MS);
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms.max(1)))
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| FetchError::Request {
                url: String::new(),
                reason: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    fn check_size(&self, size: u64) -> Result<(), FetchError> {
        if size > self.config.max_size {
            return Err(FetchError::TooLarge {
                size,
                limit: self.config.max_size,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FetchPrimitives for MediaFetcher {
    async fn read_file(&self, path: &Path) -> Result<Bytes, FetchError> {
        let display = path.display().to_string();
        let io_error = |e: std::io::Error| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound(display.clone())
            } else {
                FetchError::Io {
                    path: display.clone(),
                    reason: e.to_string(),
                }
            }
        };

        let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
        if !metadata.is_file() {
            return Err(FetchError::Io {
                path: display.clone(),
                reason: "not a regular file".to_string(),
            });
        }
        self.check_size(metadata.len())?;

        let bytes = tokio::fs::read(path).await.map_err(io_error)?;
        Ok(Bytes::from(bytes))
    }

    async fn fetch_url(&self, url: &Url) -> Result<RemoteFile, FetchError> {
        if url.as_str().len() > MAX_URL_LENGTH {
            return Err(FetchError::InvalidUrl(format!(
                "URL exceeds {} characters",
                MAX_URL_LENGTH
            )));
        }
        let shown = redact_url(url.as_str());
        let request_error = |e: reqwest::Error| FetchError::Request {
            url: shown.clone(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: shown.clone(),
                status: status.as_u16(),
            });
        }

        if let Some(length) = response.content_length() {
            self.check_size(length)?;
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(request_error)?;
            self.check_size((body.len() + chunk.len()) as u64)?;
            body.extend_from_slice(&chunk);
        }

        Ok(RemoteFile {
            bytes: body.freeze(),
            content_type,
        })
    }
}
