//! Content source classification.
//!
//! Decides what an audio reference pulled out of a message actually is: a
//! local path, a remote URL, raw bytes, or a plain string that cannot be
//! turned into audio.

use std::path::PathBuf;

use bytes::Bytes;
use serde_json::Value;
use url::Url;

/// Strings longer than this (in characters) are never treated as inline text.
pub const MAX_INLINE_TEXT_CHARS: usize = 4064;

/// Longest string still considered a filesystem path.
pub const MAX_PATH_CHARS: usize = 4096;

/// Raw value extracted from a message before classification
#[derive(Debug, Clone, PartialEq)]
pub enum ContentCandidate {
    /// Nothing was found
    Absent,
    /// A string: path, URL or arbitrary text
    Text(String),
    /// Binary data
    Buffer(Bytes),
    /// Any other JSON value
    Other(Value),
}

/// Kind of a classified source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    FilePath,
    Url,
    Buffer,
    InlineText,
    OversizedText,
    Unrecognized,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::FilePath => write!(f, "file_path"),
            SourceKind::Url => write!(f, "url"),
            SourceKind::Buffer => write!(f, "buffer"),
            SourceKind::InlineText => write!(f, "inline_text"),
            SourceKind::OversizedText => write!(f, "oversized_text"),
            SourceKind::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Result of classifying a [`ContentCandidate`]
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedSource {
    /// Local file; existence is not checked
    FilePath(PathBuf),
    /// Remote http(s) resource
    Url(Url),
    /// Bytes already in memory
    Buffer(Bytes),
    /// A short string that is neither a path nor a URL
    InlineText(String),
    /// A string over [`MAX_INLINE_TEXT_CHARS`] characters
    OversizedText { length: usize },
    /// Anything else, rendered for diagnostics
    Unrecognized(String),
}

impl ClassifiedSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::FilePath(_) => SourceKind::FilePath,
            Self::Url(_) => SourceKind::Url,
            Self::Buffer(_) => SourceKind::Buffer,
            Self::InlineText(_) => SourceKind::InlineText,
            Self::OversizedText { .. } => SourceKind::OversizedText,
            Self::Unrecognized(_) => SourceKind::Unrecognized,
        }
    }

    /// Split into something to fetch or a reason there is nothing to fetch.
    pub fn into_fetch_source(self) -> Result<FetchSource, RejectedSource> {
        match self {
            Self::FilePath(path) => Ok(FetchSource::FilePath(path)),
            Self::Url(url) => Ok(FetchSource::Url(url)),
            Self::Buffer(bytes) => Ok(FetchSource::Buffer(bytes)),
            Self::InlineText(text) => Err(RejectedSource::InlineText(text)),
            Self::OversizedText { length } => Err(RejectedSource::OversizedText { length }),
            Self::Unrecognized(value) => Err(RejectedSource::Unrecognized(value)),
        }
    }
}

/// A classified source with nothing to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectedSource {
    InlineText(String),
    OversizedText { length: usize },
    Unrecognized(String),
}

/// A source the fetcher knows how to turn into bytes
#[derive(Debug, Clone, PartialEq)]
pub enum FetchSource {
    FilePath(PathBuf),
    Url(Url),
    Buffer(Bytes),
}

impl FetchSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::FilePath(_) => SourceKind::FilePath,
            Self::Url(_) => SourceKind::Url,
            Self::Buffer(_) => SourceKind::Buffer,
        }
    }
}

/// Classify a content candidate.
///
/// Checks run in a fixed order: path, URL, buffer, oversized string, inline
/// string. The same candidate always yields the same result.
pub fn classify(candidate: &ContentCandidate) -> ClassifiedSource {
    match candidate {
        ContentCandidate::Text(text) => {
            if is_path_syntax(text) {
                ClassifiedSource::FilePath(PathBuf::from(text))
            } else if let Some(url) = parse_http_url(text) {
                ClassifiedSource::Url(url)
            } else {
                let length = text.chars().count();
                if length > MAX_INLINE_TEXT_CHARS {
                    ClassifiedSource::OversizedText { length }
                } else {
                    ClassifiedSource::InlineText(text.clone())
                }
            }
        }
        ContentCandidate::Buffer(bytes) => ClassifiedSource::Buffer(bytes.clone()),
        ContentCandidate::Absent => ClassifiedSource::Unrecognized("undefined".to_string()),
        ContentCandidate::Other(value) => ClassifiedSource::Unrecognized(value.to_string()),
    }
}

/// Whether `text` looks like a filesystem path.
///
/// Accepts absolute paths, `./` and `../` relative paths and Windows drive
/// paths. Rejects line breaks and NUL.
pub fn is_path_syntax(text: &str) -> bool {
    if text.is_empty() || text.chars().count() > MAX_PATH_CHARS {
        return false;
    }
    if text.contains(['\0', '\n', '\r']) {
        return false;
    }
    text.starts_with('/')
        || text.starts_with("./")
        || text.starts_with("../")
        || is_windows_drive_path(text)
}

fn is_windows_drive_path(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/')
}

/// Parse an absolute http(s) URL with a host.
pub fn parse_http_url(text: &str) -> Option<Url> {
    let url = Url::parse(text.trim()).ok()?;
    let scheme_ok = matches!(url.scheme(), "http" | "https");
    let host_ok = url.host_str().is_some_and(|h| !h.is_empty());
    (scheme_ok && host_ok).then_some(url)
}
