//! Outbound file names.
//!
//! [`resolve_filename`] picks the name shown to the recipient from, in order
//! of priority:
//!
//! 1. the file name configured on the node
//! 2. the base name of a local source path
//! 3. the node name, for URL sources
//! 4. the message `filename` field
//! 5. the payload `filename` field
//! 6. a short string payload
//! 7. the node name
//!
//! The first level producing a non-empty name wins. When none does the name is
//! empty, which is a valid outcome. Names taken from paths never keep their
//! directory part.

use std::sync::LazyLock;

use regex::Regex;

use super::classify::FetchSource;
use crate::messages::InboundEvent;
use crate::nodes::AudioNodeConfig;

/// String payloads at least this long (in characters) are not used as names.
pub const MAX_PAYLOAD_NAME_CHARS: usize = 256;

/// Longest sanitized name, in bytes.
pub const MAX_FILENAME_BYTES: usize = 255;

static ILLEGAL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"[/?<>\\:*|"]"#).unwrap());
static CONTROL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\x00-\x1f\x80-\x9f]").unwrap());
static RESERVED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\.+$").unwrap());
static WINDOWS_RESERVED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(con|prn|aux|nul|com[0-9]|lpt[0-9])(\..*)?$").unwrap()
});
static WINDOWS_TRAILING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[. ]+$").unwrap());

/// Make `name` safe to use as a file name on common filesystems.
///
/// Removes path separators and other reserved characters, control
/// characters, dot-only names, Windows device names and trailing dots or
/// spaces, then truncates to [`MAX_FILENAME_BYTES`]. May return an empty
/// string.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned = ILLEGAL_RE.replace_all(name, "");
    let cleaned = CONTROL_RE.replace_all(&cleaned, "");
    let cleaned = RESERVED_RE.replace_all(&cleaned, "");
    let cleaned = WINDOWS_RESERVED_RE.replace_all(&cleaned, "");
    let cleaned = WINDOWS_TRAILING_RE.replace_all(&cleaned, "");
    truncate_bytes(&cleaned, MAX_FILENAME_BYTES).to_string()
}

/// Final component of a path, ignoring trailing separators.
///
/// Both `/` and `\` count as separators.
pub fn base_name(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed)
}

fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

fn non_empty(name: String) -> Option<String> {
    (!name.is_empty()).then_some(name)
}

/// Name derived from where the bytes came from, if the source has one.
fn source_filename(source: &FetchSource, node_name: &str) -> Option<String> {
    match source {
        FetchSource::FilePath(path) => {
            non_empty(base_name(&path.to_string_lossy()).to_string())
        }
        FetchSource::Url(_) => non_empty(sanitize_filename(node_name)),
        FetchSource::Buffer(_) => None,
    }
}

/// Pick the outbound file name for `message`, fetched from `source`.
pub fn resolve_filename(
    config: &AudioNodeConfig,
    message: &InboundEvent,
    source: &FetchSource,
) -> String {
    config
        .filename
        .as_deref()
        .and_then(|f| non_empty(sanitize_filename(base_name(f))))
        .or_else(|| source_filename(source, &config.name))
        .or_else(|| {
            message
                .message_filename()
                .and_then(|f| non_empty(base_name(f).to_string()))
        })
        .or_else(|| {
            message
                .payload
                .field_str("filename")
                .and_then(|f| non_empty(base_name(f).to_string()))
        })
        .or_else(|| {
            message
                .payload
                .as_text()
                .filter(|text| text.chars().count() < MAX_PAYLOAD_NAME_CHARS)
                .and_then(|text| non_empty(sanitize_filename(text)))
        })
        .or_else(|| non_empty(sanitize_filename(&config.name)))
        .unwrap_or_default()
}
