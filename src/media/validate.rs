//! Per-transport audio format checks.

use crate::nodes::AudioNodeError;

/// Audio file extensions each transport accepts.
///
/// Transports missing from the table accept no extension at all.
pub const TRANSPORT_AUDIO_EXTENSIONS: &[(&str, &[&str])] = &[
    ("facebook", &[".mp3"]),
    ("telegram", &[".mp3"]),
    ("slack", &[".mp3"]),
];

/// Extensions accepted by `transport`; empty for unknown transports.
pub fn allowed_extensions(transport: &str) -> &'static [&'static str] {
    TRANSPORT_AUDIO_EXTENSIONS
        .iter()
        .find(|(name, _)| *name == transport)
        .map(|(_, extensions)| *extensions)
        .unwrap_or(&[])
}

/// Check a fetched file's extension against what `transport` accepts.
///
/// An empty extension always passes: there is nothing to check.
pub fn validate_extension(extension: &str, transport: &str) -> Result<(), AudioNodeError> {
    if extension.is_empty() {
        return Ok(());
    }
    let allowed = allowed_extensions(transport);
    if allowed.iter().any(|ext| ext.eq_ignore_ascii_case(extension)) {
        Ok(())
    } else {
        Err(AudioNodeError::UnsupportedFormat {
            allowed: allowed.join(", "),
        })
    }
}
