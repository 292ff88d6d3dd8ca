//! Media pipeline module
//!
//! Resolves an audio reference found in a message into bytes ready to send:
//!
//! - **classify**: decides whether a candidate is a local path, a URL, raw
//!   bytes or unusable text
//! - **fetch**: reads or downloads the bytes and infers an extension
//!   - [`MediaFetcher`] is the default backend (`tokio::fs` + `reqwest`)
//!   - size limits and timeouts live in [`FetchConfig`]
//! - **validate**: checks the extension against what the transport accepts
//! - **filename**: picks the name shown to the recipient
//!
//! # Example
//!
//! ```ignore
//! use chatbot_audio::media::{
//!     classify, dispatch, validate_extension, ContentCandidate, MediaFetcher,
//! };
//!
//! let candidate = ContentCandidate::Text("https://example.com/clip.mp3".into());
//! let Ok(source) = classify(&candidate).into_fetch_source() else {
//!     return;
//! };
//! let file = dispatch(&source, &MediaFetcher::new()?).await?;
//! validate_extension(&file.extension, "telegram")?;
//! ```

pub mod classify;
pub mod fetch;
pub mod filename;
pub mod validate;

pub use classify::{
    classify, ClassifiedSource, ContentCandidate, FetchSource, RejectedSource, SourceKind,
    MAX_INLINE_TEXT_CHARS,
};
pub use fetch::{
    dispatch, FetchConfig, FetchError, FetchPrimitives, FetchedFile, MediaFetcher, RemoteFile,
    DEFAULT_FETCH_TIMEOUT_MS, DEFAULT_MAX_SIZE, MAX_FETCH_TIMEOUT_MS, MAX_URL_LENGTH,
};
pub use filename::{base_name, resolve_filename, sanitize_filename};
pub use validate::{allowed_extensions, validate_extension, TRANSPORT_AUDIO_EXTENSIONS};
