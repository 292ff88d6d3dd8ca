//! Audio node settings.

use serde::{Deserialize, Serialize};

/// Transports an audio node is explicitly configured for by default
pub const DEFAULT_TRANSPORTS: &[&str] = &["telegram", "slack", "facebook"];

/// Settings of one audio node instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AudioNodeConfig {
    /// Display name of the node
    pub name: String,
    /// File name to send, overriding every derived name
    pub filename: Option<String>,
    /// Audio reference (path or URL) taking precedence over the message
    pub audio: Option<String>,
    /// Caption taking precedence over `payload.caption`
    pub caption: Option<String>,
    /// Transports this node handles even without native audio support
    pub transports: Vec<String>,
}

impl Default for AudioNodeConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            filename: None,
            audio: None,
            caption: None,
            transports: DEFAULT_TRANSPORTS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl AudioNodeConfig {
    /// Create a config with the given display name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the fixed file name
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set the audio reference
    pub fn with_audio(mut self, audio: impl Into<String>) -> Self {
        self.audio = Some(audio.into());
        self
    }

    /// Set the caption
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Replace the configured transports
    pub fn with_transports<I, S>(mut self, transports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.transports = transports.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the node is configured for `transport`
    pub fn matches_transport(&self, transport: &str) -> bool {
        self.transports.iter().any(|t| t == transport)
    }
}
