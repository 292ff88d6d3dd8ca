//! Chat platform capabilities
//!
//! Which kinds of content each chat transport can deliver natively.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Kind of content a platform can deliver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Text,
    Image,
    Audio,
    Document,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Text => write!(f, "text"),
            Capability::Image => write!(f, "image"),
            Capability::Audio => write!(f, "audio"),
            Capability::Document => write!(f, "document"),
        }
    }
}

const BUILTIN_PLATFORMS: &[(&str, &[Capability])] = &[
    (
        "telegram",
        &[Capability::Text, Capability::Image, Capability::Audio, Capability::Document],
    ),
    (
        "facebook",
        &[Capability::Text, Capability::Image, Capability::Audio, Capability::Document],
    ),
    (
        "slack",
        &[Capability::Text, Capability::Image, Capability::Audio, Capability::Document],
    ),
];

/// Registry of chat platforms and their capabilities
///
/// Read-only once built; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    platforms: HashMap<String, HashSet<Capability>>,
}

impl PlatformRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            platforms: HashMap::new(),
        }
    }

    /// Register a platform, replacing any earlier registration
    pub fn with_platform(
        mut self,
        transport: impl Into<String>,
        capabilities: impl IntoIterator<Item = Capability>,
    ) -> Self {
        self.platforms
            .insert(transport.into(), capabilities.into_iter().collect());
        self
    }

    /// Whether `transport` natively supports `capability`.
    ///
    /// Unknown transports support nothing.
    pub fn supports(&self, transport: &str, capability: Capability) -> bool {
        self.platforms
            .get(transport)
            .is_some_and(|caps| caps.contains(&capability))
    }

}

impl Default for PlatformRegistry {
    fn default() -> Self {
        BUILTIN_PLATFORMS
            .iter()
            .fold(Self::empty(), |registry, (name, caps)| {
                registry.with_platform(*name, caps.iter().copied())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_platforms_support_audio() {
        let registry = PlatformRegistry::default();
        assert!(registry.supports("telegram", Capability::Audio));
        assert!(registry.supports("facebook", Capability::Audio));
        assert!(registry.supports("slack", Capability::Audio));
        assert!(!registry.supports("discord", Capability::Audio));
    }

    #[test]
    fn test_unknown_platform_supports_nothing() {
        let registry = PlatformRegistry::default();
        assert!(!registry.supports("smoke-signals", Capability::Audio));
        assert!(!registry.supports("", Capability::Text));
    }

    #[test]
    fn test_with_platform_registers_capabilities() {
        let registry = PlatformRegistry::empty().with_platform("discord", [Capability::Text]);
        assert!(registry.supports("discord", Capability::Text));
        assert!(!registry.supports("discord", Capability::Audio));
    }

    #[test]
    fn test_capability_display() {
        assert_eq!(Capability::Audio.to_string(), "audio");
    }
}
