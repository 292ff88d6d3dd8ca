//! Configuration loading
//!
//! The configuration file is JSON5. Every section is optional and falls back
//! to its defaults:
//!
//! ```json5
//! {
//!   node: { name: "Radio", transports: ["telegram", "slack"] },
//!   fetch: { timeoutMs: 30000, maxSize: 26214400 },
//!   logging: { enabled: true, level: "debug", format: { type: "Text" } },
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LoggingConfig;
use crate::media::FetchConfig;
use crate::nodes::AudioNodeConfig;

/// Environment variable overriding the configuration file path
pub const CONFIG_PATH_ENV: &str = "CHATBOT_AUDIO_CONFIG";

/// Configuration file used when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "chatbot-audio.json5";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },
}

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Audio node settings
    pub node: AudioNodeConfig,
    /// Media fetching limits
    pub fetch: FetchConfig,
    /// Logging setup
    pub logging: LoggingConfig,
}

/// Resolve the configuration path: explicit argument, then
/// [`CONFIG_PATH_ENV`], then [`DEFAULT_CONFIG_FILE`].
pub fn get_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    std::env::var_os(CONFIG_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Parse configuration from JSON5 text.
pub fn parse_config(content: &str, origin: &str) -> Result<AppConfig, ConfigError> {
    json5::from_str(content).map_err(|e| ConfigError::Parse {
        path: origin.to_string(),
        reason: e.to_string(),
    })
}

/// Load configuration from `path`.
///
/// A missing file yields the defaults; any other read failure is an error.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let shown = path.display().to_string();
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content, &shown),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %shown, "no config file, using defaults");
            Ok(AppConfig::default())
        }
        Err(source) => Err(ConfigError::Read {
            path: shown,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::ExportFormat;

    #[test]
    fn test_parse_json5_config() {
        let config = parse_config(
            r#"{
                // comments and trailing commas are fine
                node: { name: "Radio", filename: "show.mp3", transports: ["telegram"], },
                fetch: { maxSize: 1024 },
                logging: { enabled: true, level: "debug", format: { type: "Text" } },
            }"#,
            "inline",
        )
        .unwrap();

        assert_eq!(config.node.name, "Radio");
        assert_eq!(config.node.filename.as_deref(), Some("show.mp3"));
        assert_eq!(config.node.transports, vec!["telegram".to_string()]);
        assert_eq!(config.fetch.max_size, 1024);
        assert_eq!(config.fetch.timeout_ms, crate::media::DEFAULT_FETCH_TIMEOUT_MS);
        assert!(config.logging.enabled);
        assert_eq!(config.logging.level, "debug");
        assert!(matches!(config.logging.format, ExportFormat::Text));
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = parse_config("{}", "inline").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = parse_config("{ node: ", "broken.json5").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse broken.json5"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.json5")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json5");
        std::fs::write(&path, "{ node: { name: 'Jukebox' } }").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.node.name, "Jukebox");
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = get_config_path(Some(Path::new("/etc/bot.json5")));
        assert_eq!(path, PathBuf::from("/etc/bot.json5"));
    }
}
