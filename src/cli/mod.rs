//! CLI subcommand definitions and handlers.
//!
//! Uses clap derive to define the subcommand hierarchy:
//! - `run --event <file>` -- push one inbound message through the audio node
//! - `config show|path` -- inspect the effective configuration
//! - `version` -- print build/version info

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};

/// Audio node for chatbot flows.
#[derive(Parser, Debug)]
#[command(
    name = "chatbot-audio",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolves audio references in chatbot messages into outbound audio messages"
)]
pub struct Cli {
    /// Configuration file (JSON5). Defaults to $CHATBOT_AUDIO_CONFIG, then
    /// ./chatbot-audio.json5.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one inbound message (JSON file) through the audio node.
    Run {
        /// Inbound message as JSON.
        #[arg(short, long)]
        event: PathBuf,

        /// Write the outbound message here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Inspect configuration.
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Print version, build date, and git commit information.
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the fully loaded configuration as JSON.
    Show,

    /// Print the resolved configuration file path.
    Path,
}

// ---------------------------------------------------------------------------
// Subcommand handlers
// ---------------------------------------------------------------------------

use crate::config::{self, AppConfig};
use crate::media::MediaFetcher;
use crate::messages::InboundEvent;
use crate::nodes::AudioNode;

/// Load the configuration selected by `--config` or the environment.
pub fn load_app_config(explicit: Option<&Path>) -> Result<AppConfig, config::ConfigError> {
    config::load_config(&config::get_config_path(explicit))
}

/// Run the `run` subcommand.
///
/// A silent halt prints nothing. A node error is returned to the caller,
/// which exits non-zero.
pub async fn handle_run(
    cfg: AppConfig,
    event_path: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = tokio::fs::read_to_string(event_path).await?;
    let event: InboundEvent = serde_json::from_str(&raw)?;

    let fetcher = MediaFetcher::with_config(cfg.fetch)?;
    let node = AudioNode::new(cfg.node, Arc::new(fetcher));

    let Some(outbound) = node.process(event).await? else {
        tracing::debug!("message not handled by the audio node");
        return Ok(());
    };

    let pretty = serde_json::to_string_pretty(&outbound)?;
    match output {
        Some(path) => tokio::fs::write(path, pretty).await?,
        None => println!("{}", pretty),
    }
    Ok(())
}

/// Run the `config show` subcommand.
pub fn handle_config_show(cfg: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let pretty = serde_json::to_string_pretty(cfg)?;
    println!("{}", pretty);
    Ok(())
}

/// Run the `config path` subcommand.
pub fn handle_config_path(explicit: Option<&Path>) {
    println!("{}", config::get_config_path(explicit).display());
}

/// Run the `version` subcommand.
pub fn handle_version() {
    println!("chatbot-audio {}", env!("CARGO_PKG_VERSION"));
    println!("  Build date: {}", env!("CHATBOT_AUDIO_BUILD_DATE"));
    println!("  Git commit: {}", env!("CHATBOT_AUDIO_GIT_HASH"));
    println!(
        "  Platform:   {} ({})",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
}
