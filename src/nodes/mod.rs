//! Flow nodes
//!
//! The audio node and the pieces it plugs into a flow host with: its settings,
//! its error type and the sink receiving its output.

pub mod audio;
pub mod config;
pub mod error;
pub mod extract;
pub mod sink;

pub use audio::AudioNode;
pub use config::{AudioNodeConfig, DEFAULT_TRANSPORTS};
pub use error::AudioNodeError;
pub use extract::{extract_caption, extract_content};
pub use sink::{ChannelSink, NodeSink};
