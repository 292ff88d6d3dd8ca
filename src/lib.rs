//! chatbot-audio library
//!
//! An audio node for chatbot flows. Given an inbound message that references
//! audio (a local path, an http(s) URL or raw bytes), it fetches the bytes,
//! checks the format against the transport, picks a file name and emits an
//! outbound audio message bound to the same chat.

pub mod channels;
pub mod cli;
pub mod config;
pub mod logging;
pub mod media;
pub mod messages;
pub mod nodes;

pub use media::{FetchConfig, MediaFetcher};
pub use messages::{InboundEvent, OutboundAudioEvent, Payload};
pub use nodes::{AudioNode, AudioNodeConfig, AudioNodeError, ChannelSink, NodeSink};
