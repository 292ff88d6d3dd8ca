//! Flow message types
//!
//! Inbound messages as they arrive at a node and the outbound audio message an
//! audio node produces.

pub mod buffer;
pub mod inbound;
pub mod outbound;

pub use inbound::{InboundEvent, OriginalMessage, Payload};
pub use outbound::{AudioPayload, ContentType, OutboundAudioEvent};
