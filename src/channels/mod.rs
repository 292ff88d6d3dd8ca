//! Chat channels
//!
//! Capability lookup for the chat transports messages arrive on.

pub mod registry;

pub use registry::{Capability, PlatformRegistry};
