//! Audio node.
//!
//! Turns an inbound message referencing audio into an outbound audio message.
//! Each message goes through, in order:
//!
//! 1. pre-checks: the message has a chat context and its transport can carry
//!    audio (natively or by node configuration); otherwise the node stays
//!    silent
//! 2. extraction and classification of the audio reference
//! 3. fetching the bytes (the only await point)
//! 4. extension check against the transport
//! 5. file name resolution
//! 6. building the outbound message
//!
//! Every message ends in exactly one of: an outbound message, an error, or a
//! silent halt at step 1.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::config::AudioNodeConfig;
use super::error::AudioNodeError;
use super::extract::{extract_caption, extract_content};
use super::sink::NodeSink;
use crate::channels::{Capability, PlatformRegistry};
use crate::media::{classify, dispatch, resolve_filename, validate_extension, FetchPrimitives};
use crate::messages::{InboundEvent, OutboundAudioEvent};

/// One configured audio node
///
/// Holds only read-only state, so a single `Arc<AudioNode>` can process any
/// number of messages concurrently.
pub struct AudioNode {
    config: AudioNodeConfig,
    platforms: Arc<PlatformRegistry>,
    fetcher: Arc<dyn FetchPrimitives>,
}

impl std::fmt::Debug for AudioNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioNode")
            .field("config", &self.config)
            .field("platforms", &self.platforms)
            .finish_non_exhaustive()
    }
}

impl AudioNode {
    /// Create a node using the built-in platform registry
    pub fn new(config: AudioNodeConfig, fetcher: Arc<dyn FetchPrimitives>) -> Self {
        Self {
            config,
            platforms: Arc::new(PlatformRegistry::default()),
            fetcher,
        }
    }

    /// Use a custom platform registry
    pub fn with_platforms(mut self, platforms: Arc<PlatformRegistry>) -> Self {
        self.platforms = platforms;
        self
    }

    /// Transport of `event` if this node should handle it.
    fn applicable_transport<'a>(&self, event: &'a InboundEvent) -> Option<&'a str> {
        if !event.is_valid() {
            return None;
        }
        let transport = event.transport()?;
        let handled = self.platforms.supports(transport, Capability::Audio)
            || self.config.matches_transport(transport);
        handled.then_some(transport)
    }

    /// Process one message.
    ///
    /// Returns `Ok(None)` when the message is not for this node.
    pub async fn process(
        &self,
        event: InboundEvent,
    ) -> Result<Option<OutboundAudioEvent>, AudioNodeError> {
        let Some(transport) = self.applicable_transport(&event).map(str::to_string) else {
            debug!(
                node = %self.config.name,
                transport = event.transport().unwrap_or(""),
                "message not applicable to audio node"
            );
            return Ok(None);
        };

        let candidate = extract_content(&self.config, &event);
        let classified = classify(&candidate);
        let kind = classified.kind();
        let source = classified.into_fetch_source()?;
        debug!(node = %self.config.name, %transport, source = %kind, "fetching audio");

        let file = dispatch(&source, self.fetcher.as_ref()).await?;
        validate_extension(&file.extension, &transport)?;

        let filename = resolve_filename(&self.config, &event, &source);
        let caption = extract_caption(&self.config, &event);
        info!(
            node = %self.config.name,
            %transport,
            bytes = file.buffer.len(),
            filename = %filename,
            "sending audio"
        );
        Ok(Some(OutboundAudioEvent::reply_to(
            event,
            file.buffer,
            caption,
            filename,
        )))
    }

    /// Process `event` on its own task and hand the outcome to `sink`.
    pub fn handle_input(
        self: &Arc<Self>,
        event: InboundEvent,
        sink: Arc<dyn NodeSink>,
    ) -> JoinHandle<()> {
        let node = Arc::clone(self);
        tokio::spawn(async move {
            match node.process(event).await {
                Ok(Some(outbound)) => sink.send(outbound).await,
                Ok(None) => {}
                Err(error) => {
                    warn!(node = %node.config.name, %error, "audio node error");
                    sink.error(error).await;
                }
            }
        })
    }
}
