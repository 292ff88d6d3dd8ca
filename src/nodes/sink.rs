//! Where a node's results go.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::warn;

use super::error::AudioNodeError;
use crate::messages::OutboundAudioEvent;

/// Receiver of node output
#[async_trait]
pub trait NodeSink: Send + Sync {
    /// Forward an outbound message to the next node
    async fn send(&self, event: OutboundAudioEvent);

    /// Report an error to the host
    async fn error(&self, error: AudioNodeError);
}

/// [`NodeSink`] backed by two bounded mpsc channels
#[derive(Debug, Clone)]
pub struct ChannelSink {
    outbound_tx: mpsc::Sender<OutboundAudioEvent>,
    error_tx: mpsc::Sender<AudioNodeError>,
}

impl ChannelSink {
    /// Create a sink from existing senders
    pub fn new(
        outbound_tx: mpsc::Sender<OutboundAudioEvent>,
        error_tx: mpsc::Sender<AudioNodeError>,
    ) -> Self {
        Self {
            outbound_tx,
            error_tx,
        }
    }

    /// Create a sink together with the receiving ends of its channels
    pub fn channel(
        capacity: usize,
    ) -> (
        Self,
        mpsc::Receiver<OutboundAudioEvent>,
        mpsc::Receiver<AudioNodeError>,
    ) {
        let (outbound_tx, outbound_rx) = mpsc::channel(capacity);
        let (error_tx, error_rx) = mpsc::channel(capacity);
        (Self::new(outbound_tx, error_tx), outbound_rx, error_rx)
    }
}

#[async_trait]
impl NodeSink for ChannelSink {
    async fn send(&self, event: OutboundAudioEvent) {
        if self.outbound_tx.send(event).await.is_err() {
            warn!("outbound receiver dropped; audio message discarded");
        }
    }

    async fn error(&self, error: AudioNodeError) {
        if let Err(e) = self.error_tx.send(error).await {
            warn!(error = %e.0, "error receiver dropped; error discarded");
        }
    }
}
