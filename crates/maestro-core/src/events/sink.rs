//! Bounded channel carrying events from the worker task to the caller

use super::types::OrchestrationEvent;
use crate::error::{Error, Result};
use futures::stream::{BoxStream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

/// Stream of events as seen by the caller
pub type EventStream = BoxStream<'static, OrchestrationEvent>;

/// Producer half of an orchestration event channel
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::Sender<OrchestrationEvent>,
}

impl EventSink {
    /// Create a sink and the stream it feeds.
    ///
    /// `capacity` bounds how far the producer may run ahead of the consumer.
    pub fn channel(capacity: usize) -> (Self, EventStream) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, ReceiverStream::new(rx).boxed())
    }

    /// Deliver one event, waiting for buffer space.
    ///
    /// Returns [`Error::Cancelled`] once the consumer has dropped the stream.
    pub async fn emit(&self, event: OrchestrationEvent) -> Result<()> {
        self.tx.send(event).await.map_err(|_| Error::Cancelled)
    }

    /// Resolves when the consumer has dropped the stream
    pub async fn closed(&self) {
        self.tx.closed().await;
    }

    /// Whether the consumer is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
