//! Outbound message sinks

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::render::OutboundMessage;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type SinkResult<T> = std::result::Result<T, SinkError>;

/// Where rendered messages go
///
/// The dispatcher treats every send as fire-and-forget: an error is logged
/// and the conversation carries on.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, message: OutboundMessage) -> SinkResult<()>;

    /// Sink name for logs
    fn name(&self) -> &str;
}

/// Records every message in memory
#[derive(Clone, Default)]
pub struct MemorySink {
    messages: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, oldest first
    pub async fn messages(&self) -> Vec<OutboundMessage> {
        self.messages.lock().await.clone()
    }

    /// Drain the recorded messages
    pub async fn take(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *self.messages.lock().await)
    }

    pub async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.messages.lock().await.is_empty()
    }
}

#[async_trait]
impl MessageSink for MemorySink {
    async fn send(&self, message: OutboundMessage) -> SinkResult<()> {
        self.messages.lock().await.push(message);
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gembot_types::ChatId;

    #[tokio::test]
    async fn test_memory_sink_records_and_drains() {
        let sink = MemorySink::new();
        let shared = sink.clone();

        sink.send(OutboundMessage::text(ChatId::new(1), "one"))
            .await
            .unwrap();
        sink.send(OutboundMessage::text(ChatId::new(1), "two"))
            .await
            .unwrap();

        assert_eq!(shared.len().await, 2);
        let taken = shared.take().await;
        assert_eq!(taken[1].text, "two");
        assert!(sink.is_empty().await);
    }
}
