// Connection manager - Owns the single duplex channel to the telemetry source
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;

use crate::domain::telemetry::TelemetryMessage;

/// Everything the dashboard can observe from the telemetry channel:
/// lifecycle transitions plus the decoded inbound messages.
#[derive(Debug)]
pub enum ChannelEvent {
    Connected,
    Disconnected,
    ConnectError(String),
    Message(TelemetryMessage),
}

/// The underlying duplex transport. `open` yields the decoded message
/// stream; the stream ending means the channel was torn down by either side.
#[async_trait]
pub trait TelemetryTransport: Send + Sync {
    async fn open(&self) -> anyhow::Result<BoxStream<'static, TelemetryMessage>>;
}

/// Holds at most one live channel and fans its events into an ordered
/// stream. Lifecycle events are synthesized here so every consumer sees
/// exactly one `Connected`/`Disconnected` edge per physical transition.
pub struct ConnectionManager {
    transport: Arc<dyn TelemetryTransport>,
    events: mpsc::Sender<ChannelEvent>,
    reader: Option<JoinHandle<()>>,
}

impl ConnectionManager {
    pub fn new(transport: Arc<dyn TelemetryTransport>) -> (Self, ReceiverStream<ChannelEvent>) {
        let (events, rx) = mpsc::channel(64);
        let manager = Self {
            transport,
            events,
            reader: None,
        };
        (manager, ReceiverStream::new(rx))
    }

    /// Open the channel and start forwarding events. Calling this while a
    /// channel is already live is a no-op; after a disconnect it may be
    /// called again to establish a fresh channel (no automatic retry).
    pub fn connect(&mut self) {
        if self.reader.as_ref().is_some_and(|task| !task.is_finished()) {
            tracing::debug!("connect ignored, channel already live");
            return;
        }

        let transport = self.transport.clone();
        let events = self.events.clone();
        self.reader = Some(tokio::spawn(async move {
            match transport.open().await {
                Ok(mut messages) => {
                    if events.send(ChannelEvent::Connected).await.is_err() {
                        return;
                    }
                    while let Some(message) = messages.next().await {
                        if events.send(ChannelEvent::Message(message)).await.is_err() {
                            return;
                        }
                    }
                    let _ = events.send(ChannelEvent::Disconnected).await;
                }
                Err(error) => {
                    tracing::warn!("telemetry channel failed to open: {error:#}");
                    let _ = events
                        .send(ChannelEvent::ConnectError(error.to_string()))
                        .await;
                }
            }
        }));
    }

    /// Tear the channel down. Safe to call when none is active.
    pub fn disconnect(&mut self) {
        if let Some(task) = self.reader.take() {
            task.abort();
        }
    }
}

impl Drop for ConnectionManager {
    fn drop(&mut self) {
        self.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::DataUpdate;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ScriptedTransport {
        opens: AtomicUsize,
        fail: bool,
    }

    impl ScriptedTransport {
        fn new(fail: bool) -> Self {
            Self {
                opens: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl TelemetryTransport for ScriptedTransport {
        async fn open(&self) -> anyhow::Result<BoxStream<'static, TelemetryMessage>> {
            self.opens.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("refused");
            }
            let messages = vec![TelemetryMessage::Data(DataUpdate::default())];
            Ok(futures::stream::iter(messages).boxed())
        }
    }

    #[tokio::test]
    async fn test_connect_emits_lifecycle_around_messages() {
        let transport = Arc::new(ScriptedTransport::new(false));
        let (mut manager, mut events) = ConnectionManager::new(transport);
        manager.connect();

        assert!(matches!(
            events.next().await,
            Some(ChannelEvent::Connected)
        ));
        assert!(matches!(
            events.next().await,
            Some(ChannelEvent::Message(TelemetryMessage::Data(_)))
        ));
        assert!(matches!(
            events.next().await,
            Some(ChannelEvent::Disconnected)
        ));
    }

    #[tokio::test]
    async fn test_failed_open_emits_connect_error() {
        let transport = Arc::new(ScriptedTransport::new(true));
        let (mut manager, mut events) = ConnectionManager::new(transport);
        manager.connect();

        match events.next().await {
            Some(ChannelEvent::ConnectError(reason)) => assert_eq!(reason, "refused"),
            other => panic!("expected connect error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connect_is_idempotent_while_live() {
        struct Pending;

        #[async_trait]
        impl TelemetryTransport for Pending {
            async fn open(&self) -> anyhow::Result<BoxStream<'static, TelemetryMessage>> {
                Ok(futures::stream::pending().boxed())
            }
        }

        let (mut manager, mut events) = ConnectionManager::new(Arc::new(Pending));
        manager.connect();
        assert!(matches!(
            events.next().await,
            Some(ChannelEvent::Connected)
        ));

        // Second call must not open a second channel.
        manager.connect();
        tokio::task::yield_now().await;
        assert!(
            tokio::time::timeout(std::time::Duration::from_millis(10), events.next())
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_reconnect_after_disconnect_opens_again() {
        let transport = Arc::new(ScriptedTransport::new(false));
        let (mut manager, mut events) = ConnectionManager::new(transport.clone());

        manager.connect();
        // Drain the first session: connected, one message, disconnected.
        for _ in 0..3 {
            events.next().await.unwrap();
        }
        // Let the first reader task retire before reconnecting.
        tokio::task::yield_now().await;

        manager.connect();
        assert!(matches!(
            events.next().await,
            Some(ChannelEvent::Connected)
        ));
        assert_eq!(transport.opens.load(Ordering::SeqCst), 2);
    }
}
