// WebSocket telemetry transport and wire frame decoding
use anyhow::Context;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::StreamExt;
use serde::Deserialize;
use thiserror::Error;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::application::connection::TelemetryTransport;
use crate::domain::telemetry::{DataUpdate, TelemetryMessage};

#[derive(Debug, Error)]
pub enum WireError {
    #[error("malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unsupported event \"{0}\"")]
    UnknownEvent(String),
}

/// Text frames carry a JSON envelope `{"event": ..., "data": ...}`.
#[derive(Debug, Deserialize)]
struct Frame {
    event: String,
    #[serde(default)]
    data: serde_json::Value,
}

pub fn decode_frame(text: &str) -> Result<TelemetryMessage, WireError> {
    let frame: Frame = serde_json::from_str(text)?;
    match frame.event.as_str() {
        "data_update" => {
            let update = if frame.data.is_null() {
                DataUpdate::default()
            } else {
                serde_json::from_value(frame.data)?
            };
            Ok(TelemetryMessage::Data(update))
        }
        "monitoring_started" => Ok(TelemetryMessage::MonitoringStarted(frame.data)),
        other => Err(WireError::UnknownEvent(other.to_string())),
    }
}

pub struct WsTransport {
    url: String,
}

impl WsTransport {
    pub fn new(url: String) -> Self {
        Self { url }
    }
}

#[async_trait]
impl TelemetryTransport for WsTransport {
    async fn open(&self) -> anyhow::Result<BoxStream<'static, TelemetryMessage>> {
        let (socket, _) = connect_async(self.url.as_str())
            .await
            .with_context(|| format!("failed to open telemetry channel at {}", self.url))?;
        tracing::info!(url = %self.url, "telemetry channel open");

        let (_write, read) = socket.split();
        Ok(read
            .filter_map(|frame| async move {
                match frame {
                    Ok(Message::Text(text)) => match decode_frame(&text) {
                        Ok(message) => Some(message),
                        Err(WireError::UnknownEvent(event)) => {
                            tracing::debug!(event, "skipping unsupported telemetry event");
                            None
                        }
                        Err(error) => {
                            tracing::warn!("skipping malformed telemetry frame: {error}");
                            None
                        }
                    },
                    // Ping/pong are answered by the library; binary and
                    // close frames carry nothing we render.
                    Ok(_) => None,
                    Err(error) => {
                        tracing::warn!("telemetry channel read error: {error}");
                        None
                    }
                }
            })
            .boxed())
    }
}
