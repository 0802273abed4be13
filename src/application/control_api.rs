// Control surface seam - Start/stop requests to the remote monitor
use async_trait::async_trait;
use serde::Deserialize;

/// Acknowledgement payload of both control endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ControlAck {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[async_trait]
pub trait ControlApi: Send + Sync {
    /// Ask the remote monitor to start emitting telemetry every
    /// `frequency` steps.
    async fn start_monitoring(&self, frequency: u32) -> anyhow::Result<ControlAck>;

    /// Ask the remote monitor to stop emitting telemetry.
    async fn stop_monitoring(&self) -> anyhow::Result<ControlAck>;
}
