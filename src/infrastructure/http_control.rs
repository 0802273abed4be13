// HTTP client for the monitor control endpoints
use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::application::control_api::{ControlAck, ControlApi};

#[derive(Debug, Clone)]
pub struct HttpControlApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpControlApi {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn read_ack(response: reqwest::Response) -> Result<ControlAck> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("control endpoint returned status {}: {}", status, body);
        }

        response
            .json::<ControlAck>()
            .await
            .context("Failed to parse control acknowledgement")
    }
}

#[async_trait]
impl ControlApi for HttpControlApi {
    async fn start_monitoring(&self, frequency: u32) -> Result<ControlAck> {
        let response = self
            .client
            .post(self.endpoint("/api/start_monitoring"))
            .json(&serde_json::json!({ "frequency": frequency }))
            .send()
            .await
            .context("Failed to send start_monitoring request")?;

        Self::read_ack(response).await
    }

    async fn stop_monitoring(&self) -> Result<ControlAck> {
        let response = self
            .client
            .post(self.endpoint("/api/stop_monitoring"))
            .send()
            .await
            .context("Failed to send stop_monitoring request")?;

        Self::read_ack(response).await
    }
}
