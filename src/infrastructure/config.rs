use serde::Deserialize;

use crate::application::monitoring::DEFAULT_FREQUENCY;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    #[serde(default)]
    pub monitoring: MonitoringSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    /// Base URL for the control endpoints, e.g. "http://127.0.0.1:5000".
    pub http_base: String,
    /// WebSocket URL of the telemetry channel.
    pub socket_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonitoringSettings {
    #[serde(default = "default_frequency")]
    pub frequency: u32,
}

impl Default for MonitoringSettings {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
        }
    }
}

fn default_frequency() -> u32 {
    DEFAULT_FREQUENCY
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
