// Telemetry wire-facing domain models
use serde::Deserialize;

use crate::domain::physics::PhysicsUpdate;
use crate::domain::training::TrainingSnapshot;

/// One inbound telemetry message, already decoded from the wire.
#[derive(Debug, Clone)]
pub enum TelemetryMessage {
    /// Combined envelope carrying training and/or physics payloads.
    Data(DataUpdate),
    /// Asynchronous acknowledgement that the remote monitor started.
    MonitoringStarted(serde_json::Value),
}

/// Payload of a `data_update` frame. Both parts are independently optional;
/// a message touching only one of them must leave the other's state alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataUpdate {
    #[serde(default)]
    pub training_data: Option<TrainingSnapshot>,
    #[serde(default)]
    pub physics_data: Option<PhysicsUpdate>,
}
