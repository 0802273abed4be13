// Dashboard controller - Session-scoped event reducer and render dispatch
use futures::StreamExt;
use std::sync::Arc;
use tokio_stream::wrappers::ReceiverStream;

use crate::application::chart_projector::ChartProjector;
use crate::application::connection::ChannelEvent;
use crate::application::control_api::ControlApi;
use crate::application::monitoring::{MonitoringError, MonitoringService};
use crate::application::series_buffer::SeriesBuffer;
use crate::domain::physics::PhysicsState;
use crate::domain::session::{ConnectionState, MonitoringState, NoticeLevel};
use crate::domain::telemetry::{DataUpdate, TelemetryMessage};
use crate::presentation::ui_sink::UiSink;

/// Owns all session state: the series buffer, the merged equipment state,
/// both chart models and the monitoring service. One instance per session;
/// events are handled strictly in arrival order and each one is reduced and
/// rendered to completion before the next is looked at.
pub struct DashboardController {
    sink: Arc<dyn UiSink>,
    buffer: SeriesBuffer,
    projector: ChartProjector,
    physics: PhysicsState,
    connection: ConnectionState,
    monitoring: MonitoringService,
}

impl DashboardController {
    pub fn new(api: Arc<dyn ControlApi>, sink: Arc<dyn UiSink>) -> Self {
        Self {
            sink: sink.clone(),
            buffer: SeriesBuffer::new(),
            projector: ChartProjector::new(),
            physics: PhysicsState::default(),
            connection: ConnectionState::Connecting,
            monitoring: MonitoringService::new(api, sink),
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection
    }

    pub fn monitoring_state(&self) -> MonitoringState {
        self.monitoring.state()
    }

    pub fn physics(&self) -> &PhysicsState {
        &self.physics
    }

    pub async fn start_monitoring(&mut self, frequency: u32) -> Result<(), MonitoringError> {
        self.monitoring.start(frequency).await
    }

    pub async fn stop_monitoring(&mut self) -> Result<(), MonitoringError> {
        self.monitoring.stop().await
    }

    /// Drain the inbound event stream until the channel closes.
    pub async fn run(&mut self, mut events: ReceiverStream<ChannelEvent>) {
        while let Some(event) = events.next().await {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Connected => {
                self.transition(ConnectionState::Connected, None);
            }
            ChannelEvent::Disconnected => {
                self.transition(ConnectionState::Disconnected, None);
            }
            ChannelEvent::ConnectError(reason) => {
                self.transition(ConnectionState::Error, Some(reason));
            }
            ChannelEvent::Message(TelemetryMessage::Data(update)) => {
                self.apply_data(update);
            }
            ChannelEvent::Message(TelemetryMessage::MonitoringStarted(ack)) => {
                tracing::info!(?ack, "remote monitor reported start");
                self.sink
                    .notify(NoticeLevel::Success, "Remote monitoring active");
            }
        }
    }

    /// One notification per actual transition; a repeated event for the
    /// state we are already in renders nothing.
    fn transition(&mut self, next: ConnectionState, reason: Option<String>) {
        if self.connection == next {
            return;
        }
        self.connection = next;
        self.sink.set_connection(next);

        match next {
            ConnectionState::Connected => {
                self.sink
                    .notify(NoticeLevel::Success, "Telemetry channel connected");
            }
            ConnectionState::Disconnected => {
                self.sink
                    .notify(NoticeLevel::Error, "Telemetry channel disconnected");
            }
            ConnectionState::Error => {
                let message = match reason {
                    Some(reason) => format!("Telemetry channel failed: {reason}"),
                    None => "Telemetry channel failed".to_string(),
                };
                self.sink.notify(NoticeLevel::Error, &message);
            }
            ConnectionState::Connecting => {}
        }
    }

    fn apply_data(&mut self, update: DataUpdate) {
        if let Some(training) = update.training_data {
            self.buffer.ingest(training);
            self.projector.project(&self.buffer);
            self.sink.render_snapshot(self.projector.snapshot());
            self.sink.render_rolling(self.projector.rolling());
        }

        if let Some(physics) = update.physics_data {
            self.physics.apply(&physics);
            // Only the touched chambers re-render; the rest keep their
            // current display, matching the merge semantics.
            if let Some(chambers) = &physics.pm_chambers {
                for (id, chamber) in chambers {
                    self.sink.set_chamber_status(id, chamber.status);
                }
            }
            if let Some(count) = physics.active_wafers {
                self.sink.set_active_wafers(count);
            }
            if let Some(count) = physics.processing_chambers {
                self.sink.set_processing_chambers(count);
            }
            if let Some(wph) = physics.throughput {
                self.sink.set_throughput(wph);
            }
        }
    }
}
