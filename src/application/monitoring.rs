// Monitoring service - Start/stop control surface and the elapsed counter
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant};

use crate::application::control_api::ControlApi;
use crate::domain::session::{MonitoringState, NoticeLevel};
use crate::presentation::ui_sink::UiSink;

/// Default telemetry emission frequency requested from the monitor.
pub const DEFAULT_FREQUENCY: u32 = 10;

#[derive(Debug, Error)]
pub enum MonitoringError {
    #[error("monitoring is already running")]
    AlreadyRunning,
    #[error("monitoring is not running")]
    NotRunning,
    #[error("{0}")]
    Rejected(String),
    #[error("control request failed: {0}")]
    Request(#[from] anyhow::Error),
}

/// Drives the remote monitor and the local elapsed-time display.
///
/// Preconditions are checked before any network call, and a failed request
/// leaves both the monitoring state and the counter untouched, so the UI
/// always reflects the last acknowledged state.
pub struct MonitoringService {
    api: Arc<dyn ControlApi>,
    sink: Arc<dyn UiSink>,
    state: MonitoringState,
    counter: Option<JoinHandle<()>>,
}

impl MonitoringService {
    pub fn new(api: Arc<dyn ControlApi>, sink: Arc<dyn UiSink>) -> Self {
        Self {
            api,
            sink,
            state: MonitoringState::Idle,
            counter: None,
        }
    }

    pub fn state(&self) -> MonitoringState {
        self.state
    }

    pub async fn start(&mut self, frequency: u32) -> Result<(), MonitoringError> {
        if self.state == MonitoringState::Running {
            self.sink
                .notify(NoticeLevel::Error, "Monitoring is already running");
            return Err(MonitoringError::AlreadyRunning);
        }

        let ack = match self.api.start_monitoring(frequency).await {
            Ok(ack) => ack,
            Err(error) => {
                self.sink.notify(
                    NoticeLevel::Error,
                    &format!("Failed to start monitoring: {error}"),
                );
                return Err(MonitoringError::Request(error));
            }
        };

        if !ack.success {
            let reason = ack.message.unwrap_or_else(|| "unknown error".to_string());
            self.sink.notify(
                NoticeLevel::Error,
                &format!("Failed to start monitoring: {reason}"),
            );
            return Err(MonitoringError::Rejected(reason));
        }

        self.state = MonitoringState::Running;
        self.sink.set_system_status(self.state);
        self.start_counter();
        self.sink.notify(NoticeLevel::Success, "Monitoring started");
        tracing::info!(frequency, "monitoring started");
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), MonitoringError> {
        if self.state == MonitoringState::Idle {
            self.sink
                .notify(NoticeLevel::Error, "Monitoring is not running");
            return Err(MonitoringError::NotRunning);
        }

        let ack = match self.api.stop_monitoring().await {
            Ok(ack) => ack,
            Err(error) => {
                self.sink.notify(
                    NoticeLevel::Error,
                    &format!("Failed to stop monitoring: {error}"),
                );
                return Err(MonitoringError::Request(error));
            }
        };

        if !ack.success {
            let reason = ack.message.unwrap_or_else(|| "unknown error".to_string());
            self.sink.notify(
                NoticeLevel::Error,
                &format!("Failed to stop monitoring: {reason}"),
            );
            return Err(MonitoringError::Rejected(reason));
        }

        self.state = MonitoringState::Idle;
        self.sink.set_system_status(self.state);
        // The counter stops ticking but the display keeps its last value.
        self.stop_counter();
        self.sink.notify(NoticeLevel::Success, "Monitoring stopped");
        tracing::info!("monitoring stopped");
        Ok(())
    }

    fn start_counter(&mut self) {
        // At most one counter task per session.
        self.stop_counter();

        // Written once per session; the counter task only ever reads it.
        let start = Instant::now();
        self.sink.set_elapsed("00:00:00");

        let sink = self.sink.clone();
        self.counter = Some(tokio::spawn(async move {
            let mut ticker = interval(Duration::from_secs(1));
            // The first tick of an interval completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                sink.set_elapsed(&format_elapsed(start.elapsed()));
            }
        }));
    }

    /// Idempotent: safe to call when no counter is active.
    fn stop_counter(&mut self) {
        if let Some(task) = self.counter.take() {
            task.abort();
        }
    }
}

impl Drop for MonitoringService {
    fn drop(&mut self) {
        self.stop_counter();
    }
}

/// Zero-padded `HH:MM:SS` display of an elapsed duration.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}
