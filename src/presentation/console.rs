// Console sink - Tracing-backed rendering for headless runs
use crate::domain::chart::ChartModel;
use crate::domain::physics::ChamberStatus;
use crate::domain::session::{ConnectionState, MonitoringState, NoticeLevel};
use crate::presentation::ui_sink::UiSink;

/// Renders every UI target as a structured log line. Useful on its own for
/// watching a training run from a terminal, and it keeps `main` honest
/// about routing everything through the sink surface.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl UiSink for ConsoleSink {
    fn set_connection(&self, state: ConnectionState) {
        tracing::info!(target: "ui", indicator = %state, "connection");
    }

    fn set_system_status(&self, state: MonitoringState) {
        tracing::info!(target: "ui", status = %state, "system");
    }

    fn set_elapsed(&self, text: &str) {
        tracing::info!(target: "ui", elapsed = text, "run time");
    }

    fn set_chamber_status(&self, id: &str, status: ChamberStatus) {
        tracing::info!(target: "ui", chamber = id, class = %format!("chamber-{status}"), "chamber");
    }

    fn set_active_wafers(&self, count: u32) {
        tracing::info!(target: "ui", count, "active wafers");
    }

    fn set_processing_chambers(&self, count: u32) {
        tracing::info!(target: "ui", count, "processing chambers");
    }

    fn set_throughput(&self, wph: f64) {
        tracing::info!(target: "ui", value = %format!("{wph} WPH"), "throughput");
    }

    fn render_snapshot(&self, chart: &ChartModel) {
        for dataset in &chart.datasets {
            tracing::debug!(target: "ui", chart = %chart.id, dataset = %dataset.id, data = ?dataset.data, "snapshot view");
        }
    }

    fn render_rolling(&self, chart: &ChartModel) {
        let points = chart.datasets.first().map(|d| d.data.len()).unwrap_or(0);
        tracing::debug!(target: "ui", chart = %chart.id, points, "rolling view");
    }

    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Success => tracing::info!(target: "ui", "{message}"),
            NoticeLevel::Error => tracing::error!(target: "ui", "{message}"),
        }
    }
}
