// Main entry point - Dependency injection and the session run loop
use std::sync::Arc;

use fab_telemetry::application::connection::ConnectionManager;
use fab_telemetry::application::controller::DashboardController;
use fab_telemetry::domain::session::MonitoringState;
use fab_telemetry::infrastructure::config::load_dashboard_config;
use fab_telemetry::infrastructure::http_control::HttpControlApi;
use fab_telemetry::infrastructure::ws_transport::WsTransport;
use fab_telemetry::presentation::console::ConsoleSink;
use fab_telemetry::presentation::ui_sink::UiSink;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = load_dashboard_config()?;

    // Infrastructure adapters
    let control = Arc::new(HttpControlApi::new(config.server.http_base.clone()));
    let transport = Arc::new(WsTransport::new(config.server.socket_url.clone()));
    let sink: Arc<dyn UiSink> = Arc::new(ConsoleSink::new());

    // Session controller and the single telemetry channel
    let mut controller = DashboardController::new(control, sink);
    let (mut connection, events) = ConnectionManager::new(transport);
    connection.connect();

    if let Err(error) = controller.start_monitoring(config.monitoring.frequency).await {
        tracing::warn!("monitoring not started: {error}");
    }

    println!("Watching fab telemetry from {}", config.server.socket_url);

    tokio::select! {
        _ = controller.run(events) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
        }
    }

    if controller.monitoring_state() == MonitoringState::Running {
        let _ = controller.stop_monitoring().await;
    }
    connection.disconnect();

    Ok(())
}
