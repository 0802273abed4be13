// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod http_control;
pub mod ws_transport;
