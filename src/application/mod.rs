// Application layer - Use cases and the seams to external collaborators
pub mod chart_projector;
pub mod connection;
pub mod control_api;
pub mod controller;
pub mod monitoring;
pub mod series_buffer;
