// Domain layer - Core data models, no I/O
pub mod chart;
pub mod physics;
pub mod session;
pub mod telemetry;
pub mod training;
