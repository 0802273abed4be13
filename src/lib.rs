// Client-side core of the wafer-fab RL monitoring dashboard
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
