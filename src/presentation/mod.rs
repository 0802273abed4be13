// Presentation layer - Rendering seam and the shipped sink
pub mod console;
pub mod ui_sink;
