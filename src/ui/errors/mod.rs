// Mon Oct 19 2026 - Alex

pub mod display;

pub use display::ErrorDisplay;
