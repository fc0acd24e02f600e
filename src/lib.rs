// Mon Oct 19 2026 - Alex

pub mod config;
pub mod output;
pub mod structure;
pub mod symbol;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use output::{JsonRenderer, LayoutFormatter, Renderer};
pub use structure::{dump_layout, LayoutBuilder, LayoutError, LayoutNode, PaddingResolver, PaddingSummary};
pub use symbol::TypeDatabase;
