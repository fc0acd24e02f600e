// Mon Oct 19 2026 - Alex

pub mod formatter;
pub mod json;

pub use formatter::{LayoutFormatter, NumberFormat};
pub use json::JsonRenderer;

use crate::structure::{LayoutNode, PaddingSummary};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;

/// Turns a resolved layout into printable text.
pub trait Renderer: Send + Sync {
    fn render(&self, root: &LayoutNode, summary: &PaddingSummary) -> OutputResult<String>;
}
