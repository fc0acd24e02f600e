// Mon Oct 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbolError {
    #[error("Type not found: {0}")]
    TypeNotFound(String),
    #[error("Ambiguous type name {name}: {}", .candidates.join(", "))]
    AmbiguousType { name: String, candidates: Vec<String> },
    #[error("Duplicate type: {0}")]
    DuplicateType(String),
    #[error("Typedef cycle through {0}")]
    TypedefCycle(String),
    #[error("Typedef {0} has no target")]
    MissingTarget(String),
    #[error("Invalid pointer width: {0}")]
    InvalidPointerWidth(u64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}
