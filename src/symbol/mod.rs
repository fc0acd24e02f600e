// Mon Oct 19 2026 - Alex

pub mod builtin;
pub mod database;
pub mod error;

pub use database::TypeDatabase;
pub use error::SymbolError;

use std::path::Path;

pub fn load_type_database<P: AsRef<Path>>(path: P) -> Result<TypeDatabase, SymbolError> {
    TypeDatabase::load(path)
}
