// Mon Oct 19 2026 - Alex

use crate::structure::TypeKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Unresolved type: {0}")]
    UnresolvedType(String),
    #[error("Inconsistent bitfield {type_name}::{field}: width {bit_width} in {storage_bytes}-byte storage")]
    InconsistentBitfield {
        type_name: String,
        field: String,
        bit_width: u32,
        storage_bytes: u64,
    },
    #[error("Layout inconsistency in {type_name}: member {member} at 0x{found:x} overlaps expected offset 0x{expected:x}")]
    LayoutInconsistency {
        type_name: String,
        member: String,
        expected: u64,
        found: u64,
    },
    #[error("Not a struct or class: {type_name} is a {kind}")]
    NotAggregate { type_name: String, kind: TypeKind },
    #[error("Recursive type: {0} contains itself")]
    RecursiveType(String),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
