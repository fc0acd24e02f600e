// Mon Oct 19 2026 - Alex

use crate::structure::LayoutResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Source of type facts, usually backed by debug info.
///
/// Implementations are read-only oracles: every `resolve` for the same name
/// returns the same facts, and concurrent dumps may share one provider.
pub trait TypeProvider: Sync {
    /// Resolves a type by name, failing with `LayoutError::UnresolvedType`.
    fn resolve(&self, type_name: &str) -> LayoutResult<Arc<TypeFact>>;

    /// Pointer width of the target in bytes.
    fn pointer_width(&self) -> u64;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Struct,
    Class,
    Union,
    Enum,
    Scalar,
    Pointer,
    Array,
    Typedef,
}

impl TypeKind {
    /// Struct and class types are expanded into nested layouts; everything
    /// else is shown as a single field.
    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::Struct | Self::Class)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Struct => "struct",
            Self::Class => "class",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::Scalar => "scalar",
            Self::Pointer => "pointer",
            Self::Array => "array",
            Self::Typedef => "typedef",
        };
        f.write_str(name)
    }
}

/// Read-only description of one type as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFact {
    pub name: String,
    pub kind: TypeKind,
    pub byte_size: u64,
    #[serde(default)]
    pub polymorphic: bool,
    #[serde(default)]
    pub bases: Vec<BaseFact>,
    #[serde(default)]
    pub virtual_bases: Vec<BaseFact>,
    #[serde(default)]
    pub fields: Vec<FieldFact>,
    /// Aliased type, for typedefs only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl TypeFact {
    pub fn new(name: &str, kind: TypeKind, byte_size: u64) -> Self {
        Self {
            name: name.to_string(),
            kind,
            byte_size,
            polymorphic: false,
            bases: Vec::new(),
            virtual_bases: Vec::new(),
            fields: Vec::new(),
            target: None,
        }
    }

    pub fn structure(name: &str, byte_size: u64) -> Self {
        Self::new(name, TypeKind::Struct, byte_size)
    }

    pub fn class(name: &str, byte_size: u64) -> Self {
        Self::new(name, TypeKind::Class, byte_size)
    }

    pub fn typedef(name: &str, target: &str) -> Self {
        let mut fact = Self::new(name, TypeKind::Typedef, 0);
        fact.target = Some(target.to_string());
        fact
    }

    pub fn with_polymorphic(mut self) -> Self {
        self.polymorphic = true;
        self
    }

    pub fn with_base(mut self, type_name: &str, offset: u64, byte_size: u64) -> Self {
        self.bases.push(BaseFact::new(type_name, offset, byte_size));
        self
    }

    /// Adds a virtual base. Like debug info does, callers list it among the
    /// direct bases too when it is inherited directly.
    pub fn with_virtual_base(mut self, type_name: &str, offset: u64, byte_size: u64) -> Self {
        self.virtual_bases.push(BaseFact::new(type_name, offset, byte_size));
        self
    }

    pub fn with_field(mut self, name: &str, type_name: &str, offset: u64, byte_size: u64) -> Self {
        self.fields.push(FieldFact::new(name, type_name, offset, byte_size));
        self
    }

    pub fn with_bitfield(
        mut self,
        name: &str,
        type_name: &str,
        offset: u64,
        byte_size: u64,
        bit_offset: u32,
        bit_width: u32,
    ) -> Self {
        self.fields.push(
            FieldFact::new(name, type_name, offset, byte_size)
                .with_bitfield(bit_offset, bit_width),
        );
        self
    }

    pub fn is_virtual_base(&self, name: &str) -> bool {
        self.virtual_bases.iter().any(|base| base.name() == name)
    }
}

/// A direct or virtual base class entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseFact {
    /// Defaults to the type name, which is what debug info reports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    pub offset: u64,
    pub byte_size: u64,
}

impl BaseFact {
    pub fn new(type_name: &str, offset: u64, byte_size: u64) -> Self {
        Self {
            name: None,
            type_name: type_name.to_string(),
            offset,
            byte_size,
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.type_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFact {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub offset: u64,
    /// Size of the declared type; for bitfields this is the storage type.
    pub byte_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitfield: Option<BitfieldFact>,
}

impl FieldFact {
    pub fn new(name: &str, type_name: &str, offset: u64, byte_size: u64) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            offset,
            byte_size,
            bitfield: None,
        }
    }

    pub fn with_bitfield(mut self, bit_offset: u32, bit_width: u32) -> Self {
        self.bitfield = Some(BitfieldFact { bit_offset, bit_width });
        self
    }
}

/// Bit position and width, relative to the field's storage unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitfieldFact {
    pub bit_offset: u32,
    pub bit_width: u32,
}
