// Mon Oct 19 2026 - Alex

use crate::structure::LayoutNode;

/// Display name of the synthetic vtable pointer.
pub const VTABLE_POINTER_NAME: &str = "__vtbl_ptr_type * _vptr";

/// One entry in a layout node. Offsets are relative to the owning node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    VTablePointer {
        byte_size: u64,
    },
    BaseClass {
        name: String,
        type_name: String,
        local_offset: u64,
        byte_size: u64,
        is_virtual: bool,
        nested: Box<LayoutNode>,
    },
    Field {
        name: String,
        type_name: String,
        local_offset: u64,
        byte_size: u64,
    },
    NestedAggregate {
        name: String,
        type_name: String,
        local_offset: u64,
        byte_size: u64,
        nested: Box<LayoutNode>,
    },
    Bitfield {
        name: String,
        type_name: String,
        local_offset: u64,
        bit_offset: u32,
        bit_width: u32,
        storage_byte_size: u64,
    },
    PaddingBytes {
        local_offset: u64,
        byte_size: u64,
    },
    /// Unused trailing bits of a bitfield storage unit.
    PaddingBits {
        local_offset: u64,
        bit_count: u32,
        storage_byte_size: u64,
    },
}

impl Member {
    pub fn local_offset(&self) -> u64 {
        match self {
            Self::VTablePointer { .. } => 0,
            Self::BaseClass { local_offset, .. }
            | Self::Field { local_offset, .. }
            | Self::NestedAggregate { local_offset, .. }
            | Self::Bitfield { local_offset, .. }
            | Self::PaddingBytes { local_offset, .. }
            | Self::PaddingBits { local_offset, .. } => *local_offset,
        }
    }

    /// Bytes this member accounts for in its node. Unused bits live inside
    /// the preceding bitfield's storage, so they contribute nothing here.
    pub fn byte_size(&self) -> u64 {
        match self {
            Self::VTablePointer { byte_size }
            | Self::BaseClass { byte_size, .. }
            | Self::Field { byte_size, .. }
            | Self::NestedAggregate { byte_size, .. }
            | Self::PaddingBytes { byte_size, .. } => *byte_size,
            Self::Bitfield { storage_byte_size, .. } => *storage_byte_size,
            Self::PaddingBits { .. } => 0,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::VTablePointer { .. } => VTABLE_POINTER_NAME,
            Self::BaseClass { name, .. }
            | Self::Field { name, .. }
            | Self::NestedAggregate { name, .. }
            | Self::Bitfield { name, .. } => name,
            Self::PaddingBytes { .. } | Self::PaddingBits { .. } => "",
        }
    }

    pub fn nested(&self) -> Option<&LayoutNode> {
        match self {
            Self::BaseClass { nested, .. } | Self::NestedAggregate { nested, .. } => Some(nested),
            _ => None,
        }
    }

    pub fn nested_mut(&mut self) -> Option<&mut LayoutNode> {
        match self {
            Self::BaseClass { nested, .. } | Self::NestedAggregate { nested, .. } => Some(nested),
            _ => None,
        }
    }

    pub fn is_bitfield(&self) -> bool {
        matches!(self, Self::Bitfield { .. })
    }

    pub fn is_padding(&self) -> bool {
        matches!(self, Self::PaddingBytes { .. } | Self::PaddingBits { .. })
    }

    /// Unused bits left in the storage unit after this bitfield.
    pub fn trailing_unused_bits(&self) -> Option<u32> {
        match self {
            Self::Bitfield { bit_offset, bit_width, .. } => {
                let end = (u64::from(*bit_offset) + u64::from(*bit_width)) % 8;
                Some(((8 - end) % 8) as u32)
            }
            _ => None,
        }
    }
}
