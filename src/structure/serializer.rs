// Mon Oct 19 2026 - Alex

use crate::structure::{LayoutNode, Member};
use serde::{Deserialize, Serialize};

/// JSON view of a resolved layout. Offsets are absolute within the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableLayout {
    pub type_name: String,
    pub offset: u64,
    pub byte_size: u64,
    pub padding_bytes: u64,
    pub padding_bits: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_percentage: Option<f64>,
    pub members: Vec<SerializableMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    VtablePointer,
    BaseClass,
    VirtualBaseClass,
    Field,
    NestedAggregate,
    Bitfield,
    PaddingBytes,
    PaddingBits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializableMember {
    pub kind: MemberKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    pub offset: u64,
    pub byte_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_offset: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Box<SerializableLayout>>,
}

impl SerializableLayout {
    fn from_node(node: &LayoutNode, start: u64) -> Self {
        Self {
            type_name: node.type_name().to_string(),
            offset: start,
            byte_size: node.total_byte_size(),
            padding_bytes: node.total_padding_bytes(),
            padding_bits: node.total_padding_bits(),
            padding_percentage: node.padding_percentage(),
            members: node
                .members()
                .iter()
                .map(|member| SerializableMember::from_member(member, start))
                .collect(),
        }
    }
}

impl From<&LayoutNode> for SerializableLayout {
    fn from(node: &LayoutNode) -> Self {
        Self::from_node(node, 0)
    }
}

impl SerializableMember {
    fn from_member(member: &Member, start: u64) -> Self {
        let offset = start + member.local_offset();
        let mut out = Self {
            kind: MemberKind::Field,
            name: member.name().to_string(),
            type_name: None,
            offset,
            byte_size: member.byte_size(),
            bit_offset: None,
            bits: None,
            layout: member
                .nested()
                .map(|nested| Box::new(SerializableLayout::from_node(nested, offset))),
        };

        match member {
            Member::VTablePointer { .. } => out.kind = MemberKind::VtablePointer,
            Member::BaseClass { type_name, is_virtual, .. } => {
                out.kind = if *is_virtual {
                    MemberKind::VirtualBaseClass
                } else {
                    MemberKind::BaseClass
                };
                out.type_name = Some(type_name.clone());
            }
            Member::Field { type_name, .. } => out.type_name = Some(type_name.clone()),
            Member::NestedAggregate { type_name, .. } => {
                out.kind = MemberKind::NestedAggregate;
                out.type_name = Some(type_name.clone());
            }
            Member::Bitfield { type_name, bit_offset, bit_width, .. } => {
                out.kind = MemberKind::Bitfield;
                out.type_name = Some(type_name.clone());
                out.bit_offset = Some(*bit_offset);
                out.bits = Some(*bit_width);
            }
            Member::PaddingBytes { .. } => out.kind = MemberKind::PaddingBytes,
            Member::PaddingBits { bit_count, storage_byte_size, .. } => {
                out.kind = MemberKind::PaddingBits;
                out.byte_size = *storage_byte_size;
                out.bits = Some(*bit_count);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::{dump_layout, TypeFact};
    use crate::symbol::TypeDatabase;

    #[test]
    fn test_nested_offsets_are_absolute() {
        let mut db = TypeDatabase::new(8);
        db.insert(TypeFact::structure("Inner", 8).with_field("v", "double", 0, 8)).unwrap();
        db.insert(
            TypeFact::structure("Outer", 16)
                .with_field("tag", "char", 0, 1)
                .with_field("inner", "Inner", 8, 8),
        )
        .unwrap();

        let (node, _) = dump_layout(&db, "Outer").unwrap();
        let json = SerializableLayout::from(&node);
        assert_eq!(json.padding_bytes, 7);
        assert_eq!(json.members[1].kind, MemberKind::PaddingBytes);

        let inner = json.members[2].layout.as_ref().unwrap();
        assert_eq!(inner.offset, 8);
        assert_eq!(inner.members[0].offset, 8);
        assert_eq!(inner.members[0].name, "v");
    }

    #[test]
    fn test_serializes_member_kinds() {
        let mut db = TypeDatabase::new(8);
        db.insert(
            TypeFact::class("Widget", 16)
                .with_polymorphic()
                .with_bitfield("on", "unsigned char", 8, 1, 0, 1),
        )
        .unwrap();

        let (node, _) = dump_layout(&db, "Widget").unwrap();
        let value = serde_json::to_value(SerializableLayout::from(&node)).unwrap();
        let kinds: Vec<_> = value["members"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["kind"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, vec!["vtable_pointer", "bitfield", "padding_bits", "padding_bytes"]);
        assert_eq!(value["members"][2]["bits"], 7);
        assert_eq!(value["padding_bits"], 7);
    }
}
