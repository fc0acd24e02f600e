// Mon Oct 19 2026 - Alex

use crate::structure::{
    BaseFact, FieldFact, LayoutError, LayoutNode, LayoutResult, Member, TypeFact, TypeProvider,
};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Where the node being built sits relative to the object being dumped.
#[derive(Debug, Clone, Copy, Default)]
struct BuildContext {
    /// Built as the type of an aggregate field.
    container: bool,
    /// Built as a base subobject of some more-derived type. Virtual bases are
    /// only emitted by the most-derived object, never in this role.
    derived: bool,
}

impl BuildContext {
    const ROOT: Self = Self { container: false, derived: false };
    const BASE: Self = Self { container: false, derived: true };
    const FIELD: Self = Self { container: true, derived: false };
}

/// Builds an unpadded layout tree from provider facts.
///
/// A builder serves a single root type: its fact cache lives exactly as long
/// as one dump.
pub struct LayoutBuilder<'a, P: TypeProvider + ?Sized> {
    provider: &'a P,
    facts: HashMap<String, Arc<TypeFact>>,
    in_progress: Vec<String>,
}

impl<'a, P: TypeProvider + ?Sized> LayoutBuilder<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self {
            provider,
            facts: HashMap::new(),
            in_progress: Vec::new(),
        }
    }

    pub fn build(mut self, type_name: &str) -> LayoutResult<LayoutNode> {
        let fact = self.resolve(type_name)?;
        // Unions overlap on purpose and scalars have no members to lay out.
        if !fact.kind.is_aggregate() {
            return Err(LayoutError::NotAggregate {
                type_name: fact.name.clone(),
                kind: fact.kind,
            });
        }
        self.build_node(&fact, BuildContext::ROOT)
    }

    fn resolve(&mut self, type_name: &str) -> LayoutResult<Arc<TypeFact>> {
        if let Some(fact) = self.facts.get(type_name) {
            return Ok(Arc::clone(fact));
        }
        let fact = self.provider.resolve(type_name)?;
        self.facts.insert(type_name.to_string(), Arc::clone(&fact));
        Ok(fact)
    }

    fn build_node(&mut self, fact: &TypeFact, ctx: BuildContext) -> LayoutResult<LayoutNode> {
        if self.in_progress.iter().any(|name| *name == fact.name) {
            return Err(LayoutError::RecursiveType(fact.name.clone()));
        }
        log::trace!(
            "building {} ({} bytes, container: {}, derived: {})",
            fact.name,
            fact.byte_size,
            ctx.container,
            ctx.derived
        );

        self.in_progress.push(fact.name.clone());
        let node = self.build_members(fact, ctx);
        self.in_progress.pop();
        node
    }

    fn build_members(&mut self, fact: &TypeFact, ctx: BuildContext) -> LayoutResult<LayoutNode> {
        let mut node = LayoutNode::new(&fact.name, fact.byte_size);
        let mut virtual_bases = self.virtual_bases(fact)?;

        // The vptr belongs to the base-most polymorphic class, matching
        // clang -fdump-record-layouts.
        if fact.polymorphic && !self.has_polymorphic_non_virtual_base(fact)? {
            node.push(Member::VTablePointer {
                byte_size: self.provider.pointer_width(),
            });
        }

        for base in fact.bases.iter().filter(|base| !virtual_bases.contains_key(base.name())) {
            let nested = self.build_base(base)?;
            node.push(Member::BaseClass {
                name: base.name().to_string(),
                type_name: base.type_name.clone(),
                local_offset: base.offset,
                byte_size: base.byte_size,
                is_virtual: false,
                nested: Box::new(nested),
            });
        }

        for field in &fact.fields {
            node.push(self.build_field(fact, field)?);
        }

        if !ctx.derived {
            for base in &fact.virtual_bases {
                let Some(nested) = virtual_bases.shift_remove(base.name()) else {
                    continue;
                };
                node.push(Member::BaseClass {
                    name: base.name().to_string(),
                    type_name: base.type_name.clone(),
                    local_offset: base.offset,
                    byte_size: base.byte_size,
                    is_virtual: true,
                    nested: Box::new(nested),
                });
            }
        }

        Ok(node)
    }

    fn virtual_bases(&mut self, fact: &TypeFact) -> LayoutResult<IndexMap<String, LayoutNode>> {
        let mut bases = IndexMap::with_capacity(fact.virtual_bases.len());
        for base in &fact.virtual_bases {
            let nested = self.build_base(base)?;
            bases.insert(base.name().to_string(), nested);
        }
        Ok(bases)
    }

    fn build_base(&mut self, base: &BaseFact) -> LayoutResult<LayoutNode> {
        let base_fact = self.resolve(&base.type_name)?;
        self.build_node(&base_fact, BuildContext::BASE)
    }

    fn has_polymorphic_non_virtual_base(&mut self, fact: &TypeFact) -> LayoutResult<bool> {
        for base in fact.bases.iter().filter(|base| !fact.is_virtual_base(base.name())) {
            if self.resolve(&base.type_name)?.polymorphic {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn build_field(&mut self, owner: &TypeFact, field: &FieldFact) -> LayoutResult<Member> {
        let field_fact = self.resolve(&field.type_name)?;

        if let Some(bits) = field.bitfield {
            // The reported byte size describes the storage type, not the bits.
            let capacity = field.byte_size.saturating_mul(8);
            let end = u64::from(bits.bit_offset) + u64::from(bits.bit_width);
            if bits.bit_width == 0 || end > capacity {
                return Err(LayoutError::InconsistentBitfield {
                    type_name: owner.name.clone(),
                    field: field.name.clone(),
                    bit_width: bits.bit_width,
                    storage_bytes: field.byte_size,
                });
            }
            return Ok(Member::Bitfield {
                name: field.name.clone(),
                type_name: field.type_name.clone(),
                local_offset: field.offset,
                bit_offset: bits.bit_offset,
                bit_width: bits.bit_width,
                storage_byte_size: u64::from(bits.bit_width.div_ceil(8)),
            });
        }

        if field_fact.kind.is_aggregate() {
            let nested = self.build_node(&field_fact, BuildContext::FIELD)?;
            return Ok(Member::NestedAggregate {
                name: field.name.clone(),
                type_name: field.type_name.clone(),
                local_offset: field.offset,
                byte_size: field.byte_size,
                nested: Box::new(nested),
            });
        }

        Ok(Member::Field {
            name: field.name.clone(),
            type_name: field.type_name.clone(),
            local_offset: field.offset,
            byte_size: field.byte_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::TypeKind;
    use crate::symbol::TypeDatabase;

    fn database(types: Vec<TypeFact>) -> TypeDatabase {
        let mut db = TypeDatabase::new(8);
        for fact in types {
            db.insert(fact).unwrap();
        }
        db
    }

    fn build(db: &TypeDatabase, name: &str) -> LayoutResult<LayoutNode> {
        LayoutBuilder::new(db).build(name)
    }

    fn base_names(node: &LayoutNode) -> Vec<(&str, bool)> {
        node.members()
            .iter()
            .filter_map(|m| match m {
                Member::BaseClass { name, is_virtual, .. } => Some((name.as_str(), *is_virtual)),
                _ => None,
            })
            .collect()
    }

    fn has_vptr(node: &LayoutNode) -> bool {
        matches!(node.members().first(), Some(Member::VTablePointer { .. }))
    }

    /// A { int a; }, B1/B2 : virtual A, D : B1, B2.
    fn diamond() -> TypeDatabase {
        database(vec![
            TypeFact::structure("A", 4).with_field("a", "int", 0, 4),
            TypeFact::structure("B1", 16)
                .with_polymorphic()
                .with_base("A", 12, 4)
                .with_virtual_base("A", 12, 4)
                .with_field("b1", "int", 8, 4),
            TypeFact::structure("B2", 16)
                .with_polymorphic()
                .with_base("A", 12, 4)
                .with_virtual_base("A", 12, 4)
                .with_field("b2", "int", 8, 4),
            TypeFact::structure("D", 40)
                .with_polymorphic()
                .with_base("B1", 0, 16)
                .with_base("B2", 16, 16)
                .with_virtual_base("A", 32, 4)
                .with_field("d", "int", 28, 4),
        ])
    }

    #[test]
    fn test_plain_struct_keeps_declared_fields() {
        let db = database(vec![TypeFact::structure("Plain", 16)
            .with_field("a", "char", 0, 1)
            .with_field("b", "int", 4, 4)
            .with_field("c", "double", 8, 8)]);

        let node = build(&db, "Plain").unwrap();
        assert_eq!(node.type_name(), "Plain");
        assert_eq!(node.total_byte_size(), 16);
        let fields: Vec<_> = node
            .members()
            .iter()
            .map(|m| (m.name(), m.local_offset(), m.byte_size()))
            .collect();
        assert_eq!(fields, vec![("a", 0, 1), ("b", 4, 4), ("c", 8, 8)]);
        assert_eq!(node.total_padding_bytes(), 0);
    }

    #[test]
    fn test_vptr_goes_to_base_most_polymorphic_class() {
        let db = database(vec![
            TypeFact::class("Base", 16).with_polymorphic().with_field("x", "int", 8, 4),
            TypeFact::class("Derived", 16)
                .with_polymorphic()
                .with_base("Base", 0, 16)
                .with_field("y", "int", 12, 4),
        ]);

        let derived = build(&db, "Derived").unwrap();
        assert!(!has_vptr(&derived));
        let base = derived.members()[0].nested().unwrap();
        assert!(has_vptr(base));
        assert_eq!(base.members()[0].byte_size(), 8);
        assert_eq!(base.members()[0].local_offset(), 0);
    }

    #[test]
    fn test_virtual_polymorphic_base_does_not_suppress_vptr() {
        let db = database(vec![
            TypeFact::class("V", 16).with_polymorphic().with_field("v", "int", 8, 4),
            TypeFact::class("C", 32)
                .with_polymorphic()
                .with_base("V", 16, 16)
                .with_virtual_base("V", 16, 16)
                .with_field("c", "int", 8, 4),
        ]);

        let node = build(&db, "C").unwrap();
        assert!(has_vptr(&node));
        assert_eq!(base_names(&node), vec![("V", true)]);
    }

    #[test]
    fn test_diamond_virtual_base_emitted_once_at_most_derived() {
        let db = diamond();
        let node = build(&db, "D").unwrap();

        assert_eq!(base_names(&node), vec![("B1", false), ("B2", false), ("A", true)]);
        for index in 0..2 {
            let intermediate = node.members()[index].nested().unwrap();
            assert!(base_names(intermediate).is_empty());
        }
        // Virtual bases trail the declared fields.
        assert_eq!(node.members()[2].name(), "d");
        assert_eq!(node.members()[3].local_offset(), 32);
    }

    #[test]
    fn test_intermediate_base_emits_virtual_base_when_dumped_directly() {
        let db = diamond();
        let node = build(&db, "B1").unwrap();
        assert!(has_vptr(&node));
        assert_eq!(base_names(&node), vec![("A", true)]);
    }

    #[test]
    fn test_nested_aggregate_is_expanded() {
        let db = database(vec![
            TypeFact::structure("Point", 8)
                .with_field("x", "int", 0, 4)
                .with_field("y", "int", 4, 4),
            TypeFact::structure("Line", 16)
                .with_field("from", "Point", 0, 8)
                .with_field("to", "Point", 8, 8),
        ]);

        let node = build(&db, "Line").unwrap();
        match &node.members()[1] {
            Member::NestedAggregate { name, local_offset, nested, .. } => {
                assert_eq!(name, "to");
                assert_eq!(*local_offset, 8);
                assert_eq!(nested.members().len(), 2);
            }
            other => panic!("expected nested aggregate, got {:?}", other),
        }
    }

    #[test]
    fn test_union_and_pointer_fields_stay_scalar() {
        let db = database(vec![
            TypeFact::new("Bits", TypeKind::Union, 4)
                .with_field("i", "int", 0, 4)
                .with_field("f", "float", 0, 4),
            TypeFact::structure("Holder", 16)
                .with_field("u", "Bits", 0, 4)
                .with_field("next", "Holder *", 8, 8),
        ]);

        let node = build(&db, "Holder").unwrap();
        assert!(node.members().iter().all(|m| matches!(m, Member::Field { .. })));
    }

    #[test]
    fn test_bitfield_storage_comes_from_bit_width() {
        let db = database(vec![TypeFact::structure("Flags", 4)
            .with_bitfield("a", "unsigned int", 0, 4, 0, 3)
            .with_bitfield("b", "unsigned int", 0, 4, 3, 12)]);

        let node = build(&db, "Flags").unwrap();
        let storage: Vec<_> = node.members().iter().map(Member::byte_size).collect();
        assert_eq!(storage, vec![1, 2]);
    }

    #[test]
    fn test_zero_width_bitfield_is_rejected() {
        let db = database(vec![TypeFact::structure("Bad", 4)
            .with_bitfield("a", "unsigned int", 0, 4, 0, 0)]);
        assert!(matches!(
            build(&db, "Bad"),
            Err(LayoutError::InconsistentBitfield { bit_width: 0, .. })
        ));
    }

    #[test]
    fn test_oversized_bitfield_is_rejected() {
        let db = database(vec![TypeFact::structure("Bad", 1)
            .with_bitfield("a", "unsigned char", 0, 1, 0, 9)]);
        assert!(matches!(
            build(&db, "Bad"),
            Err(LayoutError::InconsistentBitfield { storage_bytes: 1, .. })
        ));
    }

    #[test]
    fn test_bitfield_past_its_storage_is_rejected() {
        let db = database(vec![TypeFact::structure("Bad", 4)
            .with_bitfield("a", "unsigned int", 0, 4, 30, 3)
            .with_bitfield("b", "unsigned int", 0, 4, u32::MAX, 1)]);
        assert!(matches!(
            build(&db, "Bad"),
            Err(LayoutError::InconsistentBitfield { field, bit_width: 3, .. }) if field == "a"
        ));

        let db = database(vec![TypeFact::structure("Huge", 4)
            .with_bitfield("b", "unsigned int", 0, 4, u32::MAX, 1)]);
        assert!(matches!(
            build(&db, "Huge"),
            Err(LayoutError::InconsistentBitfield { storage_bytes: 4, .. })
        ));
    }

    #[test]
    fn test_scalar_root_is_rejected() {
        let db = database(vec![]);
        assert_eq!(
            build(&db, "int"),
            Err(LayoutError::NotAggregate {
                type_name: "int".to_string(),
                kind: TypeKind::Scalar,
            })
        );
    }

    #[test]
    fn test_union_root_is_rejected() {
        let db = database(vec![TypeFact::new("U", TypeKind::Union, 4)
            .with_field("i", "int", 0, 4)
            .with_field("f", "float", 0, 4)]);
        assert!(matches!(
            build(&db, "U"),
            Err(LayoutError::NotAggregate { kind: TypeKind::Union, .. })
        ));
    }

    #[test]
    fn test_unknown_field_type_is_unresolved() {
        let db = database(vec![TypeFact::structure("S", 8).with_field("m", "Missing", 0, 8)]);
        assert_eq!(
            build(&db, "S"),
            Err(LayoutError::UnresolvedType("Missing".to_string()))
        );
    }

    #[test]
    fn test_unknown_base_is_unresolved() {
        let db = database(vec![TypeFact::class("S", 8).with_base("Ghost", 0, 8)]);
        assert_eq!(build(&db, "S"), Err(LayoutError::UnresolvedType("Ghost".to_string())));
    }

    #[test]
    fn test_self_containing_type_is_rejected() {
        let db = database(vec![TypeFact::structure("Loop", 8).with_field("inner", "Loop", 0, 8)]);
        assert_eq!(build(&db, "Loop"), Err(LayoutError::RecursiveType("Loop".to_string())));
    }

    #[test]
    fn test_rebuild_is_reproducible() {
        let db = diamond();
        assert_eq!(build(&db, "D").unwrap(), build(&db, "D").unwrap());
    }
}
