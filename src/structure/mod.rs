// Mon Oct 19 2026 - Alex

pub mod builder;
pub mod error;
pub mod layout;
pub mod member;
pub mod padding;
pub mod serializer;
pub mod type_info;

pub use builder::LayoutBuilder;
pub use error::{LayoutError, LayoutResult};
pub use layout::{LayoutNode, PaddingSummary};
pub use member::{Member, VTABLE_POINTER_NAME};
pub use padding::PaddingResolver;
pub use serializer::{MemberKind, SerializableLayout, SerializableMember};
pub use type_info::{BaseFact, BitfieldFact, FieldFact, TypeFact, TypeKind, TypeProvider};

/// Builds the layout of `type_name` and infers its padding.
pub fn dump_layout<P: TypeProvider + ?Sized>(
    provider: &P,
    type_name: &str,
) -> LayoutResult<(LayoutNode, PaddingSummary)> {
    let mut root = LayoutBuilder::new(provider).build(type_name)?;
    let summary = PaddingResolver::resolve(&mut root)?;
    Ok((root, summary))
}
