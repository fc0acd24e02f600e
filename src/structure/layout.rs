// Mon Oct 19 2026 - Alex

use crate::structure::Member;

/// Resolved layout of one class or struct instance.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    type_name: String,
    total_byte_size: u64,
    total_padding_bytes: u64,
    total_padding_bits: u64,
    members: Vec<Member>,
}

impl LayoutNode {
    pub fn new(type_name: &str, total_byte_size: u64) -> Self {
        Self {
            type_name: type_name.to_string(),
            total_byte_size,
            total_padding_bytes: 0,
            total_padding_bits: 0,
            members: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn total_byte_size(&self) -> u64 {
        self.total_byte_size
    }

    /// Padding bytes inferred inside this node's subtree.
    pub fn total_padding_bytes(&self) -> u64 {
        self.total_padding_bytes
    }

    /// Unused bitfield bits inside this node's subtree. Not part of
    /// `total_padding_bytes`.
    pub fn total_padding_bits(&self) -> u64 {
        self.total_padding_bits
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn push(&mut self, member: Member) {
        self.members.push(member);
    }

    pub(crate) fn insert(&mut self, index: usize, member: Member) {
        self.members.insert(index, member);
    }

    pub(crate) fn member_mut(&mut self, index: usize) -> Option<&mut Member> {
        self.members.get_mut(index)
    }

    pub(crate) fn set_padding(&mut self, bytes: u64, bits: u64) {
        self.total_padding_bytes = bytes;
        self.total_padding_bits = bits;
    }

    /// Best-effort guess that this node sits in its parent through the
    /// empty base class optimization.
    ///
    /// Debug info cannot say that a base occupies zero bytes, so a node of at
    /// most one byte with at most one member (itself probably empty, when it
    /// is a base or nested aggregate) is assumed to take no space.
    pub fn probably_empty(&self) -> bool {
        if self.total_byte_size > 1 || self.members.len() > 1 {
            return false;
        }
        match self.members.first().and_then(Member::nested) {
            Some(nested) => nested.probably_empty(),
            None => true,
        }
    }

    pub fn padding_percentage(&self) -> Option<f64> {
        if self.total_byte_size == 0 {
            return None;
        }
        Some(self.total_padding_bytes as f64 / self.total_byte_size as f64 * 100.0)
    }

    pub fn summary(&self) -> PaddingSummary {
        PaddingSummary {
            total_byte_size: self.total_byte_size,
            padding_bytes: self.total_padding_bytes,
            padding_bits: self.total_padding_bits,
        }
    }
}

impl PartialEq for LayoutNode {
    fn eq(&self, other: &Self) -> bool {
        self.total_byte_size == other.total_byte_size
            && self.total_padding_bytes == other.total_padding_bytes
            && self.members.len() == other.members.len()
            && self.members.iter().zip(&other.members).all(|(a, b)| a == b)
    }
}

impl Eq for LayoutNode {}

/// Totals handed to renderers alongside the finished tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaddingSummary {
    pub total_byte_size: u64,
    pub padding_bytes: u64,
    pub padding_bits: u64,
}

impl PaddingSummary {
    pub fn padding_percentage(&self) -> Option<f64> {
        if self.total_byte_size == 0 {
            return None;
        }
        Some(self.padding_bytes as f64 / self.total_byte_size as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, offset: u64, size: u64) -> Member {
        Member::Field {
            name: name.to_string(),
            type_name: "int".to_string(),
            local_offset: offset,
            byte_size: size,
        }
    }

    fn base(node: LayoutNode) -> Member {
        Member::BaseClass {
            name: node.type_name().to_string(),
            type_name: node.type_name().to_string(),
            local_offset: 0,
            byte_size: node.total_byte_size(),
            is_virtual: false,
            nested: Box::new(node),
        }
    }

    #[test]
    fn test_empty_node_is_probably_empty() {
        assert!(LayoutNode::new("Empty", 1).probably_empty());
        assert!(LayoutNode::new("Empty", 0).probably_empty());
    }

    #[test]
    fn test_probably_empty_recurses_into_single_base() {
        let mut outer = LayoutNode::new("Outer", 1);
        outer.push(base(LayoutNode::new("Inner", 1)));
        assert!(outer.probably_empty());

        let mut fat_inner = LayoutNode::new("Inner", 1);
        fat_inner.push(field("a", 0, 1));
        fat_inner.push(field("b", 0, 1));
        let mut outer = LayoutNode::new("Outer", 1);
        outer.push(base(fat_inner));
        assert!(!outer.probably_empty());
    }

    #[test]
    fn test_large_node_is_not_empty() {
        let mut node = LayoutNode::new("Wide", 4);
        node.push(field("a", 0, 4));
        assert!(!node.probably_empty());
    }

    #[test]
    fn test_equality_compares_member_counts() {
        let mut a = LayoutNode::new("A", 8);
        a.push(field("x", 0, 4));
        let mut b = LayoutNode::new("A", 8);
        b.push(field("x", 0, 4));
        assert_eq!(a, b);

        b.push(field("y", 4, 4));
        assert_ne!(a, b);

        let mut c = LayoutNode::new("A", 8);
        c.push(field("z", 0, 4));
        assert_ne!(a, c);
    }

    #[test]
    fn test_padding_percentage() {
        let mut node = LayoutNode::new("P", 8);
        node.set_padding(2, 3);
        assert_eq!(node.padding_percentage(), Some(25.0));
        assert_eq!(node.summary().padding_bits, 3);
        assert_eq!(LayoutNode::new("Z", 0).padding_percentage(), None);
    }
}
