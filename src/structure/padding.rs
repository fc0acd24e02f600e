// Mon Oct 19 2026 - Alex

use crate::structure::{LayoutError, LayoutNode, LayoutResult, Member, PaddingSummary};

/// Offsets reached and padding found while walking one node.
#[derive(Debug, Clone, Copy, Default)]
struct Walk {
    padding_bytes: u64,
    padding_bits: u64,
    end_offset: u64,
}

/// Infers padding bytes and unused bitfield bits in a built layout tree.
///
/// Reported offsets are trusted over accumulated sizes: after each gap check
/// the walk resynchronizes on the member's reported position.
pub struct PaddingResolver;

impl PaddingResolver {
    /// Walks the tree rooted at `root`, splicing padding members in place.
    pub fn resolve(root: &mut LayoutNode) -> LayoutResult<PaddingSummary> {
        let walk = Self::walk(root, 0, true)?;
        log::debug!(
            "{}: {} pad bytes, {} unused bits, ends at 0x{:x}",
            root.type_name(),
            walk.padding_bytes,
            walk.padding_bits,
            walk.end_offset
        );
        Ok(root.summary())
    }

    /// `start` is the node's offset from the root object.
    fn walk(node: &mut LayoutNode, start: u64, is_root: bool) -> LayoutResult<Walk> {
        let mut padding_bytes = 0;
        let mut padding_bits = 0;
        let mut current = start;
        let mut previous_was_bitfield = false;

        let mut index = 0;
        while index < node.members().len() {
            let member = &node.members()[index];
            let local_offset = member.local_offset();
            let member_start = start + local_offset;
            let is_bitfield = member.is_bitfield();
            let probably_empty_base = matches!(member, Member::BaseClass { .. })
                && local_offset == 0
                && member.nested().is_some_and(LayoutNode::probably_empty);

            if !probably_empty_base {
                if member_start > current {
                    let gap = member_start - current;
                    log::trace!("{}: {} byte gap at 0x{:x}", node.type_name(), gap, current);
                    node.insert(
                        index,
                        Member::PaddingBytes {
                            local_offset: current - start,
                            byte_size: gap,
                        },
                    );
                    padding_bytes += gap;
                    index += 1;
                } else if member_start < current && !(is_bitfield && previous_was_bitfield) {
                    // Bitfields in one storage unit overlap at byte granularity;
                    // anything else going backwards means the facts disagree.
                    return Err(LayoutError::LayoutInconsistency {
                        type_name: node.type_name().to_string(),
                        member: node.members()[index].name().to_string(),
                        expected: current,
                        found: member_start,
                    });
                }
                current = member_start;
            }

            let Some(member) = node.member_mut(index) else {
                break;
            };
            if let Some(nested) = member.nested_mut() {
                let inner = Self::walk(nested, current, false)?;
                padding_bytes += inner.padding_bytes;
                padding_bits += inner.padding_bits;
                current = inner.end_offset;
            } else {
                current += member.byte_size();
            }

            let run_end = match &*member {
                Member::Bitfield { storage_byte_size, .. } => member
                    .trailing_unused_bits()
                    .map(|unused| (unused, *storage_byte_size)),
                _ => None,
            };
            if let Some((unused, storage_byte_size)) = run_end {
                let run_continues = node
                    .members()
                    .get(index + 1)
                    .is_some_and(Member::is_bitfield);
                if unused > 0 && !run_continues {
                    node.insert(
                        index + 1,
                        Member::PaddingBits {
                            local_offset,
                            bit_count: unused,
                            storage_byte_size,
                        },
                    );
                    padding_bits += u64::from(unused);
                    index += 1;
                }
            }

            previous_was_bitfield = is_bitfield;
            index += 1;
        }

        // Slack at the end of a subobject shows up as the parent's next gap.
        if is_root {
            let used = current - start;
            let total = node.total_byte_size();
            if used > total {
                return Err(LayoutError::LayoutInconsistency {
                    type_name: node.type_name().to_string(),
                    member: "<end>".to_string(),
                    expected: total,
                    found: used,
                });
            }
            if total > used {
                node.push(Member::PaddingBytes {
                    local_offset: used,
                    byte_size: total - used,
                });
                padding_bytes += total - used;
            }
        }

        node.set_padding(padding_bytes, padding_bits);
        Ok(Walk {
            padding_bytes,
            padding_bits,
            end_offset: current,
        })
    }
}
