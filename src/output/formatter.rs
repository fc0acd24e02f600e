// Mon Oct 19 2026 - Alex

use crate::output::{OutputResult, Renderer};
use crate::structure::{LayoutNode, Member, PaddingSummary};
use colored::Colorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    #[default]
    Hex,
    Decimal,
}

/// Text renderer: one line per member, nested layouts indented.
pub struct LayoutFormatter {
    number_format: NumberFormat,
    colorize: bool,
}

impl LayoutFormatter {
    pub fn new() -> Self {
        Self {
            number_format: NumberFormat::Hex,
            colorize: false,
        }
    }

    pub fn with_number_format(mut self, format: NumberFormat) -> Self {
        self.number_format = format;
        self
    }

    pub fn with_color(mut self, colorize: bool) -> Self {
        self.colorize = colorize;
        self
    }

    pub fn format_offset(&self, offset: u64) -> String {
        match self.number_format {
            NumberFormat::Hex => format!("+0x{:04x}", offset),
            NumberFormat::Decimal => format!("{:+4}", offset),
        }
    }

    pub fn format_size(&self, size: u64) -> String {
        match self.number_format {
            NumberFormat::Hex => format!("<0x{:03x}>", size),
            NumberFormat::Decimal => format!("<{:3}>", size),
        }
    }

    pub fn format_bits(&self, bits: u32) -> String {
        match self.number_format {
            NumberFormat::Hex => format!("< :0x{:01x}>", bits),
            NumberFormat::Decimal => format!("< :{:1}>", bits),
        }
    }

    pub fn format_lines(&self, root: &LayoutNode, summary: &PaddingSummary) -> Vec<String> {
        let mut lines = Vec::new();
        self.format_node(&mut lines, root, None, 0, 0);

        lines.push(format!("Total byte size: {}", summary.total_byte_size));
        lines.push(format!("Total pad bytes: {}", summary.padding_bytes));
        if summary.padding_bytes > 0 {
            if let Some(percentage) = summary.padding_percentage() {
                lines.push(format!("Padding percentage: {:2.2} %", percentage));
            }
        }
        if summary.padding_bits > 0 {
            lines.push(format!("Total unused bits: {}", summary.padding_bits));
        }
        lines
    }

    fn format_node(
        &self,
        lines: &mut Vec<String>,
        node: &LayoutNode,
        label: Option<String>,
        depth: usize,
        start: u64,
    ) {
        let indent = "    ".repeat(depth);
        let mut header = format!(
            "{} {} {}{}",
            self.format_offset(start),
            self.format_size(node.total_byte_size()),
            indent,
            self.type_name(node.type_name())
        );
        if let Some(label) = label {
            header.push(' ');
            header.push_str(&label);
        }
        lines.push(header);

        for member in node.members() {
            let offset = start + member.local_offset();
            match member {
                Member::BaseClass { name, is_virtual, nested, .. } => {
                    let label = if *is_virtual {
                        format!("{} (virtual)", name)
                    } else {
                        name.clone()
                    };
                    self.format_node(lines, nested, Some(label), depth + 1, offset);
                }
                Member::NestedAggregate { name, nested, .. } => {
                    self.format_node(lines, nested, Some(name.clone()), depth + 1, offset);
                }
                Member::VTablePointer { byte_size } => lines.push(format!(
                    "{} {} {}  {}",
                    self.format_offset(offset),
                    self.format_size(*byte_size),
                    indent,
                    member.name()
                )),
                Member::Field { name, type_name, byte_size, .. } => lines.push(format!(
                    "{} {} {}  {} {}",
                    self.format_offset(offset),
                    self.format_size(*byte_size),
                    indent,
                    type_name,
                    name
                )),
                Member::Bitfield { name, type_name, bit_width, .. } => lines.push(format!(
                    "{} {} {}  {} {} : {}",
                    self.format_offset(offset),
                    self.format_bits(*bit_width),
                    indent,
                    type_name,
                    name,
                    bit_width
                )),
                Member::PaddingBytes { byte_size, .. } => {
                    let unit = if *byte_size > 1 { "bytes" } else { "byte" };
                    lines.push(format!(
                        "{} {} {}  {}",
                        self.format_offset(offset),
                        self.format_size(*byte_size),
                        indent,
                        self.warning(&format!("<PADDING: {} {}>", byte_size, unit))
                    ));
                }
                Member::PaddingBits { bit_count, .. } => {
                    let unit = if *bit_count > 1 { "bits" } else { "bit" };
                    lines.push(format!(
                        "{} {} {}  {}",
                        self.format_offset(offset),
                        self.format_bits(*bit_count),
                        indent,
                        self.warning(&format!("<UNUSED BITS: {} {}>", bit_count, unit))
                    ));
                }
            }
        }
    }

    fn type_name(&self, name: &str) -> String {
        if self.colorize {
            name.bright_blue().to_string()
        } else {
            name.to_string()
        }
    }

    fn warning(&self, text: &str) -> String {
        if self.colorize {
            text.bright_yellow().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Default for LayoutFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for LayoutFormatter {
    fn render(&self, root: &LayoutNode, summary: &PaddingSummary) -> OutputResult<String> {
        Ok(self.format_lines(root, summary).join("\n"))
    }
}
