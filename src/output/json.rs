// Mon Oct 19 2026 - Alex

use crate::output::{OutputResult, Renderer};
use crate::structure::{LayoutNode, PaddingSummary, SerializableLayout};
use serde_json::{to_string, to_string_pretty};

pub struct JsonRenderer {
    pretty_print: bool,
}

impl JsonRenderer {
    pub fn new() -> Self {
        Self { pretty_print: true }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, root: &LayoutNode, _summary: &PaddingSummary) -> OutputResult<String> {
        let layout = SerializableLayout::from(root);
        let json = if self.pretty_print {
            to_string_pretty(&layout)?
        } else {
            to_string(&layout)?
        };
        Ok(json)
    }
}
