// Mon Oct 19 2026 - Alex

use crate::symbol::SymbolError;
use colored::Colorize;
use std::error::Error;

const MAX_CAUSES: usize = 10;

pub struct ErrorDisplay {
    show_cause_chain: bool,
    color_enabled: bool,
}

impl ErrorDisplay {
    pub fn new() -> Self {
        Self {
            show_cause_chain: true,
            color_enabled: atty::is(atty::Stream::Stderr),
        }
    }

    pub fn without_colors(mut self) -> Self {
        self.color_enabled = false;
        self
    }

    pub fn without_cause_chain(mut self) -> Self {
        self.show_cause_chain = false;
        self
    }

    pub fn format<E: Error>(&self, error: &E) -> String {
        let mut output = self.header(&error.to_string());
        if self.show_cause_chain {
            let mut causes = Vec::new();
            let mut source = error.source();
            while let Some(cause) = source {
                causes.push(cause.to_string());
                source = cause.source();
            }
            self.push_causes(&mut output, causes);
        }
        output
    }

    /// Same as [`format`](Self::format) for the handler's `anyhow` errors,
    /// plus a hint when the failure has an obvious fix.
    pub fn format_report(&self, error: &anyhow::Error) -> String {
        let mut output = self.header(&error.to_string());
        if self.show_cause_chain {
            self.push_causes(&mut output, error.chain().skip(1).map(|c| c.to_string()).collect());
        }
        if let Some(hint) = hint_for(error) {
            output.push_str(&self.format_hint(&hint));
            output.push('\n');
        }
        output
    }

    pub fn print_report(&self, error: &anyhow::Error) {
        eprint!("{}", self.format_report(error));
    }

    pub fn format_hint(&self, message: &str) -> String {
        if self.color_enabled {
            format!("{} {}", "Hint:".cyan(), message)
        } else {
            format!("Hint: {}", message)
        }
    }

    fn header(&self, message: &str) -> String {
        let header = if self.color_enabled {
            "Error:".red().bold().to_string()
        } else {
            "Error:".to_string()
        };
        format!("{} {}\n", header, message)
    }

    fn push_causes(&self, output: &mut String, causes: Vec<String>) {
        let prefix = if self.color_enabled {
            format!("  {} ", "→".yellow())
        } else {
            "  -> ".to_string()
        };

        for (depth, cause) in causes.iter().enumerate() {
            if depth == MAX_CAUSES {
                output.push_str("  ... (cause chain truncated)\n");
                break;
            }
            output.push_str(&format!("{}Caused by: {}\n", prefix, cause));
        }
    }
}

impl Default for ErrorDisplay {
    fn default() -> Self {
        Self::new()
    }
}

fn hint_for(error: &anyhow::Error) -> Option<String> {
    match error.downcast_ref::<SymbolError>()? {
        SymbolError::AmbiguousType { candidates, .. } => Some(format!(
            "use a qualified name, one of: {}",
            candidates.join(", ")
        )),
        SymbolError::TypeNotFound(_) => {
            Some("check the spelling or the namespace of the type".to_string())
        }
        _ => None,
    }
}
