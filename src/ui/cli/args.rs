// Mon Oct 19 2026 - Alex

use crate::config::{ColorChoice, Config};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cdump")]
#[command(author = "Alex")]
#[command(version = "0.1.0")]
#[command(about = "Dump the memory layout of C++ classes and structs, padding included", long_about = None)]
pub struct Args {
    /// Type names to lay out, e.g. `Widget` or `ns::Widget`
    #[arg(required = true)]
    pub types: Vec<String>,

    /// JSON type database exported from debug info
    #[arg(short = 't', long = "types", value_name = "FILE")]
    pub types_file: Option<PathBuf>,

    #[arg(short, long)]
    pub decimal: bool,

    #[arg(long)]
    pub json: bool,

    #[arg(long)]
    pub no_color: bool,

    #[arg(short, long)]
    pub log_level: Option<String>,

    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Layers the command line over `config`. Flags only ever switch a
    /// setting on, so an absent flag keeps the file's value.
    pub fn apply_to(&self, mut config: Config) -> Config {
        if self.decimal {
            config.decimal = true;
        }
        if self.json {
            config.json = true;
        }
        if self.no_color {
            config.color = ColorChoice::Never;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(path) = &self.types_file {
            config.types_file = Some(path.clone());
        }
        config
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = self.types.iter().find(|name| name.trim().is_empty()) {
            return Err(format!("Invalid type name: {:?}", name));
        }
        Ok(())
    }
}
