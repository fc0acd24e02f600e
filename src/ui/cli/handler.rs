// Mon Oct 19 2026 - Alex

use super::args::Args;
use crate::config::Config;
use crate::output::{JsonRenderer, LayoutFormatter, Renderer};
use crate::structure::dump_layout;
use crate::symbol::{load_type_database, TypeDatabase};
use crate::utils::logging::{self, LoggingUtils, ScopedTimer};
use anyhow::{anyhow, Context};
use rayon::prelude::*;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow!(e))?;

        let config = self.load_config(&args)?;
        self.setup_logging(&config, args.quiet);

        let path = config
            .types_file
            .clone()
            .ok_or_else(|| anyhow!("No type database given; pass --types or set types_file in the config"))?;
        let db = load_type_database(&path)
            .with_context(|| format!("Failed to load type database {}", path.display()))?;

        let renderer = self.renderer(&config);
        for output in self.dump_all(&db, &args.types, renderer.as_ref()) {
            println!("{}", output?);
        }
        Ok(())
    }

    /// Lays out every requested type in parallel. Results come back in
    /// request order; each type gets its own builder and cache.
    pub fn dump_all(
        &self,
        db: &TypeDatabase,
        queries: &[String],
        renderer: &dyn Renderer,
    ) -> Vec<anyhow::Result<String>> {
        queries
            .par_iter()
            .map(|query| self.dump_one(db, query, renderer))
            .collect()
    }

    fn dump_one(&self, db: &TypeDatabase, query: &str, renderer: &dyn Renderer) -> anyhow::Result<String> {
        let name = db.find_type(query)?;
        let _timer = ScopedTimer::new(&format!("layout of {}", name));

        let (root, summary) =
            dump_layout(db, &name).with_context(|| format!("Cannot lay out {}", name))?;
        Ok(renderer.render(&root, &summary)?)
    }

    fn load_config(&self, args: &Args) -> anyhow::Result<Config> {
        let base = match &args.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        let config = args.apply_to(base);
        config.validate()?;
        Ok(config)
    }

    fn setup_logging(&self, config: &Config, quiet: bool) {
        logging::init_logger(LoggingUtils::effective_level(&config.log_level, quiet));
    }

    fn renderer(&self, config: &Config) -> Box<dyn Renderer> {
        if config.json {
            Box::new(JsonRenderer::new().with_pretty_print(true))
        } else {
            Box::new(
                LayoutFormatter::new()
                    .with_number_format(config.number_format())
                    .with_color(config.color.should_colorize()),
            )
        }
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol::SymbolError;
    use clap::Parser;
    use std::io::Write;

    const DB: &str = r#"{
        "types": [
            { "name": "Point", "kind": "struct", "byte_size": 8,
              "fields": [
                { "name": "x", "type": "int", "offset": 0, "byte_size": 4 },
                { "name": "y", "type": "int", "offset": 4, "byte_size": 4 }
              ] },
            { "name": "Tagged", "kind": "struct", "byte_size": 16,
              "fields": [
                { "name": "tag", "type": "char", "offset": 0, "byte_size": 1 },
                { "name": "p", "type": "Point", "offset": 4, "byte_size": 8 }
              ] },
            { "name": "a::Dup", "kind": "struct", "byte_size": 1 },
            { "name": "b::Dup", "kind": "struct", "byte_size": 1 }
        ]
    }"#;

    fn queries(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_dump_all_keeps_request_order() {
        let db = TypeDatabase::from_json(DB).unwrap();
        let renderer = LayoutFormatter::new();
        let outputs = CommandHandler::new().dump_all(&db, &queries(&["Tagged", "Point"]), &renderer);

        let texts: Vec<String> = outputs.into_iter().map(|r| r.unwrap()).collect();
        assert!(texts[0].starts_with("+0x0000 <0x010> Tagged"));
        assert!(texts[0].contains("Total pad bytes: 7"));
        assert!(texts[1].starts_with("+0x0000 <0x008> Point"));
    }

    #[test]
    fn test_dump_all_reports_errors_per_type() {
        let db = TypeDatabase::from_json(DB).unwrap();
        let renderer = JsonRenderer::new();
        let outputs = CommandHandler::new().dump_all(&db, &queries(&["Point", "Dup", "Nope"]), &renderer);

        assert!(outputs[0].is_ok());
        let ambiguous = outputs[1].as_ref().unwrap_err();
        assert!(matches!(
            ambiguous.downcast_ref::<SymbolError>(),
            Some(SymbolError::AmbiguousType { .. })
        ));
        assert!(outputs[2].is_err());
    }

    #[test]
    fn test_execute_without_database_fails() {
        let args = Args::try_parse_from(["cdump", "Point"]).unwrap();
        let err = CommandHandler::new().execute(args).unwrap_err();
        assert!(err.to_string().contains("No type database"));
    }

    #[test]
    fn test_execute_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("types.json");
        std::fs::File::create(&db_path).unwrap().write_all(DB.as_bytes()).unwrap();

        let config_path = dir.path().join("cdump.json");
        Config::new()
            .with_json(true)
            .with_types_file(db_path)
            .save(&config_path)
            .unwrap();

        let args = Args::try_parse_from(["cdump", "-q", "-c", config_path.to_str().unwrap(), "Point"]).unwrap();
        assert!(CommandHandler::new().execute(args).is_ok());
    }
}
