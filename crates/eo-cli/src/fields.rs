use crate::catalog;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use eo_catalog::Schema;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct FieldsArgs {}

fn schema_table(schema: &Schema) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Section", "Label", "Path", "Hint"]);

    let rows = schema
        .summary
        .iter()
        .map(|f| ("summary", f))
        .chain(schema.details.iter().map(|f| ("details", f)));
    for (section, field) in rows {
        table.add_row(vec![section, field.label, field.path, field.hint.as_str()]);
    }
    table
}

fn keys_table(config: &Config) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Search Key", "Weight"]);
    for key in &catalog::options(config).keys {
        table.add_row(vec![key.name.to_string(), format!("{:.1}", key.weight)]);
    }
    table
}

pub fn execute(_args: FieldsArgs, config: &Config) -> Result<()> {
    let mut out = io::stdout().lock();
    writeln!(out, "{}", schema_table(&Schema::default()))?;
    writeln!(out)?;
    writeln!(out, "{}", keys_table(config))?;
    writeln!(
        out,
        "{}",
        format!("Match threshold: {}", config.threshold).dimmed()
    )?;
    Ok(())
}
