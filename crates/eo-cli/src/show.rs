use crate::catalog;
use crate::config::Config;
use crate::outline::{Outline, outline};
use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use eo_catalog::render::render_record;
use eo_catalog::Schema;
use std::io::{self, Write};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Executive order number, e.g. 14148
    pub eo_number: u32,

    /// Print the rendered HTML fragment instead of text
    #[arg(long)]
    pub html: bool,
}

pub fn execute(args: ShowArgs, config: &Config) -> Result<()> {
    let store = catalog::open(config)?;
    let collection = store.get()?;
    let Some(record) = collection.find(args.eo_number) else {
        bail!(
            "Executive order {} is not in the catalog at {}",
            args.eo_number,
            store.origin()
        );
    };

    let tree = render_record(record, &Schema::default());
    let mut out = io::stdout().lock();
    if args.html {
        writeln!(out, "{}", tree.to_html())?;
    } else {
        write_outline(&outline(&tree), &mut out)?;
    }
    Ok(())
}

fn write_outline<W: Write>(outline: &Outline, mut out: W) -> io::Result<()> {
    writeln!(out, "{}", outline.title.bold())?;
    writeln!(out, "{}", outline.number.dimmed())?;

    let width = outline
        .sections
        .iter()
        .flat_map(|s| s.fields.iter())
        .map(|f| f.label.len())
        .max()
        .unwrap_or(0);

    for section in &outline.sections {
        writeln!(out)?;
        writeln!(out, "{}", section.name.cyan().bold())?;
        for field in &section.fields {
            let label = format!("{:<width$}", field.label);
            match &field.target {
                Some(target) => writeln!(
                    out,
                    "  {}  {} {}",
                    label.dimmed(),
                    field.value,
                    format!("<{target}>").blue()
                )?,
                None => writeln!(out, "  {}  {}", label.dimmed(), field.value)?,
            }
        }
    }
    Ok(())
}
