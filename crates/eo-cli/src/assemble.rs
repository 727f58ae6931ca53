use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use eo_catalog::assemble::{PAYLOAD_FILE_NAME, assemble_dir, write_collection};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct AssembleArgs {
    /// Directory of per-order summary JSON files
    #[arg(default_value = "eo")]
    pub dir: PathBuf,

    /// Payload path [default: <DIR>/eo.json]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn execute(args: AssembleArgs) -> Result<()> {
    let report = assemble_dir(&args.dir)
        .with_context(|| format!("Failed to assemble {}", args.dir.display()))?;

    for (path, reason) in &report.skipped {
        eprintln!("{} {}: {}", "Skipped".yellow(), path.display(), reason);
    }

    let output = args
        .output
        .unwrap_or_else(|| args.dir.join(PAYLOAD_FILE_NAME));
    write_collection(&output, &report.collection)?;

    eprintln!(
        "{} {} orders into {}",
        "Assembled".green(),
        report.collection.len(),
        output.display()
    );
    Ok(())
}
