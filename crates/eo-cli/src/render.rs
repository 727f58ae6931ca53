use crate::catalog;
use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use eo_catalog::page::{DEFAULT_PAGE_TITLE, render_page};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Pre-fill the search box and render only matching orders
    #[arg(short, long, default_value = "")]
    pub query: String,

    /// Write the page here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Page heading and <title>
    #[arg(long, default_value = DEFAULT_PAGE_TITLE)]
    pub title: String,
}

pub fn execute(args: RenderArgs, config: &Config) -> Result<()> {
    let store = catalog::open(config)?;
    let mut controller = catalog::controller(&store, config)?;
    controller.handle_input(&args.query);

    let page = render_page(&controller, &args.title);

    match args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &page)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} {} orders to {}",
                "Rendered".green(),
                controller.view().len(),
                path.display()
            );
        }
        None => io::stdout().lock().write_all(page.as_bytes())?,
    }
    Ok(())
}
