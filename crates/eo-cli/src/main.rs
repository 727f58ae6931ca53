use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod assemble;
mod browse;
mod catalog;
mod config;
mod fields;
mod outline;
mod render;
mod search;
mod show;

use config::Config;

#[derive(Parser)]
#[command(name = "eo")]
#[command(about = "Search and browse executive order summaries", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    /// Catalog location: a JSON file or an http(s) URL
    #[arg(long, global = true, value_name = "PATH|URL")]
    source: Option<String>,

    /// Fuzzy match strictness, from 0 (exact) to 1 (anything goes)
    #[arg(long, global = true, value_name = "0..1")]
    threshold: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search
    #[command(alias = "b")]
    Browse(browse::BrowseArgs),

    /// Print ranked matches for a query
    #[command(alias = "s")]
    Search(search::SearchArgs),

    /// Print one executive order
    Show(show::ShowArgs),

    /// Write the catalog as a static HTML page
    #[command(alias = "r")]
    Render(render::RenderArgs),

    /// Combine per-order summary files into one catalog payload
    Assemble(assemble::AssembleArgs),

    /// List displayed fields and searchable keys
    Fields(fields::FieldsArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug; RUST_LOG overrides
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    let config = Config::load(cli.source, cli.threshold)?;
    log::debug!("Using catalog {} (threshold {})", config.source, config.threshold);

    match cli.command {
        Commands::Browse(args) => browse::execute(args, &config),
        Commands::Search(args) => search::execute(args, &config),
        Commands::Show(args) => show::execute(args, &config),
        Commands::Render(args) => render::execute(args, &config),
        Commands::Assemble(args) => assemble::execute(args),
        Commands::Fields(args) => fields::execute(args, &config),
    }
}
