//! Interactive terminal search over the catalog

mod app;
mod input;
mod ui;

use crate::catalog;
use crate::config::Config;
use anyhow::Result;
use clap::Args;

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Start with this query in the search box
    #[arg(default_value = "")]
    pub query: String,
}

pub fn execute(args: BrowseArgs, config: &Config) -> Result<()> {
    let store = catalog::open(config)?;
    let controller = catalog::controller(&store, config)?;
    app::run(controller, &args.query)
}
