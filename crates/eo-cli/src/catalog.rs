use crate::config::Config;
use anyhow::{Context, Result};
use eo_catalog::{RecordStore, Schema, SearchController, SearchOptions};
use indicatif::ProgressBar;
use std::time::Duration;

/// Open the configured catalog and load it behind a spinner
pub fn open(config: &Config) -> Result<RecordStore> {
    let store = RecordStore::from_location(&config.source);

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner.set_message(format!("Loading catalog from {}...", store.origin()));
    let loaded = store.get().map(|collection| collection.len());
    spinner.finish_and_clear();

    let count = loaded.with_context(|| format!("Failed to load catalog from {}", config.source))?;
    log::debug!("{count} executive orders available");
    Ok(store)
}

pub fn options(config: &Config) -> SearchOptions {
    SearchOptions::default().with_threshold(config.threshold)
}

pub fn controller<'a>(store: &'a RecordStore, config: &Config) -> Result<SearchController<'a>> {
    Ok(SearchController::new(
        store,
        options(config),
        Schema::default(),
    )?)
}
