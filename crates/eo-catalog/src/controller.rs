//! Search controller: feeds raw input through the index and re-renders.
//!
//! Two states. Unfiltered shows the whole collection in source order with no
//! result message. Filtered shows the ranked hits for the last non-empty
//! query and a "Found N results" message. Every input runs one complete
//! search-and-render cycle synchronously.

use crate::error::Result;
use crate::record::{Record, RecordCollection};
use crate::render::ListView;
use crate::schema::Schema;
use crate::search::{SearchIndex, SearchOptions};
use crate::store::RecordStore;
use chrono::Local;
use std::time::Instant;

/// Id of the container element the list renders into
pub const LIST_CONTAINER_ID: &str = "eos";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Unfiltered,
    Filtered { query: String },
}

/// A record currently on screen
#[derive(Debug, Clone, Copy)]
pub struct Entry<'a> {
    pub record: &'a Record,
    /// Position in source order
    pub position: usize,
    /// Relevance, only for filtered views
    pub score: Option<f64>,
}

pub struct SearchController<'a> {
    collection: &'a RecordCollection,
    index: SearchIndex<'a>,
    view: ListView,
    state: ViewState,
    entries: Vec<Entry<'a>>,
    message: Option<String>,
}

impl<'a> SearchController<'a> {
    /// Load the store (fetching on first use), build the index and paint the
    /// full list.
    pub fn new(store: &'a RecordStore, options: SearchOptions, schema: Schema) -> Result<Self> {
        let collection = store.get()?;
        Ok(Self::from_collection(collection, options, schema))
    }

    pub fn from_collection(
        collection: &'a RecordCollection,
        options: SearchOptions,
        schema: Schema,
    ) -> Self {
        let index = SearchIndex::build(&collection.records, options);
        let mut controller = Self {
            collection,
            index,
            view: ListView::new(LIST_CONTAINER_ID, schema),
            state: ViewState::Unfiltered,
            entries: Vec::new(),
            message: None,
        };
        controller.show_all();
        controller
    }

    /// Apply one input change. Empty or whitespace-only input restores the
    /// unfiltered list.
    pub fn handle_input(&mut self, raw: &str) {
        let query = raw.trim();
        if query.is_empty() {
            self.show_all();
            return;
        }

        let started = Instant::now();
        let hits = self.index.search(query);
        self.entries = hits
            .iter()
            .map(|hit| Entry {
                record: hit.record,
                position: hit.position,
                score: Some(hit.score),
            })
            .collect();
        self.view.render_list(hits.iter().map(|hit| hit.record));
        self.message = Some(result_message(hits.len(), query));
        self.state = ViewState::Filtered {
            query: query.to_string(),
        };

        log::debug!(
            "Query {:?}: {} hits in {:?}",
            query,
            hits.len(),
            started.elapsed()
        );
    }

    fn show_all(&mut self) {
        self.entries = self
            .collection
            .records
            .iter()
            .enumerate()
            .map(|(position, record)| Entry {
                record,
                position,
                score: None,
            })
            .collect();
        self.view.render_list(&self.collection.records);
        self.message = None;
        self.state = ViewState::Unfiltered;
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// "Found N results for ..." while filtered, `None` otherwise
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn entries(&self) -> &[Entry<'a>] {
        &self.entries
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn collection(&self) -> &'a RecordCollection {
        self.collection
    }

    /// Build time in the local time zone, or the raw value if unparseable
    pub fn build_time_label(&self) -> Option<String> {
        format_build_time(self.collection)
    }
}

pub fn result_message(count: usize, query: &str) -> String {
    let noun = if count == 1 { "result" } else { "results" };
    format!("Found {count} {noun} for \"{query}\"")
}

pub fn format_build_time(collection: &RecordCollection) -> Option<String> {
    let raw = collection.build_time.as_deref()?;
    Some(match collection.built_at() {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%B %-d, %Y, %-I:%M:%S %p")
            .to_string(),
        None => raw.to_string(),
    })
}
