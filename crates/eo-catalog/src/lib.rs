//! Searchable catalog of executive order summaries.
//!
//! The pipeline is `RecordStore` (fetch once, memoize) -> `SearchIndex`
//! (built once over the collection) -> `render` (record to element tree),
//! driven by a `SearchController` that turns raw input into a fresh list.

pub mod assemble;
pub mod controller;
pub mod error;
pub mod node;
pub mod page;
pub mod record;
pub mod render;
pub mod schema;
pub mod search;
pub mod store;

pub use controller::{SearchController, ViewState};
pub use error::{CatalogError, Result};
pub use record::{Categories, DateValue, Record, RecordCollection, TextList};
pub use schema::{FieldSpec, RenderHint, Schema};
pub use search::{SearchHit, SearchIndex, SearchOptions};
pub use store::{FileSource, HttpSource, RecordSource, RecordStore, StaticSource};
