//! Lazily loaded, memoized record collection.

use crate::error::{CatalogError, Result};
use crate::record::RecordCollection;
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use std::fs;
use std::path::PathBuf;

/// Where the catalog payload comes from
pub trait RecordSource: Send + Sync {
    /// Human-readable location, used in logs and errors
    fn origin(&self) -> String;

    fn fetch(&self) -> Result<Vec<u8>>;
}

/// Single blocking GET
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }
}

impl RecordSource for HttpSource {
    fn origin(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        let fetch_err = |source| CatalogError::Fetch {
            url: self.url.clone(),
            source,
        };

        let response = self.client.get(&self.url).send().map_err(fetch_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Http {
                url: self.url.clone(),
                status,
            });
        }
        Ok(response.bytes().map_err(fetch_err)?.to_vec())
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSource for FileSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|source| CatalogError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory payload
pub struct StaticSource {
    origin: String,
    bytes: Vec<u8>,
}

impl StaticSource {
    pub fn new(origin: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            origin: origin.into(),
            bytes: bytes.into(),
        }
    }
}

impl RecordSource for StaticSource {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn fetch(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}

/// Holds the catalog for the lifetime of the store. The first successful
/// [`RecordStore::get`] fetches and parses; every later call returns the
/// cached collection without touching the source again.
pub struct RecordStore {
    source: Box<dyn RecordSource>,
    cache: OnceCell<RecordCollection>,
}

impl RecordStore {
    pub fn new(source: impl RecordSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: OnceCell::new(),
        }
    }

    /// HTTP(S) URLs are fetched over the network, anything else is a file path
    pub fn from_location(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::new(HttpSource::new(location))
        } else {
            Self::new(FileSource::new(location))
        }
    }

    pub fn origin(&self) -> String {
        self.source.origin()
    }

    pub fn get(&self) -> Result<&RecordCollection> {
        self.cache.get_or_try_init(|| self.load())
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    fn load(&self) -> Result<RecordCollection> {
        let origin = self.source.origin();
        log::debug!("Fetching catalog from {origin}");

        let bytes = self.source.fetch()?;
        let collection = RecordCollection::from_json_slice(&bytes, &origin)?;

        log::debug!(
            "Loaded {} records from {} (build time: {})",
            collection.len(),
            origin,
            collection.build_time.as_deref().unwrap_or("unknown")
        );
        Ok(collection)
    }
}
