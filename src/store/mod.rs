//! Document store subsystem.
//!
//! # Data Flow
//! ```text
//! connection string (memory:// | file://<path>)
//!     → url.rs (parse)
//!     → Store::open (load snapshot if present)
//!
//! Reads:  Collection::{get, find, count, find_one}   (lock-free, concurrent)
//! Writes: Store::{insert_many, insert_unique}
//!     → writer lock
//!     → snapshot.rs (persist current contents plus the pending documents)
//!     → on persist failure: return StoreError, collections untouched
//!     → apply to collection
//! ```
//!
//! # Design Decisions
//! - Collections are DashMaps keyed by UUID, each entry tagged with an insertion sequence
//! - Writes are serialized; readers only ever see documents that are already persisted
//! - Opening is an explicit, fallible step; the caller decides what failure means

pub mod collection;
pub mod snapshot;
pub mod url;

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::models::{Country, Neighbor};
use crate::observability::metrics;

pub use collection::{Collection, Document, Query};
pub use url::StoreUrl;

/// Errors raised by the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unsupported store url '{0}': expected memory:// or file://<path>")]
    UnsupportedUrl(String),
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// The catalog's document store: a `Country` and a `Neighbor` collection.
#[derive(Debug)]
pub struct Store {
    countries: Collection<Country>,
    neighbors: Collection<Neighbor>,
    snapshot_path: Option<PathBuf>,
    writer: Mutex<()>,
}

impl Store {
    /// Open the store described by a connection string.
    pub fn open(url: &str) -> Result<Self, StoreError> {
        match StoreUrl::parse(url)? {
            StoreUrl::Memory => Ok(Self::in_memory()),
            StoreUrl::File(path) => Self::open_file(path),
        }
    }

    /// A volatile store with nothing on disk.
    pub fn in_memory() -> Self {
        Self {
            countries: Collection::default(),
            neighbors: Collection::default(),
            snapshot_path: None,
            writer: Mutex::new(()),
        }
    }

    fn open_file(path: PathBuf) -> Result<Self, StoreError> {
        let loaded = snapshot::load(&path)?;
        let store = Self {
            snapshot_path: Some(path),
            ..Self::in_memory()
        };

        for country in loaded.countries {
            store.countries.insert(country);
        }
        for neighbor in loaded.neighbors {
            store.neighbors.insert(neighbor);
        }

        store.record_sizes();
        tracing::info!(
            countries = store.countries.len(),
            neighbors = store.neighbors.len(),
            "Loaded store snapshot"
        );
        Ok(store)
    }

    pub fn countries(&self) -> &Collection<Country> {
        &self.countries
    }

    pub fn neighbors(&self) -> &Collection<Neighbor> {
        &self.neighbors
    }

    /// Insert every document or none of them.
    pub fn insert_many<T: Document>(&self, docs: Vec<T>) -> Result<Vec<T>, StoreError> {
        let _guard = self.lock_writer();
        self.persist_with(&docs)?;

        let collection = T::collection(self);
        for doc in &docs {
            collection.insert(doc.clone());
        }

        self.record_sizes();
        Ok(docs)
    }

    /// Insert `doc` unless a stored document satisfies `conflicts`.
    ///
    /// Returns `Ok(None)` when a conflicting document already exists. The check
    /// and the insert happen under the writer lock.
    pub fn insert_unique<T, F>(&self, doc: T, conflicts: F) -> Result<Option<T>, StoreError>
    where
        T: Document,
        F: Fn(&T) -> bool,
    {
        let _guard = self.lock_writer();
        let collection = T::collection(self);

        if collection.find_one(&conflicts).is_some() {
            return Ok(None);
        }

        self.persist_with(std::slice::from_ref(&doc))?;
        collection.insert(doc.clone());

        self.record_sizes();
        Ok(Some(doc))
    }

    /// Write the stored documents plus `pending` to the snapshot file, if any.
    fn persist_with<T: Document>(&self, pending: &[T]) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let mut next = snapshot::Snapshot {
            countries: self.countries.all(),
            neighbors: self.neighbors.all(),
        };
        T::snapshot_slot(&mut next).extend_from_slice(pending);

        snapshot::save(path, &next.countries, &next.neighbors).inspect_err(|e| {
            tracing::error!(collection = T::COLLECTION, error = %e, "Write not persisted");
        })
    }

    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_sizes(&self) {
        metrics::record_collection_size(Country::COLLECTION, self.countries.len());
        metrics::record_collection_size(Neighbor::COLLECTION, self.neighbors.len());
    }
}
