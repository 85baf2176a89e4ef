//! Country catalog operations.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → CountryCatalog (validate input, build queries)
//!     → Store (collections, writes)
//!     → typed result or CatalogError
//! ```
//!
//! # Design Decisions
//! - Country batches are all-or-nothing
//! - Neighbor batches are processed in input order, each candidate on its own,
//!   and report per-candidate errors next to the created edges
//! - Identifiers that are not UUIDs are treated as unknown

pub mod countries;
pub mod neighbors;
pub mod page;
pub mod sort;

use std::sync::Arc;

use uuid::Uuid;

use crate::store::{Store, StoreError};

pub use neighbors::NeighborOutcome;
pub use page::{Page, PageRequest};
pub use sort::SortKey;

/// Errors raised by catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("country not found")]
    NotFound,
    #[error("invalid country payload at index {index}: {reason}")]
    InvalidPayload { index: usize, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Business operations over the country store.
#[derive(Debug, Clone)]
pub struct CountryCatalog {
    store: Arc<Store>,
}

impl CountryCatalog {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

/// Parse a caller-supplied identifier; anything but a UUID is unknown.
pub(crate) fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw.trim()).ok()
}
