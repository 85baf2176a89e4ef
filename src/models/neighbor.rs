//! Directed neighbor edges between countries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::snapshot::Snapshot;
use crate::store::{Collection, Document, Store};

/// "Country `country_id` considers `neighbor_id` a neighbor."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighbor {
    pub id: Uuid,
    pub country_id: Uuid,
    pub neighbor_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Neighbor {
    pub fn new(country_id: Uuid, neighbor_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            country_id,
            neighbor_id,
            created_at: Utc::now(),
        }
    }

    /// True if this edge is exactly `country_id → neighbor_id`.
    pub fn links(&self, country_id: Uuid, neighbor_id: Uuid) -> bool {
        self.country_id == country_id && self.neighbor_id == neighbor_id
    }
}

impl Document for Neighbor {
    const COLLECTION: &'static str = "neighbors";

    fn id(&self) -> Uuid {
        self.id
    }

    fn collection(store: &Store) -> &Collection<Self> {
        store.neighbors()
    }

    fn snapshot_slot(snapshot: &mut Snapshot) -> &mut Vec<Self> {
        &mut snapshot.neighbors
    }
}
