//! Neighbor edges: listing resolved neighbors and adding new edges.

use crate::catalog::{parse_id, CatalogError, CountryCatalog};
use crate::models::{Country, Neighbor};
use crate::observability::metrics;
use crate::store::Query;

/// Result of an add-neighbors request.
///
/// Both lists follow the order the candidates were submitted in.
#[derive(Debug, Clone, Default)]
pub struct NeighborOutcome {
    pub added: Vec<Neighbor>,
    pub errors: Vec<String>,
}

impl NeighborOutcome {
    /// True when no candidate produced an edge.
    pub fn is_rejected(&self) -> bool {
        self.added.is_empty()
    }
}

impl CountryCatalog {
    /// Countries that `country_id` lists as neighbors, in edge creation order.
    pub fn neighbors_of(&self, country_id: &str) -> Result<Vec<Country>, CatalogError> {
        let source = self.get(country_id)?.id;
        let countries = self.store.countries();

        let edges = self
            .store
            .neighbors()
            .find(&Query::new().filter(move |n: &Neighbor| n.country_id == source));

        Ok(edges
            .iter()
            .filter_map(|edge| countries.get(&edge.neighbor_id))
            .collect())
    }

    /// Add `country_id → candidate` edges one candidate at a time.
    ///
    /// Candidates equal to the source are dropped silently. Unknown countries and
    /// already-existing edges are reported in `errors` and skipped; the rest are stored.
    pub fn add_neighbors(
        &self,
        country_id: &str,
        candidates: Vec<String>,
    ) -> Result<NeighborOutcome, CatalogError> {
        let source_hint = parse_id(country_id);
        let candidates: Vec<String> = candidates
            .into_iter()
            .filter(|c| c != country_id && (source_hint.is_none() || parse_id(c) != source_hint))
            .collect();

        let source = self.get(country_id)?.id;
        let known = self.store.countries().ids();
        let mut outcome = NeighborOutcome::default();

        for candidate in candidates {
            let target = match parse_id(&candidate).filter(|id| known.contains(id)) {
                Some(id) => id,
                None => {
                    metrics::record_neighbor_rejection("unknown_country");
                    outcome
                        .errors
                        .push(format!("Invalid neighbor country ID: {}", candidate));
                    continue;
                }
            };

            match self
                .store
                .insert_unique(Neighbor::new(source, target), |n: &Neighbor| n.links(source, target))?
            {
                Some(edge) => outcome.added.push(edge),
                None => {
                    metrics::record_neighbor_rejection("duplicate");
                    outcome.errors.push(format!(
                        "Neighbor with ID {} already exists for this country",
                        candidate
                    ));
                }
            }
        }

        tracing::info!(
            country_id = %source,
            added = outcome.added.len(),
            rejected = outcome.errors.len(),
            "Neighbor candidates processed"
        );
        Ok(outcome)
    }
}
