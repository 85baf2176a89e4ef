//! Listing, lookup and insertion of countries.

use chrono::Utc;

use crate::catalog::{parse_id, CatalogError, CountryCatalog, Page, PageRequest, SortKey};
use crate::models::{Country, NewCountry};
use crate::store::Query;

impl CountryCatalog {
    /// One page of countries, optionally narrowed by a search term.
    pub fn list_page(&self, request: &PageRequest) -> Result<Page<Country>, CatalogError> {
        let needle = request
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let query = || {
            let needle = needle.clone();
            Query::new()
                .filter(move |c: &Country| needle.as_deref().map_or(true, |n| matches_search(c, n)))
                .sort(move |a: &Country, b: &Country| request.sort.compare(a, b))
        };

        let countries = self.store.countries();
        let total = countries.count(&query()) as u64;
        let list = countries.find(
            &query()
                .skip(usize::try_from(request.skip()).unwrap_or(usize::MAX))
                .limit(usize::try_from(request.limit).unwrap_or(usize::MAX)),
        );

        tracing::debug!(
            page = request.page,
            limit = request.limit,
            sort = request.sort.as_str(),
            total,
            returned = list.len(),
            "Listed countries"
        );
        Ok(Page::new(list, request, total))
    }

    /// Every country, sorted.
    pub fn list_sorted(&self, sort: SortKey) -> Result<Vec<Country>, CatalogError> {
        let query = Query::new().sort(move |a: &Country, b: &Country| sort.compare(a, b));
        Ok(self.store.countries().find(&query))
    }

    /// A single country by identifier.
    pub fn get(&self, id: &str) -> Result<Country, CatalogError> {
        parse_id(id)
            .and_then(|id| self.store.countries().get(&id))
            .ok_or(CatalogError::NotFound)
    }

    /// Validate and insert every payload, or none.
    pub fn add_countries(&self, payloads: Vec<NewCountry>) -> Result<Vec<Country>, CatalogError> {
        for (index, payload) in payloads.iter().enumerate() {
            payload
                .validate()
                .map_err(|reason| CatalogError::InvalidPayload { index, reason })?;
        }

        let now = Utc::now();
        let countries: Vec<Country> = payloads.into_iter().map(|p| p.into_country(now)).collect();
        let saved = self.store.insert_many(countries)?;

        tracing::info!(count = saved.len(), "Countries added");
        Ok(saved)
    }
}

/// `needle` must already be lowercase.
fn matches_search(country: &Country, needle: &str) -> bool {
    [&country.name, &country.region, &country.subregion]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;
    use std::sync::Arc;

    fn catalog() -> CountryCatalog {
        CountryCatalog::new(Arc::new(Store::in_memory()))
    }

    fn new_country(name: &str, region: &str, subregion: &str, population: f64, area: f64) -> NewCountry {
        NewCountry {
            name: Some(name.into()),
            region: Some(region.into()),
            subregion: Some(subregion.into()),
            population: Some(population),
            area: Some(area),
            ..NewCountry::default()
        }
    }

    fn seeded() -> CountryCatalog {
        let catalog = catalog();
        catalog
            .add_countries(vec![
                new_country("France", "Europe", "Western Europe", 67_000_000.0, 551_695.0),
                new_country("Brazil", "Americas", "South America", 212_000_000.0, 8_515_767.0),
                new_country("Japan", "Asia", "Eastern Asia", 125_000_000.0, 377_930.0),
                new_country("Egypt", "Africa", "Northern Africa", 102_000_000.0, 1_002_450.0),
                new_country("Germany", "Europe", "Western Europe", 83_000_000.0, 357_114.0),
            ])
            .unwrap();
        catalog
    }

    fn names(list: &[Country]) -> Vec<&str> {
        list.iter().filter_map(|c| c.name.as_deref()).collect()
    }

    #[test]
    fn test_page_sorted_by_population() {
        let catalog = seeded();
        let page = catalog
            .list_page(&PageRequest {
                page: 1,
                limit: 2,
                sort: SortKey::PopulationHighToLow,
                search: None,
            })
            .unwrap();

        assert_eq!(names(&page.list), vec!["Brazil", "Japan"]);
        assert_eq!(page.total, 5);
        assert_eq!(page.pages, 3);
        assert!(page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn test_search_is_case_insensitive_over_three_fields() {
        let catalog = seeded();
        let search = |term: &str| {
            catalog
                .list_page(&PageRequest {
                    search: Some(term.into()),
                    ..PageRequest::default()
                })
                .unwrap()
        };

        assert_eq!(names(&search("EUROPE").list), vec!["France", "Germany"]);
        assert_eq!(names(&search("northern").list), vec!["Egypt"]);
        assert_eq!(names(&search("pan").list), vec!["Japan"]);
        assert_eq!(search("atlantis").total, 0);
        assert_eq!(search("").total, 5);
    }

    #[test]
    fn test_search_treats_term_literally() {
        let catalog = seeded();
        let page = catalog
            .list_page(&PageRequest {
                search: Some(".*".into()),
                ..PageRequest::default()
            })
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_list_sorted_by_area() {
        let catalog = seeded();
        let list = catalog.list_sorted(SortKey::AreaLowToHigh).unwrap();
        assert_eq!(names(&list), vec!["Germany", "Japan", "France", "Egypt", "Brazil"]);

        let list = catalog.list_sorted(SortKey::ZToA).unwrap();
        assert_eq!(names(&list), vec!["Japan", "Germany", "France", "Egypt", "Brazil"]);
    }

    #[test]
    fn test_get_handles_unknown_and_malformed_ids() {
        let catalog = seeded();
        let first = catalog.list_sorted(SortKey::AToZ).unwrap().remove(0);

        assert_eq!(catalog.get(&first.id.to_string()).unwrap(), first);
        assert!(matches!(
            catalog.get(&uuid::Uuid::new_v4().to_string()),
            Err(CatalogError::NotFound)
        ));
        assert!(matches!(catalog.get("not-an-id"), Err(CatalogError::NotFound)));
    }

    #[test]
    fn test_invalid_payload_aborts_whole_batch() {
        let catalog = catalog();
        let mut bad = new_country("Atlantis", "Ocean", "Deep", 0.0, 1.0);
        bad.cca3 = Some("ATLANTIS".into());

        let result = catalog.add_countries(vec![
            new_country("Chile", "Americas", "South America", 19_000_000.0, 756_102.0),
            bad,
        ]);

        assert!(matches!(result, Err(CatalogError::InvalidPayload { index: 1, .. })));
        assert!(catalog.store().countries().is_empty());
    }
}
