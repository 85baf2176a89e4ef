//! Typed document collections and queries.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::store::snapshot::Snapshot;
use crate::store::Store;

/// A record that lives in one of the store's collections.
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name used in logs and metrics.
    const COLLECTION: &'static str;

    /// Store-generated identifier.
    fn id(&self) -> Uuid;

    /// The collection of `store` holding this document type.
    fn collection(store: &Store) -> &Collection<Self>;

    /// The list in `snapshot` holding this document type.
    fn snapshot_slot(snapshot: &mut Snapshot) -> &mut Vec<Self>;
}

#[derive(Debug, Clone)]
struct Entry<T> {
    seq: u64,
    doc: T,
}

/// A concurrent, id-keyed set of documents that remembers insertion order.
#[derive(Debug)]
pub struct Collection<T> {
    docs: DashMap<Uuid, Entry<T>>,
    next_seq: AtomicU64,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            docs: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }
}

type Predicate<'a, T> = Box<dyn Fn(&T) -> bool + Send + Sync + 'a>;
type Comparator<'a, T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync + 'a>;

/// Filter, sort and slice options for [`Collection::find`].
///
/// Ties under the sort comparator (or every document, without one) keep
/// insertion order, so results are deterministic.
pub struct Query<'a, T> {
    filter: Option<Predicate<'a, T>>,
    sort: Option<Comparator<'a, T>>,
    skip: usize,
    limit: Option<usize>,
}

impl<'a, T> Default for Query<'a, T> {
    fn default() -> Self {
        Self {
            filter: None,
            sort: None,
            skip: 0,
            limit: None,
        }
    }
}

impl<'a, T> Query<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, f: impl Fn(&T) -> bool + Send + Sync + 'a) -> Self {
        self.filter = Some(Box::new(f));
        self
    }

    pub fn sort(mut self, cmp: impl Fn(&T, &T) -> Ordering + Send + Sync + 'a) -> Self {
        self.sort = Some(Box::new(cmp));
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, doc: &T) -> bool {
        self.filter.as_ref().map_or(true, |f| f(doc))
    }
}

impl<T: Document> Collection<T> {
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.docs.get(id).map(|e| e.doc.clone())
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.docs.contains_key(id)
    }

    /// Identifiers of every document currently stored.
    pub fn ids(&self) -> HashSet<Uuid> {
        self.docs.iter().map(|e| *e.key()).collect()
    }

    /// Number of documents matching the query filter (skip/limit ignored).
    pub fn count(&self, query: &Query<'_, T>) -> usize {
        self.docs.iter().filter(|e| query.matches(&e.doc)).count()
    }

    /// First document, in insertion order, satisfying `predicate`.
    pub fn find_one(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.docs
            .iter()
            .filter(|e| predicate(&e.doc))
            .min_by_key(|e| e.seq)
            .map(|e| e.doc.clone())
    }

    /// Documents matching `query`, sorted, then sliced by skip/limit.
    pub fn find(&self, query: &Query<'_, T>) -> Vec<T> {
        let mut matched: Vec<(u64, T)> = self
            .docs
            .iter()
            .filter(|e| query.matches(&e.doc))
            .map(|e| (e.seq, e.doc.clone()))
            .collect();

        matched.sort_by(|(seq_a, a), (seq_b, b)| {
            let primary = query.sort.as_ref().map_or(Ordering::Equal, |cmp| cmp(a, b));
            primary.then(seq_a.cmp(seq_b))
        });

        let limit = query.limit.unwrap_or(usize::MAX);
        matched
            .into_iter()
            .skip(query.skip)
            .take(limit)
            .map(|(_, doc)| doc)
            .collect()
    }

    /// Every document in insertion order.
    pub fn all(&self) -> Vec<T> {
        self.find(&Query::new())
    }

    pub(crate) fn insert(&self, doc: T) {
        let seq = self.next_seq.fetch_add(1, AtomicOrdering::SeqCst);
        self.docs.insert(doc.id(), Entry { seq, doc });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Country;
    use chrono::Utc;

    fn country(name: &str, population: u32) -> Country {
        let now = Utc::now();
        Country {
            id: Uuid::new_v4(),
            name: Some(name.to_string()),
            population: Some(f64::from(population)),
            ..Country::empty(now)
        }
    }

    fn names(docs: &[Country]) -> Vec<&str> {
        docs.iter().map(|c| c.name.as_deref().unwrap_or("")).collect()
    }

    #[test]
    fn test_find_keeps_insertion_order_without_sort() {
        let collection = Collection::default();
        for name in ["Chad", "Angola", "Benin"] {
            collection.insert(country(name, 1));
        }
        assert_eq!(names(&collection.all()), vec!["Chad", "Angola", "Benin"]);
    }

    #[test]
    fn test_sort_ties_break_by_insertion_order() {
        let collection = Collection::default();
        collection.insert(country("First", 5));
        collection.insert(country("Big", 9));
        collection.insert(country("Second", 5));

        let query = Query::new().sort(|a: &Country, b: &Country| {
            b.population.partial_cmp(&a.population).unwrap_or(Ordering::Equal)
        });
        assert_eq!(names(&collection.find(&query)), vec!["Big", "First", "Second"]);
    }

    #[test]
    fn test_filter_count_skip_limit() {
        let collection = Collection::default();
        for i in 0..7 {
            collection.insert(country(&format!("C{}", i), i));
        }

        let even = || Query::new().filter(|c: &Country| c.population.unwrap_or(0.0) % 2.0 == 0.0);
        assert_eq!(collection.count(&even()), 4);

        let page = collection.find(&even().skip(1).limit(2));
        assert_eq!(names(&page), vec!["C2", "C4"]);

        assert!(collection.find(&even().skip(10)).is_empty());
    }

    #[test]
    fn test_find_one_and_lookup() {
        let collection = Collection::default();
        let target = country("Togo", 8);
        let id = target.id;
        collection.insert(target);

        assert!(collection.contains(&id));
        assert_eq!(
            collection.find_one(|c| c.name.as_deref() == Some("Togo")).map(|c| c.id),
            Some(id)
        );

        assert!(collection.find_one(|c| c.name.is_none()).is_none());
        assert!(collection.get(&Uuid::new_v4()).is_none());
        assert_eq!(collection.len(), 1);
    }
}
