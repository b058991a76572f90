use crate::state::storage::{self, COUNTRIES_KEY, KeyValueStore, LEAGUES_KEY};
use log::{debug, error};
use planner_api::{Catalog, Country, League};

/// Session copy of the reference data, cache-aside over durable storage.
#[derive(Debug, Default)]
pub struct CatalogStore {
    pub catalog: Option<Catalog>,
}

impl CatalogStore {
    /// Hydrate from storage. Both collections must be present and parse, otherwise
    /// the cache is treated as missing and the catalog must be fetched.
    pub fn from_cache(store: &dyn KeyValueStore) -> Self {
        let leagues: Option<Vec<League>> = storage::load_json(store, LEAGUES_KEY);
        let countries: Option<Vec<Country>> = storage::load_json(store, COUNTRIES_KEY);
        let catalog = match (leagues, countries) {
            (Some(leagues), Some(countries)) => {
                debug!(
                    "catalog cache hit: {} leagues, {} countries",
                    leagues.len(),
                    countries.len()
                );
                Some(Catalog { countries, leagues })
            }
            _ => None,
        };
        Self { catalog }
    }

    pub fn needs_fetch(&self) -> bool {
        self.catalog.is_none()
    }

    /// Store a fully fetched catalog and write both collections back to storage.
    pub fn on_fetched(&mut self, catalog: Catalog, store: &mut dyn KeyValueStore) {
        if let Err(e) = storage::save_json(store, LEAGUES_KEY, &catalog.leagues)
            .and_then(|_| storage::save_json(store, COUNTRIES_KEY, &catalog.countries))
        {
            error!("could not cache catalog: {e}");
        }
        self.catalog = Some(catalog);
    }

    /// A failed fetch leaves no catalog at all; selectors fall back to empty lists.
    pub fn on_fetch_failed(&mut self) {
        self.catalog = None;
    }

    pub fn get(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    /// Forget the cached collections so the next start refetches them.
    pub fn clear_cache(store: &mut dyn KeyValueStore) {
        for key in [LEAGUES_KEY, COUNTRIES_KEY] {
            if let Err(e) = store.remove(key) {
                error!("could not remove {key}: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::storage::MemoryStore;
    use crate::state::test_support::sample_catalog;

    #[test]
    fn cache_requires_both_collections() {
        let mut store = MemoryStore::new();
        storage::save_json(&mut store, LEAGUES_KEY, &sample_catalog().leagues).unwrap();
        assert!(CatalogStore::from_cache(&store).needs_fetch());

        storage::save_json(&mut store, COUNTRIES_KEY, &sample_catalog().countries).unwrap();
        let cached = CatalogStore::from_cache(&store);
        assert!(!cached.needs_fetch());
        assert_eq!(cached.get(), Some(&sample_catalog()));
    }

    #[test]
    fn malformed_cache_triggers_fetch() {
        let mut store = MemoryStore::new();
        store.set(LEAGUES_KEY, "[").unwrap();
        storage::save_json(&mut store, COUNTRIES_KEY, &sample_catalog().countries).unwrap();
        assert!(CatalogStore::from_cache(&store).needs_fetch());
    }

    #[test]
    fn fetched_catalog_is_written_back() {
        let mut store = MemoryStore::new();
        let mut catalogs = CatalogStore::default();
        catalogs.on_fetched(sample_catalog(), &mut store);

        assert!(store.get(LEAGUES_KEY).is_some());
        assert!(store.get(COUNTRIES_KEY).is_some());
        assert_eq!(CatalogStore::from_cache(&store).get(), Some(&sample_catalog()));
    }

    #[test]
    fn half_written_cache_is_a_miss_and_failure_writes_nothing() {
        let mut store = MemoryStore::new();
        storage::save_json(&mut store, LEAGUES_KEY, &sample_catalog().leagues).unwrap();

        let mut catalogs = CatalogStore::from_cache(&store);
        assert!(catalogs.needs_fetch());

        catalogs.on_fetch_failed();
        assert!(catalogs.get().is_none());
        assert!(store.get(COUNTRIES_KEY).is_none());
    }

    #[test]
    fn clear_cache_removes_both_keys() {
        let mut store = MemoryStore::new();
        CatalogStore::default().on_fetched(sample_catalog(), &mut store);
        CatalogStore::clear_cache(&mut store);
        assert!(CatalogStore::from_cache(&store).needs_fetch());
    }
}
