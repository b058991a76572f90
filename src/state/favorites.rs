use crate::state::storage::{self, FAVORITES_KEY, KeyValueStore};
use log::{debug, error};
use planner_api::Favorite;

/// Favorite (league, team) pairs in insertion order, mirrored to storage on every change.
#[derive(Debug, Default, Clone)]
pub struct FavoritesSet {
    entries: Vec<Favorite>,
}

impl FavoritesSet {
    pub fn hydrate(store: &dyn KeyValueStore) -> Self {
        let entries: Vec<Favorite> = storage::load_json(store, FAVORITES_KEY).unwrap_or_default();
        debug!("loaded {} favorites", entries.len());
        Self { entries }
    }

    /// Append unless the same (league, team) names are already present.
    /// The whole set is written back either way. Returns whether it was added.
    pub fn add(&mut self, favorite: Favorite, store: &mut dyn KeyValueStore) -> bool {
        let added = !self.entries.iter().any(|f| f.same_pair(&favorite));
        if added {
            self.entries.push(favorite);
        }
        self.persist(store);
        added
    }

    pub fn clear(&mut self, store: &mut dyn KeyValueStore) {
        self.entries.clear();
        if let Err(e) = store.remove(FAVORITES_KEY) {
            error!("could not remove favorites: {e}");
        }
    }

    pub fn entries(&self) -> &[Favorite] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    fn persist(&self, store: &mut dyn KeyValueStore) {
        // save_json already logs the failure
        let _ = storage::save_json(store, FAVORITES_KEY, &self.entries);
    }
}
