use crate::state::storage::{self, KeyValueStore, PLANNERS_KEY};
use log::{debug, info};
use planner_api::{Favorite, PlannerRequest, PlannerResult};

/// Build the planner query from the current favorites plus the user's name and time zone.
pub fn build_request(
    favorites: &[Favorite],
    name: Option<&str>,
    time_zone: Option<&str>,
) -> PlannerRequest {
    PlannerRequest::new(favorites, name, time_zone)
}

/// Planners created so far, oldest first. Entries are only ever appended.
#[derive(Debug, Default)]
pub struct PlannerHistory {
    pub results: Vec<PlannerResult>,
    /// Highlighted row on the planners tab.
    pub selected: usize,
}

impl PlannerHistory {
    pub fn hydrate(store: &dyn KeyValueStore) -> Self {
        let results: Vec<PlannerResult> =
            storage::load_json(store, PLANNERS_KEY).unwrap_or_default();
        debug!("loaded {} stored planners", results.len());
        Self { results, selected: 0 }
    }

    /// Append a result that has fixtures. The stored list is re-read, extended
    /// and written back whole. Returns whether the result was kept.
    pub fn record(&mut self, result: PlannerResult, store: &mut dyn KeyValueStore) -> bool {
        if result.fixtures.is_empty() {
            info!("planner {:?} has no fixtures, not storing it", result.calendar_name);
            return false;
        }

        let mut stored: Vec<PlannerResult> =
            storage::load_json(store, PLANNERS_KEY).unwrap_or_default();
        stored.push(result);
        let _ = storage::save_json(store, PLANNERS_KEY, &stored);

        self.results = stored;
        self.selected = self.results.len() - 1;
        true
    }

    pub fn selected_result(&self) -> Option<&PlannerResult> {
        self.results.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}
