use crate::app::MenuItem;
use crate::components::dropdown::DropdownState;
use crate::components::name_dialog::NameDialog;
use crate::state::cascade::{Level, SelectionCascade};
use crate::state::catalog::CatalogStore;
use crate::state::favorites::FavoritesSet;
use crate::state::gate::SubmitGate;
use crate::state::planner::PlannerHistory;
use crate::state::storage::KeyValueStore;

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub catalog: CatalogStore,
    pub cascade: SelectionCascade,
    pub favorites: FavoritesSet,
    pub planners: PlannerHistory,
    pub gate: SubmitGate,
    /// Selector that receives Enter on the survey tab.
    pub focus: Level,
    /// The expanded selector, if any. At most one is open.
    pub dropdown: Option<DropdownState>,
    pub dialog: NameDialog,
}

impl AppState {
    /// Restore everything that survives a restart: catalog cache, favorites and planners.
    pub fn hydrate(store: &dyn KeyValueStore) -> Self {
        Self {
            catalog: CatalogStore::from_cache(store),
            favorites: FavoritesSet::hydrate(store),
            planners: PlannerHistory::hydrate(store),
            ..Self::default()
        }
    }

    /// Keep focus on a selector that is still shown after the cascade changed.
    pub fn clamp_focus(&mut self) {
        let levels = self.cascade.visible_levels();
        if !levels.contains(&self.focus) {
            self.focus = levels.last().copied().unwrap_or(Level::Mode);
        }
    }
}
