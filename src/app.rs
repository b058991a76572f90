use crate::components::dropdown::DropdownState;
use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use crate::state::messages::NetworkResponse;
use crate::state::planner;
use crate::state::storage::KeyValueStore;
use log::{error, info, warn};
use planner_api::{Catalog, PlannerRequest, PlannerResult};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Survey,
    Planners,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
    store: Box<dyn KeyValueStore>,
}

impl App {
    pub fn new(settings: AppSettings, store: Box<dyn KeyValueStore>) -> Self {
        let state = AppState::hydrate(store.as_ref());
        Self { settings, state, store }
    }

    /// True when the catalog cache missed and one fetch is needed this session.
    pub fn needs_catalog(&self) -> bool {
        self.state.catalog.needs_fetch()
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    /// Apply a worker response. Spinner updates are owned by the UI loop and ignored here.
    pub fn on_network_response(&mut self, response: NetworkResponse) {
        match response {
            NetworkResponse::LoadingStateChanged { .. } => {}
            NetworkResponse::CatalogLoaded { catalog } => self.on_catalog_loaded(catalog),
            NetworkResponse::CatalogFailed { message } => self.on_catalog_failed(&message),
            NetworkResponse::PlannerCreated { result } => self.on_planner_created(result),
            NetworkResponse::PlannerFailed { message, timed_out } => {
                self.on_planner_failed(&message, timed_out)
            }
        }
    }

    pub fn on_catalog_loaded(&mut self, catalog: Catalog) {
        self.state.catalog.on_fetched(catalog, self.store.as_mut());
    }

    pub fn on_catalog_failed(&mut self, message: &str) {
        error!("Error fetching catalog: {message}");
        self.state.catalog.on_fetch_failed();
    }

    /// The planner exists: keep it if it has fixtures, then move to the planners tab.
    pub fn on_planner_created(&mut self, result: PlannerResult) {
        self.state.gate.finish();
        info!(
            "planner {:?} created with {} fixtures: {}",
            result.calendar_name,
            result.fixtures.len(),
            result.public_calendar_url
        );
        self.state.planners.record(result, self.store.as_mut());
        self.update_tab(MenuItem::Planners);
    }

    pub fn on_planner_failed(&mut self, message: &str, timed_out: bool) {
        error!("Error fetching plan: {message}");
        if timed_out {
            self.state.gate.time_out();
        } else {
            self.state.gate.finish();
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        self.state.dropdown = None;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Selectors
    // -----------------------------------------------------------------------

    pub fn focus_next_selector(&mut self) {
        let levels = self.state.cascade.visible_levels();
        if let Some(i) = levels.iter().position(|l| *l == self.state.focus)
            && let Some(next) = levels.get(i + 1)
        {
            self.state.focus = *next;
        }
    }

    pub fn focus_prev_selector(&mut self) {
        let levels = self.state.cascade.visible_levels();
        if let Some(i) = levels.iter().position(|l| *l == self.state.focus)
            && i > 0
        {
            self.state.focus = levels[i - 1];
        }
    }

    pub fn open_dropdown(&mut self) {
        self.state.clamp_focus();
        self.state.dropdown = Some(DropdownState::open(self.state.focus));
    }

    pub fn close_dropdown(&mut self) {
        self.state.dropdown = None;
    }

    pub fn dropdown_down(&mut self) {
        let Some(dropdown) = self.state.dropdown.as_mut() else {
            return;
        };
        let options = self.state.cascade.options_for(dropdown.level);
        dropdown.move_down(&options);
    }

    pub fn dropdown_up(&mut self) {
        if let Some(dropdown) = self.state.dropdown.as_mut() {
            dropdown.move_up();
        }
    }

    pub fn dropdown_input(&mut self, c: char) {
        if let Some(dropdown) = self.state.dropdown.as_mut() {
            dropdown.push_char(c);
        }
    }

    pub fn dropdown_backspace(&mut self) {
        if let Some(dropdown) = self.state.dropdown.as_mut() {
            dropdown.pop_char();
        }
    }

    /// Apply the highlighted option to its level and move focus to the next selector.
    pub fn dropdown_confirm(&mut self) {
        let Some(dropdown) = self.state.dropdown.take() else {
            return;
        };
        let options = self.state.cascade.options_for(dropdown.level);
        let Some(picked) = dropdown.pick(&options) else {
            return;
        };

        let catalog = self.state.catalog.get();
        self.state.cascade.select(dropdown.level, picked, catalog);
        self.state.focus = dropdown.level;
        self.focus_next_selector();
        self.state.clamp_focus();
    }

    // -----------------------------------------------------------------------
    // Favorites
    // -----------------------------------------------------------------------

    /// Add the current league/team pair. The cascade is cleared afterwards even
    /// when the pair was already a favorite. Returns false when nothing is selected.
    pub fn add_current_to_favorites(&mut self) -> bool {
        let Some(favorite) = self.state.cascade.current_favorite() else {
            return false;
        };
        self.remove_current_selection();
        if !self.state.favorites.add(favorite, self.store.as_mut()) {
            info!("favorite already present, skipped");
        }
        true
    }

    pub fn remove_current_selection(&mut self) {
        self.state.cascade.reset();
        self.state.dropdown = None;
        self.state.focus = Default::default();
    }

    pub fn delete_favorites(&mut self) -> bool {
        if self.state.favorites.is_empty() {
            return false;
        }
        self.state.favorites.clear(self.store.as_mut());
        self.remove_current_selection();
        true
    }

    // -----------------------------------------------------------------------
    // Planner submission
    // -----------------------------------------------------------------------

    pub fn submit_disabled(&self) -> bool {
        self.state
            .gate
            .submit_disabled(self.state.favorites.is_empty())
    }

    pub fn open_planner_dialog(&mut self) -> bool {
        if self.submit_disabled() {
            return false;
        }
        self.state.dropdown = None;
        self.state.dialog.open(self.settings.time_zone.clone());
        true
    }

    pub fn cancel_planner_dialog(&mut self) {
        self.state.dialog.close();
    }

    /// Confirm the dialog and enter `Submitting`. The caller sends the returned
    /// request; `None` means nothing may be sent.
    pub fn confirm_planner_dialog(&mut self) -> Option<PlannerRequest> {
        let name = self.state.dialog.confirm()?;
        if self.submit_disabled() || !self.state.gate.begin() {
            warn!("planner submission ignored while another is pending");
            return None;
        }
        Some(planner::build_request(
            self.state.favorites.entries(),
            Some(&name),
            self.settings.time_zone.as_deref(),
        ))
    }

    /// The request never reached the worker, so no response will release the gate.
    pub fn on_planner_not_sent(&mut self, message: &str) {
        error!("could not queue planner request: {message}");
        self.state.gate.finish();
    }

    pub fn planners_next(&mut self) {
        self.state.planners.select_next();
    }

    pub fn planners_prev(&mut self) {
        self.state.planners.select_prev();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::cascade::{Level, Mode};
    use crate::state::gate::SubmitGate;
    use crate::state::storage::{
        self, COUNTRIES_KEY, FAVORITES_KEY, LEAGUES_KEY, MemoryStore, PLANNERS_KEY,
    };
    use crate::state::messages::NetworkRequest;
    use crate::state::network::NetworkWorker;
    use crate::state::test_support::sample_catalog;
    use planner_api::client::PlannerApi;
    use planner_api::{Favorite, Fixture, FixtureInfo};
    use tokio::sync::mpsc;

    fn app_with(store: MemoryStore) -> App {
        let settings = AppSettings { time_zone: Some("Europe/Lisbon".into()), ..AppSettings::default() };
        App::new(settings, Box::new(store))
    }

    fn loaded_app() -> App {
        let mut app = app_with(MemoryStore::new());
        app.on_catalog_loaded(sample_catalog());
        app
    }

    /// Walk the selectors the way the key bindings do.
    fn choose(app: &mut App, level: Level, name: &str) {
        app.state.focus = level;
        app.open_dropdown();
        for c in name.chars().filter(|_| level.allows_search()) {
            app.dropdown_input(c);
        }
        if level == Level::Mode && name == "Countries" {
            app.dropdown_down();
        }
        app.dropdown_confirm();
    }

    fn select_liverpool(app: &mut App) {
        choose(app, Level::Mode, "Leagues");
        choose(app, Level::League, "Premier League");
        choose(app, Level::Team, "Liverpool");
    }

    #[test]
    fn startup_fetches_catalog_only_without_cache() {
        let app = app_with(MemoryStore::new());
        assert!(app.needs_catalog());

        let mut store = MemoryStore::new();
        storage::save_json(&mut store, LEAGUES_KEY, &sample_catalog().leagues).unwrap();
        storage::save_json(&mut store, COUNTRIES_KEY, &sample_catalog().countries).unwrap();
        assert!(!app_with(store).needs_catalog());
    }

    #[tokio::test]
    async fn countries_failure_after_leagues_caches_nothing() {
        let mut server = mockito::Server::new_async().await;
        let leagues_body = serde_json::to_string(&sample_catalog().leagues).unwrap();
        let leagues = server
            .mock("GET", "/leagues")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(leagues_body)
            .create_async()
            .await;
        let countries = server
            .mock("GET", "/countries")
            .with_status(500)
            .create_async()
            .await;

        let (request_tx, request_rx) = mpsc::channel(8);
        let (response_tx, mut response_rx) = mpsc::channel(64);
        let client = PlannerApi::new().with_base_url(server.url());
        tokio::spawn(NetworkWorker::new(client, request_rx, response_tx).run());
        request_tx.send(NetworkRequest::LoadCatalog).await.unwrap();

        let mut app = app_with(MemoryStore::new());
        assert!(app.needs_catalog());
        loop {
            match response_rx.recv().await.unwrap() {
                NetworkResponse::LoadingStateChanged { .. } => continue,
                response => {
                    assert!(matches!(response, NetworkResponse::CatalogFailed { .. }));
                    app.on_network_response(response);
                    break;
                }
            }
        }
        leagues.assert_async().await;
        countries.assert_async().await;

        assert!(app.store.get(LEAGUES_KEY).is_none());
        assert!(app.store.get(COUNTRIES_KEY).is_none());
        assert!(app.state.catalog.get().is_none());
        assert!(app.needs_catalog());
    }

    #[test]
    fn failed_catalog_keeps_selectors_empty() {
        let mut app = app_with(MemoryStore::new());
        app.on_catalog_failed("500 Internal Server Error");
        choose(&mut app, Level::Mode, "Leagues");
        assert_eq!(app.state.cascade.mode, Some(Mode::Leagues));
        assert!(app.state.cascade.league_options.is_empty());
        assert!(app.needs_catalog());
    }

    #[test]
    fn dropdown_confirm_advances_focus_down_the_cascade() {
        let mut app = loaded_app();
        choose(&mut app, Level::Mode, "Countries");
        assert_eq!(app.state.focus, Level::Country);
        choose(&mut app, Level::Country, "Portugal");
        assert_eq!(app.state.focus, Level::League);
        choose(&mut app, Level::League, "Primeira");
        assert_eq!(app.state.focus, Level::Team);
        assert_eq!(app.state.cascade.league_label(), "Primeira Liga");
        assert!(app.state.dropdown.is_none());
    }

    #[test]
    fn add_favorite_resets_cascade_and_persists() {
        let mut app = loaded_app();
        select_liverpool(&mut app);
        assert!(app.state.cascade.is_current_selection_visible());

        assert!(app.add_current_to_favorites());
        assert_eq!(app.state.favorites.len(), 1);
        assert_eq!(app.state.cascade.mode_label(), "Select Option");
        assert!(!app.state.cascade.is_current_selection_visible());
        assert_eq!(app.state.focus, Level::Mode);

        let stored: Vec<Favorite> = storage::load_json(app.store.as_ref(), FAVORITES_KEY).unwrap();
        assert_eq!(stored[0].team, "Liverpool");
    }

    #[test]
    fn duplicate_add_still_resets_cascade() {
        let mut app = loaded_app();
        select_liverpool(&mut app);
        app.add_current_to_favorites();
        select_liverpool(&mut app);

        assert!(app.add_current_to_favorites());
        assert_eq!(app.state.favorites.len(), 1);
        assert!(app.state.cascade.league.is_none());
    }

    #[test]
    fn add_requires_league_and_team() {
        let mut app = loaded_app();
        choose(&mut app, Level::Mode, "Leagues");
        choose(&mut app, Level::League, "FA Cup");
        assert!(!app.add_current_to_favorites());
        assert!(app.state.favorites.is_empty());
        assert_eq!(app.state.cascade.league_label(), "FA Cup");
    }

    #[test]
    fn delete_favorites_only_when_present() {
        let mut app = loaded_app();
        assert!(!app.delete_favorites());

        select_liverpool(&mut app);
        app.add_current_to_favorites();
        assert!(app.delete_favorites());
        assert!(app.state.favorites.is_empty());
        assert!(app.store.get(FAVORITES_KEY).is_none());
    }

    #[test]
    fn planner_dialog_needs_favorites() {
        let mut app = loaded_app();
        assert!(app.submit_disabled());
        assert!(!app.open_planner_dialog());
        assert!(!app.state.dialog.is_open);
    }

    #[test]
    fn confirm_builds_request_and_blocks_second_submission() {
        let mut app = loaded_app();
        select_liverpool(&mut app);
        app.add_current_to_favorites();

        assert!(app.open_planner_dialog());
        assert_eq!(app.state.dialog.time_zone.as_deref(), Some("Europe/Lisbon"));
        for c in "Reds".chars() {
            app.state.dialog.push_char(c);
        }
        let request = app.confirm_planner_dialog().unwrap();
        assert_eq!(request.entries, vec![(39, 40)]);
        assert_eq!(request.name.as_deref(), Some("Reds"));
        assert_eq!(request.time_zone.as_deref(), Some("Europe/Lisbon"));
        assert!(app.state.gate.is_submitting());
        assert!(app.submit_disabled());

        assert!(!app.open_planner_dialog());
        app.state.dialog.open(None);
        assert!(app.confirm_planner_dialog().is_none());
    }

    #[tokio::test]
    async fn closed_worker_channel_releases_the_gate() {
        let mut app = loaded_app();
        select_liverpool(&mut app);
        app.add_current_to_favorites();
        app.open_planner_dialog();
        let request = app.confirm_planner_dialog().unwrap();
        assert!(app.submit_disabled());

        let (request_tx, request_rx) = mpsc::channel::<NetworkRequest>(1);
        drop(request_rx);
        let err = request_tx
            .send(NetworkRequest::CreatePlanner { request })
            .await
            .unwrap_err();

        app.on_planner_not_sent(&err.to_string());
        assert_eq!(app.state.gate, SubmitGate::Idle);
        assert!(!app.submit_disabled());
    }

    #[test]
    fn failure_returns_gate_to_idle_or_timed_out() {
        let mut app = loaded_app();
        select_liverpool(&mut app);
        app.add_current_to_favorites();

        app.state.gate.begin();
        app.on_planner_failed("status 502", false);
        assert_eq!(app.state.gate, SubmitGate::Idle);
        assert!(!app.submit_disabled());
        assert_eq!(app.state.active_tab, MenuItem::Survey);

        app.state.gate.begin();
        app.on_planner_failed("timed out", true);
        assert_eq!(app.state.gate, SubmitGate::TimedOut);
        assert!(!app.submit_disabled());
    }

    #[test]
    fn created_planner_is_stored_and_shown() {
        let mut app = loaded_app();
        app.state.gate.begin();
        app.on_planner_created(PlannerResult {
            public_calendar_url: "https://calendar.example/x".into(),
            calendar_name: "Reds".into(),
            fixtures: vec![Fixture {
                fixture: FixtureInfo { id: 7, ..Default::default() },
                ..Default::default()
            }],
        });

        assert_eq!(app.state.gate, SubmitGate::Idle);
        assert_eq!(app.state.active_tab, MenuItem::Planners);
        let stored: Vec<PlannerResult> = storage::load_json(app.store.as_ref(), PLANNERS_KEY).unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[test]
    fn empty_planner_is_not_stored() {
        let mut app = loaded_app();
        app.state.gate.begin();
        app.on_planner_created(PlannerResult::default());
        assert!(app.store.get(PLANNERS_KEY).is_none());
        assert!(app.state.planners.results.is_empty());
    }

    #[test]
    fn help_returns_to_previous_tab() {
        let mut app = loaded_app();
        app.update_tab(MenuItem::Planners);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Planners);
    }
}
