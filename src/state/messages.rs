use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use planner_api::{Catalog, PlannerRequest, PlannerResult};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadCatalog,
    CreatePlanner { request: PlannerRequest },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    CatalogLoaded { catalog: Catalog },
    CatalogFailed { message: String },
    PlannerCreated { result: PlannerResult },
    PlannerFailed { message: String, timed_out: bool },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
