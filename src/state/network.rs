use crate::state::messages::{NetworkRequest, NetworkResponse};
use log::{debug, error, info};
use planner_api::PlannerRequest;
use planner_api::client::PlannerApi;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Runs requests one at a time, in the order they were sent.
pub struct NetworkWorker {
    client: PlannerApi,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        client: PlannerApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let response = match request {
                NetworkRequest::LoadCatalog => self.handle_load_catalog().await,
                NetworkRequest::CreatePlanner { request } => {
                    self.handle_create_planner(request).await
                }
            };

            debug!("network request complete");
            let is_ok = matches!(
                response,
                NetworkResponse::CatalogLoaded { .. } | NetworkResponse::PlannerCreated { .. }
            );
            self.stop_loading_animation(is_ok).await;

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_catalog(&self) -> NetworkResponse {
        debug!("fetching catalog from {}", self.client.base_url());
        match self.client.fetch_catalog().await {
            Ok(catalog) => {
                info!(
                    "catalog loaded: {} leagues, {} countries",
                    catalog.leagues.len(),
                    catalog.countries.len()
                );
                NetworkResponse::CatalogLoaded { catalog }
            }
            Err(e) => NetworkResponse::CatalogFailed { message: e.to_string() },
        }
    }

    async fn handle_create_planner(&self, request: PlannerRequest) -> NetworkResponse {
        debug!("requesting planner for {} favorites", request.entries.len());
        match self.client.fetch_plan(&request).await {
            Ok(result) => NetworkResponse::PlannerCreated { result },
            Err(e) => NetworkResponse::PlannerFailed {
                timed_out: e.is_timeout(),
                message: e.to_string(),
            },
        }
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(80));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
