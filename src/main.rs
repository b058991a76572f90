mod app;
mod components;
mod draw;
mod keys;
mod state;
mod ui;

use crate::app::App;
use crate::state::app_settings::AppSettings;
use crate::state::catalog::CatalogStore;
use crate::state::messages::{NetworkRequest, NetworkResponse, UiEvent};
use crate::state::network::{LoadingState, NetworkWorker};
use crate::state::storage::JsonFileStore;
use anyhow::Context;
use crossterm::event::{self as crossterm_event, Event};
use crossterm::{cursor, execute, terminal};
use log::{error, info};
use planner_api::client::PlannerApi;
use std::io::Stdout;
use std::sync::Arc;
use std::{io, panic};
use tokio::sync::{Mutex, mpsc};
use tui::{Terminal, backend::CrosstermBackend};

#[derive(Debug, Default, PartialEq)]
struct CliOptions {
    reset_cache: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(options) = handle_cli_args(std::env::args().skip(1))? else {
        return Ok(());
    };

    better_panic::install();

    let settings = AppSettings::load();
    let mut store = JsonFileStore::open(&settings.data_dir)
        .with_context(|| format!("opening data directory {}", settings.data_dir.display()))?;
    if options.reset_cache {
        CatalogStore::clear_cache(&mut store);
    }

    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal().context("setting up terminal")?;

    let level = settings.log_level.unwrap_or(log::LevelFilter::Info);
    tui_logger::init_logger(level)?;
    tui_logger::set_default_level(level);
    info!(
        "using {} with data in {}",
        settings.api_base_url,
        store.dir().display()
    );

    let client = PlannerApi::new()
        .with_base_url(settings.api_base_url.clone())
        .with_timeout(settings.request_timeout);

    let app = Arc::new(Mutex::new(App::new(settings, Box::new(store))));

    let (ui_event_tx, ui_event_rx) = mpsc::channel::<UiEvent>(100);
    let (network_req_tx, network_req_rx) = mpsc::channel::<NetworkRequest>(100);
    let (network_resp_tx, network_resp_rx) = mpsc::channel::<NetworkResponse>(100);

    // Input handler thread
    let input_handler = tokio::spawn(input_handler_task(ui_event_tx.clone()));

    // Network thread
    let network_worker = NetworkWorker::new(client, network_req_rx, network_resp_tx);
    let network_task = tokio::spawn(network_worker.run());

    // Loads the catalog on startup if the cache missed
    let _ = ui_event_tx.send(UiEvent::AppStarted).await;

    main_ui_loop(terminal, app, ui_event_rx, network_req_tx, network_resp_rx).await;

    input_handler.abort();
    network_task.abort();

    Ok(())
}

/// `Ok(None)` means the invocation was fully handled and the UI should not start.
fn handle_cli_args(args: impl Iterator<Item = String>) -> anyhow::Result<Option<CliOptions>> {
    let mut options = CliOptions::default();
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", usage_text());
                return Ok(None);
            }
            "-V" | "--version" => {
                println!("fxplanner {}", env!("CARGO_PKG_VERSION"));
                return Ok(None);
            }
            "--reset-cache" => options.reset_cache = true,
            _ => anyhow::bail!("unknown argument: {arg}\n\n{}", usage_text()),
        }
    }
    Ok(Some(options))
}

fn usage_text() -> &'static str {
    "fxplanner - build a fixture calendar from your favorite teams

Usage:
  fxplanner [--reset-cache]
  fxplanner --help
  fxplanner --version

Options:
  --reset-cache            Drop the cached league and country catalog before starting

Environment:
  FXPLANNER_API_URL        Planner service base URL (default http://localhost:3001)
  FXPLANNER_DATA_DIR       Where favorites, planners and the catalog are stored
  FXPLANNER_TIMEZONE       Time zone sent with planner requests (then TZ, then the system zone)
  FXPLANNER_TIMEOUT_SECS   Request timeout in seconds (default 30)
  FXPLANNER_LOG            Log level: error, warn, info, debug, trace"
}

async fn main_ui_loop(
    mut terminal: Terminal<CrosstermBackend<Stdout>>,
    app: Arc<Mutex<App>>,
    mut ui_events: mpsc::Receiver<UiEvent>,
    network_requests: mpsc::Sender<NetworkRequest>,
    mut network_responses: mpsc::Receiver<NetworkResponse>,
) {
    let mut loading = LoadingState::default();

    loop {
        tokio::select! {
            Some(ui_event) = ui_events.recv() => {
                let should_redraw = handle_ui_event(ui_event, &app, &network_requests).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            Some(response) = network_responses.recv() => {
                let should_redraw = handle_network_response(response, &app, &mut loading).await;
                if should_redraw {
                    let mut app_guard = app.lock().await;
                    draw::draw(&mut terminal, &mut app_guard, loading);
                }
            }

            else => break,
        }
    }
}

async fn handle_ui_event(
    ui_event: UiEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> bool {
    match ui_event {
        UiEvent::AppStarted => {
            let needs_catalog = app.lock().await.needs_catalog();
            if needs_catalog {
                let _ = network_requests.send(NetworkRequest::LoadCatalog).await;
            }
            true
        }
        UiEvent::KeyPressed(key_event) => {
            keys::handle_key_bindings(key_event, app, network_requests).await;
            true
        }
        UiEvent::Resize => true,
    }
}

async fn handle_network_response(
    response: NetworkResponse,
    app: &Arc<Mutex<App>>,
    loading: &mut LoadingState,
) -> bool {
    match response {
        NetworkResponse::LoadingStateChanged { loading_state } => *loading = loading_state,
        response => app.lock().await.on_network_response(response),
    }
    true
}

async fn input_handler_task(ui_events: mpsc::Sender<UiEvent>) {
    loop {
        match crossterm_event::read() {
            Ok(event) => {
                let ui_event = match event {
                    Event::Key(key_event) => Some(UiEvent::KeyPressed(key_event)),
                    Event::Resize(_, _) => Some(UiEvent::Resize),
                    _ => None,
                };

                if let Some(ui_event) = ui_event
                    && ui_events.send(ui_event).await.is_err()
                {
                    break;
                }
            }
            Err(e) => error!("reading terminal input: {e}"),
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, cursor::Hide)?;
    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
    terminal::enable_raw_mode()
}

pub fn cleanup_terminal() {
    let mut stdout = io::stdout();
    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));
    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);
    let _ = terminal::disable_raw_mode();
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}
