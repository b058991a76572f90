use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    if let (Char('c'), KeyModifiers::CONTROL) = (key_event.code, key_event.modifiers) {
        crate::cleanup_terminal();
        std::process::exit(0);
    }

    // The name dialog captures every key while open.
    if guard.state.dialog.is_open {
        match key_event.code {
            KeyCode::Esc => guard.cancel_planner_dialog(),
            KeyCode::Enter => {
                if let Some(request) = guard.confirm_planner_dialog() {
                    drop(guard);
                    if let Err(e) = network_requests
                        .send(NetworkRequest::CreatePlanner { request })
                        .await
                    {
                        app.lock().await.on_planner_not_sent(&e.to_string());
                    }
                }
            }
            KeyCode::Backspace => guard.state.dialog.pop_char(),
            Char(c) => guard.state.dialog.push_char(c),
            _ => {}
        }
        return;
    }

    // So does an expanded selector.
    if let Some(dropdown) = guard.state.dropdown.as_ref() {
        let searchable = dropdown.allows_search();
        match key_event.code {
            KeyCode::Esc => guard.close_dropdown(),
            KeyCode::Enter => guard.dropdown_confirm(),
            KeyCode::Down => guard.dropdown_down(),
            KeyCode::Up => guard.dropdown_up(),
            KeyCode::Backspace => guard.dropdown_backspace(),
            Char(c) if searchable => guard.dropdown_input(c),
            Char('j') => guard.dropdown_down(),
            Char('k') => guard.dropdown_up(),
            _ => {}
        }
        return;
    }

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Survey),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Planners),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Survey: selectors
        (MenuItem::Survey, Char('j') | KeyCode::Down | KeyCode::Tab, _) => {
            guard.focus_next_selector()
        }
        (MenuItem::Survey, Char('k') | KeyCode::Up | KeyCode::BackTab, _) => {
            guard.focus_prev_selector()
        }
        (MenuItem::Survey, KeyCode::Enter, _) => guard.open_dropdown(),

        // Survey: favorites and planner
        (MenuItem::Survey, Char('a'), _) => {
            guard.add_current_to_favorites();
        }
        (MenuItem::Survey, Char('x'), _) => guard.remove_current_selection(),
        (MenuItem::Survey, Char('D'), _) => {
            guard.delete_favorites();
        }
        (MenuItem::Survey, Char('p'), _) => {
            guard.open_planner_dialog();
        }

        // Planners
        (MenuItem::Planners, Char('j') | KeyCode::Down, _) => guard.planners_next(),
        (MenuItem::Planners, Char('k') | KeyCode::Up, _) => guard.planners_prev(),
        (MenuItem::Planners, KeyCode::Esc, _) => guard.update_tab(MenuItem::Survey),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
