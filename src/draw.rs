use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::dropdown::Dropdown;
use crate::components::name_dialog::NameDialogView;
use crate::state::gate::SubmitGate;
use crate::state::network::{ERROR_CHAR, LoadingState};
use crate::ui::layout::{LayoutAreas, SurveyAreas, centered};
use planner_api::{Fixture, PlannerResult};

static TABS: &[&str; 2] = &["Survey", "Planners"];

const HELP_TEXT: &str = "\
Survey tab
  j/k, Tab       move between selectors
  Enter          open the focused selector, Enter again to pick
  type           filter league, country and team lists
  a              add the current league and team to favorites
  x              clear the current selection
  D              delete all favorites
  p              create a planner from the favorites

Planners tab
  j/k            browse stored planners

Global
  1/2            switch tab     ?  help     f  full screen
  \"              toggle logs    q  quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let _ = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Survey => draw_survey(f, layout.main, app),
            MenuItem::Planners => draw_planners(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        let full = f.area();
        if app.state.dialog.is_open {
            let area = centered(full, 50, 6);
            f.render_widget(NameDialogView { dialog: &app.state.dialog }, area);
        }

        draw_loading_spinner(f, full, app, loading);
    });
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Survey => 0,
        MenuItem::Planners => 1,
        MenuItem::Help => 0,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

// ---------------------------------------------------------------------------
// Survey tab
// ---------------------------------------------------------------------------

fn draw_survey(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::White).title(" Select your favorite teams and leagues ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let cascade = &app.state.cascade;
    let areas = SurveyAreas::new(inner, cascade.is_current_selection_visible());
    let levels = cascade.visible_levels();

    for (i, level) in levels.iter().enumerate() {
        let label = cascade.label(*level);
        let options = cascade.options_for(*level);
        f.render_widget(
            Dropdown {
                label: &label,
                options: &options,
                state: None,
                focused: *level == app.state.focus,
            },
            areas.selector(i),
        );
    }

    if app.state.catalog.get().is_none() {
        let row = areas.selector(levels.len());
        f.render_widget(
            Paragraph::new("No catalog data").style(Style::default().fg(Color::DarkGray)),
            row,
        );
    }

    draw_current_selection(f, areas.current, app);
    draw_favorites(f, areas.favorites, app);
    draw_actions(f, areas.actions, app);

    // Expanded selector last so it overlays the rows below it.
    if let Some(dropdown) = app.state.dropdown.as_ref()
        && let Some(index) = levels.iter().position(|l| *l == dropdown.level)
    {
        let label = cascade.label(dropdown.level);
        let options = cascade.options_for(dropdown.level);
        let popup = areas.expanded(index);
        f.render_widget(Clear, popup);
        f.render_widget(
            Dropdown { label: &label, options: &options, state: Some(dropdown), focused: true },
            popup,
        );
    }
}

fn draw_current_selection(f: &mut Frame, area: Rect, app: &App) {
    if area.height == 0 {
        return;
    }
    let cascade = &app.state.cascade;
    let block = default_border(Color::Cyan).title(" Current Selection ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let league = cascade.league.as_ref().map(|l| l.name.as_str()).unwrap_or("-");
    let team = cascade.team.as_ref().map(|t| t.name.as_str()).unwrap_or("-");
    let lines = vec![
        Line::from(vec![
            Span::styled("League ", Style::default().fg(Color::DarkGray)),
            Span::raw(league),
        ]),
        Line::from(vec![
            Span::styled("Team   ", Style::default().fg(Color::DarkGray)),
            Span::raw(team),
        ]),
    ];
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_favorites(f: &mut Frame, area: Rect, app: &App) {
    let favorites = &app.state.favorites;
    let block = default_border(Color::White).title(format!(" Current Favorites ({}) ", favorites.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if favorites.is_empty() {
        f.render_widget(
            Paragraph::new("No favorites yet. Pick a league and team, then press a.")
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true }),
            inner,
        );
        return;
    }

    let lines: Vec<Line> = favorites
        .entries()
        .iter()
        .map(|fav| {
            Line::from(vec![
                Span::styled(fav.league.clone(), Style::default().fg(Color::Cyan)),
                Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
                Span::raw(fav.team.clone()),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_actions(f: &mut Frame, area: Rect, app: &App) {
    let block = default_border(Color::DarkGray);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let enabled = Style::default().fg(Color::Green);
    let disabled = Style::default().fg(Color::DarkGray);
    let button = |label: &'static str, on: bool| {
        Span::styled(label, if on { enabled } else { disabled })
    };

    let buttons = Line::from(vec![
        button("[a] Add to favorites", app.state.cascade.can_add_favorite()),
        Span::raw("  "),
        button("[D] Delete favorites", !app.state.favorites.is_empty()),
        Span::raw("  "),
        button("[p] Create planner", !app.submit_disabled()),
    ]);

    let status = match app.state.gate {
        SubmitGate::TimedOut => Line::styled(
            app.state.gate.status_line().unwrap_or_default(),
            Style::default().fg(Color::Red),
        ),
        _ => Line::styled(
            app.state.gate.status_line().unwrap_or_default(),
            Style::default().fg(Color::Yellow),
        ),
    };

    f.render_widget(Paragraph::new(vec![buttons, status]), inner);
}

// ---------------------------------------------------------------------------
// Planners tab
// ---------------------------------------------------------------------------

fn draw_planners(f: &mut Frame, area: Rect, app: &App) {
    let planners = &app.state.planners;
    let block = default_border(Color::White).title(" Planners ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if planners.results.is_empty() {
        f.render_widget(
            Paragraph::new("No planners yet. Add favorites on the Survey tab and press p.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return;
    }

    let [list_area, detail_area] =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(inner);

    let lines: Vec<Line> = planners
        .results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let style = if i == planners.selected {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            Line::styled(planner_title(result), style)
        })
        .collect();
    f.render_widget(
        Paragraph::new(lines).block(default_border(Color::DarkGray)),
        list_area,
    );

    if let Some(result) = planners.selected_result() {
        draw_planner_detail(f, detail_area, result);
    }
}

fn planner_title(result: &PlannerResult) -> String {
    let name = if result.calendar_name.is_empty() {
        "(unnamed)"
    } else {
        result.calendar_name.as_str()
    };
    format!("{name} · {} fixtures", result.fixtures.len())
}

fn draw_planner_detail(f: &mut Frame, area: Rect, result: &PlannerResult) {
    let block = default_border(Color::DarkGray).title(format!(" {} ", result.calendar_name));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Calendar ", Style::default().fg(Color::DarkGray)),
            Span::styled(result.public_calendar_url.clone(), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(""),
    ];
    lines.extend(result.fixtures.iter().map(fixture_line));
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn fixture_line(fixture: &Fixture) -> Line<'static> {
    let kickoff = fixture
        .fixture
        .kickoff()
        .map(|dt| dt.with_timezone(&chrono::Local).format("%a %d %b %H:%M").to_string())
        .unwrap_or_else(|| "TBD".to_string());
    Line::from(vec![
        Span::styled(format!("{kickoff:<17}"), Style::default().fg(Color::DarkGray)),
        Span::raw(format!(
            "{} vs {}",
            fixture.teams.home.name, fixture.teams.away.name
        )),
        Span::styled(
            format!("  {}", fixture.league.name),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

// ---------------------------------------------------------------------------
// Help, logs, spinner
// ---------------------------------------------------------------------------

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::DarkGray).title(" Help (Esc to close) ");
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(HELP_TEXT).style(Style::default().fg(Color::Gray)),
        inner,
    );
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray));
    f.render_widget(logs, area);
}

fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    if !loading.is_loading && loading.spinner_char != ERROR_CHAR {
        return;
    }
    let style = match loading.spinner_char {
        ERROR_CHAR => Style::default().fg(Color::Red),
        _ => Style::default().fg(Color::White),
    };
    let spinner = Paragraph::new(loading.spinner_char.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
