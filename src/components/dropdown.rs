use crate::state::cascade::Level;
use planner_api::SelectOption;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Widget};

/// An expanded selector: which level it belongs to, the search text and the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownState {
    pub level: Level,
    pub filter: String,
    pub cursor: usize,
}

impl DropdownState {
    pub fn open(level: Level) -> Self {
        Self { level, filter: String::new(), cursor: 0 }
    }

    pub fn allows_search(&self) -> bool {
        self.level.allows_search()
    }

    /// Options matching the filter, case-insensitively, in their original order.
    pub fn visible<'a>(&self, options: &'a [SelectOption]) -> Vec<&'a SelectOption> {
        let needle = self.filter.to_lowercase();
        options
            .iter()
            .filter(|o| needle.is_empty() || o.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn move_down(&mut self, options: &[SelectOption]) {
        let max = self.visible(options).len().saturating_sub(1);
        if self.cursor < max {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn push_char(&mut self, c: char) {
        if self.allows_search() {
            self.filter.push(c);
            self.cursor = 0;
        }
    }

    pub fn pop_char(&mut self) {
        if self.filter.pop().is_some() {
            self.cursor = 0;
        }
    }

    /// The option under the cursor; this is the single selection the dropdown emits.
    pub fn pick(&self, options: &[SelectOption]) -> Option<SelectOption> {
        self.visible(options).get(self.cursor).map(|o| (*o).clone())
    }
}

/// Selector box. Collapsed it shows the label; with a state it lists the options.
pub struct Dropdown<'a> {
    pub label: &'a str,
    pub options: &'a [SelectOption],
    pub state: Option<&'a DropdownState>,
    pub focused: bool,
}

impl<'a> Widget for Dropdown<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border = if self.focused { Color::Yellow } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border));

        let Some(state) = self.state else {
            Paragraph::new(format!("{} ▾", self.label))
                .block(block)
                .render(area, buf);
            return;
        };

        let block = block.title(format!(" {} ", self.label));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }

        let mut lines = Vec::new();
        if state.allows_search() {
            lines.push(Line::from(vec![
                Span::styled("search: ", Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{}_", state.filter), Style::default().fg(Color::Yellow)),
            ]));
        }

        let visible = state.visible(self.options);
        if visible.is_empty() {
            lines.push(Line::styled("(no options)", Style::default().fg(Color::DarkGray)));
        }

        let list_height = (inner.height as usize).saturating_sub(lines.len()).max(1);
        let start = state.cursor.saturating_sub(list_height - 1);
        for (i, option) in visible.iter().enumerate().skip(start).take(list_height) {
            let style = if i == state.cursor {
                Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            lines.push(Line::styled(option.name.clone(), style));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<SelectOption> {
        ["Premier League", "Primeira Liga", "Serie A"]
            .iter()
            .enumerate()
            .map(|(i, name)| SelectOption { id: i as u32, name: name.to_string(), img_url: String::new() })
            .collect()
    }

    #[test]
    fn filter_is_case_insensitive_and_resets_cursor() {
        let opts = options();
        let mut state = DropdownState::open(Level::League);
        state.move_down(&opts);
        assert_eq!(state.cursor, 1);

        state.push_char('p');
        state.push_char('R');
        assert_eq!(state.cursor, 0);
        let names: Vec<&str> = state.visible(&opts).iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Premier League", "Primeira Liga"]);
    }

    #[test]
    fn mode_selector_ignores_typing() {
        let mut state = DropdownState::open(Level::Mode);
        state.push_char('x');
        assert!(state.filter.is_empty());
    }

    #[test]
    fn cursor_is_clamped_to_visible_options() {
        let opts = options();
        let mut state = DropdownState::open(Level::Team);
        for _ in 0..10 {
            state.move_down(&opts);
        }
        assert_eq!(state.cursor, 2);
        assert_eq!(state.pick(&opts).unwrap().name, "Serie A");

        state.move_up();
        state.move_up();
        state.move_up();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn pick_with_no_match_yields_nothing() {
        let opts = options();
        let mut state = DropdownState::open(Level::Country);
        state.push_char('z');
        assert!(state.pick(&opts).is_none());
        state.pop_char();
        assert_eq!(state.pick(&opts).unwrap().name, "Premier League");
    }

    #[test]
    fn renders_label_when_collapsed() {
        let opts = options();
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        Dropdown { label: "Select League", options: &opts, state: None, focused: true }
            .render(area, &mut buf);
        let row: String = (0..area.width).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains("Select League"));
    }
}
