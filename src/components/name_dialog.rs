use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap};

const MAX_NAME_LEN: usize = 64;

/// Confirmation step before creating a planner; collects the calendar name.
#[derive(Debug, Default, Clone)]
pub struct NameDialog {
    pub is_open: bool,
    pub input: String,
    /// Zone the planner will be built in, shown so the user can check it.
    pub time_zone: Option<String>,
}

impl NameDialog {
    pub fn open(&mut self, time_zone: Option<String>) {
        self.is_open = true;
        self.input.clear();
        self.time_zone = time_zone;
    }

    pub fn close(&mut self) {
        self.is_open = false;
        self.input.clear();
    }

    pub fn push_char(&mut self, c: char) {
        if self.input.chars().count() < MAX_NAME_LEN && !c.is_control() {
            self.input.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Close and hand back the typed name. `None` if the dialog was not open.
    pub fn confirm(&mut self) -> Option<String> {
        if !self.is_open {
            return None;
        }
        let name = self.input.trim().to_string();
        self.close();
        Some(name)
    }
}

pub struct NameDialogView<'a> {
    pub dialog: &'a NameDialog,
}

impl<'a> Widget for NameDialogView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::Green))
            .title(" Create Planner ");

        let zone = self.dialog.time_zone.as_deref().unwrap_or("not set");
        let lines = vec![
            Line::from("Planner name (optional):"),
            Line::from(Span::styled(
                format!("> {}_", self.dialog.input),
                Style::default().fg(Color::Yellow),
            )),
            Line::from(Span::styled(
                format!("Time zone: {zone}"),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                "Enter = create   Esc = cancel",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
