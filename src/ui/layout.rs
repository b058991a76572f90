use tui::layout::{Constraint, Layout, Rect, Size};
pub const TAB_BAR_HEIGHT: u16 = 3;
pub const LOG_PANE_HEIGHT: u16 = 10;
pub const SELECTOR_HEIGHT: u16 = 3;

/// Pre-computed layout areas for the main draw loop.
pub struct LayoutAreas {
    pub tab_bar: [Rect; 2],
    pub main: Rect,
    pub logs: Option<Rect>,
}

impl LayoutAreas {
    pub fn new(size: Size) -> Self {
        let rect = Rect::new(0, 0, size.width, size.height);
        Self::from_rect(rect, false, false)
    }

    pub fn update(&mut self, area: Rect, full_screen: bool, show_logs: bool) {
        *self = Self::from_rect(area, full_screen, show_logs);
    }

    fn from_rect(area: Rect, full_screen: bool, show_logs: bool) -> Self {
        let (content, logs) = Self::split_logs(area, show_logs);

        if full_screen {
            return LayoutAreas {
                tab_bar: [Rect::ZERO, Rect::ZERO],
                main: content,
                logs,
            };
        }

        let [tab, main] = Layout::vertical([
            Constraint::Length(TAB_BAR_HEIGHT),
            Constraint::Fill(1),
        ])
        .areas(content);

        LayoutAreas {
            tab_bar: Self::split_tab_bar(tab),
            main,
            logs,
        }
    }

    fn split_logs(area: Rect, show_logs: bool) -> (Rect, Option<Rect>) {
        if !show_logs || area.height <= LOG_PANE_HEIGHT * 2 {
            return (area, None);
        }
        let [content, logs] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(LOG_PANE_HEIGHT)]).areas(area);
        (content, Some(logs))
    }

    fn split_tab_bar(area: Rect) -> [Rect; 2] {
        Layout::horizontal([Constraint::Percentage(85), Constraint::Percentage(15)]).areas(area)
    }
}

/// Survey tab: selectors on the left, selection and favorites on the right.
pub struct SurveyAreas {
    pub selectors: Rect,
    pub current: Rect,
    pub favorites: Rect,
    pub actions: Rect,
}

impl SurveyAreas {
    pub fn new(area: Rect, show_current: bool) -> Self {
        let [selectors, right] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area);
        let current_height = if show_current { 4 } else { 0 };
        let [current, favorites, actions] = Layout::vertical([
            Constraint::Length(current_height),
            Constraint::Fill(1),
            Constraint::Length(4),
        ])
        .areas(right);
        Self { selectors, current, favorites, actions }
    }

    /// Box of the n-th selector from the top, clipped to the selectors column.
    pub fn selector(&self, index: usize) -> Rect {
        let y = self.selectors.y + SELECTOR_HEIGHT * index as u16;
        let bottom = self.selectors.bottom();
        if y >= bottom {
            return Rect::ZERO;
        }
        Rect::new(self.selectors.x, y, self.selectors.width, SELECTOR_HEIGHT.min(bottom - y))
    }

    /// Space an expanded selector may use: from its own row to the bottom of the column.
    pub fn expanded(&self, index: usize) -> Rect {
        let top = self.selector(index);
        if top == Rect::ZERO {
            return self.selectors;
        }
        Rect::new(top.x, top.y, top.width, self.selectors.bottom() - top.y)
    }
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_stack_and_clip() {
        let survey = SurveyAreas::new(Rect::new(0, 0, 100, 10), true);
        assert_eq!(survey.selector(0), Rect::new(0, 0, 45, 3));
        assert_eq!(survey.selector(3), Rect::new(0, 9, 45, 1));
        assert_eq!(survey.selector(4), Rect::ZERO);
        assert_eq!(survey.expanded(1), Rect::new(0, 3, 45, 7));
    }

    #[test]
    fn current_panel_collapses_when_hidden() {
        let survey = SurveyAreas::new(Rect::new(0, 0, 100, 20), false);
        assert_eq!(survey.current.height, 0);
        assert_eq!(survey.actions.height, 4);
    }

    #[test]
    fn centered_rect_fits_inside() {
        let r = centered(Rect::new(0, 0, 20, 6), 50, 8);
        assert_eq!(r, Rect::new(0, 0, 20, 6));
        let r = centered(Rect::new(10, 10, 40, 20), 20, 6);
        assert_eq!(r, Rect::new(20, 17, 20, 6));
    }

    #[test]
    fn log_pane_only_when_room() {
        let areas = LayoutAreas::from_rect(Rect::new(0, 0, 80, 40), false, true);
        assert_eq!(areas.logs.map(|r| r.height), Some(LOG_PANE_HEIGHT));
        let areas = LayoutAreas::from_rect(Rect::new(0, 0, 80, 15), false, true);
        assert!(areas.logs.is_none());
    }
}
