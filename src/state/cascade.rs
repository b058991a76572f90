use planner_api::{Catalog, Favorite, SelectOption};

pub const SELECT_OPTION_LABEL: &str = "Select Option";
pub const SELECT_COUNTRY_LABEL: &str = "Select Country";
pub const SELECT_LEAGUE_LABEL: &str = "Select League";
pub const SELECT_TEAM_LABEL: &str = "Select Team";

/// Top-level traversal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Leagues,
    Countries,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Leagues, Mode::Countries];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Leagues => "Leagues",
            Mode::Countries => "Countries",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(label))
    }

    pub fn option(&self) -> SelectOption {
        let img_url = match self {
            Mode::Leagues => "img/leagues",
            Mode::Countries => "img/countries",
        };
        SelectOption { id: 0, name: self.label().to_string(), img_url: img_url.to_string() }
    }
}

/// One selector in the chain. Ordered from the top of the cascade down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    #[default]
    Mode,
    Country,
    League,
    Team,
}

impl Level {
    /// The mode picker is a fixed two-entry list; every other selector is searchable.
    pub fn allows_search(&self) -> bool {
        !matches!(self, Level::Mode)
    }
}

/// Mode → Country/League → League → Team.
///
/// Picking at one level clears every level below it and rebuilds only the
/// option list of the next level. Labels are derived from the selections.
#[derive(Debug, Default, Clone)]
pub struct SelectionCascade {
    pub mode: Option<Mode>,
    pub country: Option<SelectOption>,
    pub league: Option<SelectOption>,
    pub team: Option<SelectOption>,
    pub country_options: Vec<SelectOption>,
    pub league_options: Vec<SelectOption>,
    pub team_options: Vec<SelectOption>,
}

impl SelectionCascade {
    pub fn select_mode(&mut self, mode: Mode, catalog: Option<&Catalog>) {
        self.reset();
        self.mode = Some(mode);
        match mode {
            Mode::Leagues => {
                self.league_options = catalog.map(Catalog::league_options).unwrap_or_default();
            }
            Mode::Countries => {
                self.country_options = catalog.map(Catalog::country_options).unwrap_or_default();
            }
        }
    }

    pub fn select_country(&mut self, country: SelectOption, catalog: Option<&Catalog>) {
        self.league = None;
        self.team = None;
        self.team_options.clear();
        self.league_options = catalog
            .map(|c| c.league_options_in(&country.name))
            .unwrap_or_default();
        self.country = Some(country);
    }

    /// Team options are recomputed on every pick, including a repeat of the same league.
    pub fn select_league(&mut self, league: SelectOption, catalog: Option<&Catalog>) {
        self.team = None;
        self.team_options = catalog
            .map(|c| c.team_options(league.id))
            .unwrap_or_default();
        self.league = Some(league);
    }

    pub fn select_team(&mut self, team: SelectOption) {
        self.team = Some(team);
    }

    /// Route a dropdown pick to the matching level.
    pub fn select(&mut self, level: Level, option: SelectOption, catalog: Option<&Catalog>) {
        match level {
            Level::Mode => {
                if let Some(mode) = Mode::from_label(&option.name) {
                    self.select_mode(mode, catalog);
                }
            }
            Level::Country => self.select_country(option, catalog),
            Level::League => self.select_league(option, catalog),
            Level::Team => self.select_team(option),
        }
    }

    /// Back to the empty Level-0 state with placeholder labels.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn options_for(&self, level: Level) -> Vec<SelectOption> {
        match level {
            Level::Mode => Mode::ALL.iter().map(Mode::option).collect(),
            Level::Country => self.country_options.clone(),
            Level::League => self.league_options.clone(),
            Level::Team => self.team_options.clone(),
        }
    }

    /// Selectors currently shown, top to bottom.
    pub fn visible_levels(&self) -> Vec<Level> {
        let mut levels = vec![Level::Mode];
        match self.mode {
            Some(Mode::Leagues) => levels.push(Level::League),
            Some(Mode::Countries) => {
                levels.push(Level::Country);
                if self.country.is_some() {
                    levels.push(Level::League);
                }
            }
            None => {}
        }
        if self.league.is_some() {
            levels.push(Level::Team);
        }
        levels
    }

    pub fn label(&self, level: Level) -> String {
        match level {
            Level::Mode => self.mode_label(),
            Level::Country => self.country_label(),
            Level::League => self.league_label(),
            Level::Team => self.team_label(),
        }
    }

    pub fn mode_label(&self) -> String {
        self.mode
            .map(|m| m.label().to_string())
            .unwrap_or_else(|| SELECT_OPTION_LABEL.to_string())
    }

    pub fn country_label(&self) -> String {
        label_or(&self.country, SELECT_COUNTRY_LABEL)
    }

    pub fn league_label(&self) -> String {
        label_or(&self.league, SELECT_LEAGUE_LABEL)
    }

    pub fn team_label(&self) -> String {
        label_or(&self.team, SELECT_TEAM_LABEL)
    }

    pub fn is_current_selection_visible(&self) -> bool {
        self.league.is_some() || self.team.is_some()
    }

    pub fn can_add_favorite(&self) -> bool {
        self.league.is_some() && self.team.is_some()
    }

    pub fn current_favorite(&self) -> Option<Favorite> {
        let league = self.league.as_ref()?;
        let team = self.team.as_ref()?;
        Some(Favorite::new(league, team))
    }
}

fn label_or(selection: &Option<SelectOption>, placeholder: &str) -> String {
    selection
        .as_ref()
        .map(|s| s.name.clone())
        .unwrap_or_else(|| placeholder.to_string())
}
