pub mod client;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id of the synthetic team that stands for "every team in this league".
pub const ALL_TEAMS_ID: u32 = 0;
pub const ALL_TEAMS_NAME: &str = "All Teams";

// ---------------------------------------------------------------------------
// Catalog types: countries, leagues and their teams
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub logo: String,
}

impl Team {
    fn is_all_teams(&self) -> bool {
        self.id == ALL_TEAMS_ID && self.name == ALL_TEAMS_NAME
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub country_name: String,
    #[serde(default)]
    pub country_flag: String,
    #[serde(default)]
    pub current_season: u16,
    #[serde(default)]
    pub teams: Vec<Team>,
}

impl League {
    /// Team options for this league, led by the "All Teams" entry.
    ///
    /// Computed fresh on every call and never written back into `teams`.
    /// A sentinel already stored in the catalog is skipped so it is listed once.
    pub fn team_options(&self) -> Vec<SelectOption> {
        let sentinel = SelectOption {
            id: ALL_TEAMS_ID,
            name: ALL_TEAMS_NAME.to_string(),
            img_url: self.logo.clone(),
        };
        std::iter::once(sentinel)
            .chain(
                self.teams
                    .iter()
                    .filter(|t| !t.is_all_teams())
                    .map(SelectOption::from),
            )
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub leagues: Vec<League>,
}

/// Reference data loaded once per session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub countries: Vec<Country>,
    pub leagues: Vec<League>,
}

impl Catalog {
    pub fn find_league(&self, id: u32) -> Option<&League> {
        self.leagues.iter().find(|l| l.id == id)
    }

    pub fn league_options(&self) -> Vec<SelectOption> {
        self.leagues.iter().map(SelectOption::from).collect()
    }

    pub fn country_options(&self) -> Vec<SelectOption> {
        self.countries.iter().map(SelectOption::from).collect()
    }

    /// Leagues whose country name matches exactly.
    pub fn league_options_in(&self, country_name: &str) -> Vec<SelectOption> {
        self.leagues
            .iter()
            .filter(|l| l.country_name == country_name)
            .map(SelectOption::from)
            .collect()
    }

    pub fn team_options(&self, league_id: u32) -> Vec<SelectOption> {
        self.find_league(league_id)
            .map(League::team_options)
            .unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Selector option: the one shape every dropdown consumes and emits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: u32,
    pub name: String,
    pub img_url: String,
}

impl From<&Team> for SelectOption {
    fn from(team: &Team) -> Self {
        Self { id: team.id, name: team.name.clone(), img_url: team.logo.clone() }
    }
}

impl From<&League> for SelectOption {
    fn from(league: &League) -> Self {
        Self { id: league.id, name: league.name.clone(), img_url: league.logo.clone() }
    }
}

impl From<&Country> for SelectOption {
    fn from(country: &Country) -> Self {
        Self { id: country.id, name: country.name.clone(), img_url: country.flag.clone() }
    }
}

// ---------------------------------------------------------------------------
// Favorites and planner requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub league: String,
    pub league_id: u32,
    #[serde(rename = "league_imgURL", default)]
    pub league_img_url: String,
    pub team: String,
    pub team_id: u32,
    #[serde(rename = "team_imgURL", default)]
    pub team_img_url: String,
}

impl Favorite {
    pub fn new(league: &SelectOption, team: &SelectOption) -> Self {
        Self {
            league: league.name.clone(),
            league_id: league.id,
            league_img_url: league.img_url.clone(),
            team: team.name.clone(),
            team_id: team.id,
            team_img_url: team.img_url.clone(),
        }
    }

    /// Favorites are identified by their (league, team) display names.
    pub fn same_pair(&self, other: &Favorite) -> bool {
        self.league == other.league && self.team == other.team
    }
}

/// Query sent to the planner endpoint. Derived from favorites, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerRequest {
    /// (league id, team id) pairs in favorites order.
    pub entries: Vec<(u32, u32)>,
    pub name: Option<String>,
    pub time_zone: Option<String>,
}

impl PlannerRequest {
    pub fn new(favorites: &[Favorite], name: Option<&str>, time_zone: Option<&str>) -> Self {
        let non_empty = |s: Option<&str>| {
            s.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string)
        };
        Self {
            entries: favorites.iter().map(|f| (f.league_id, f.team_id)).collect(),
            name: non_empty(name),
            time_zone: non_empty(time_zone),
        }
    }
}

// ---------------------------------------------------------------------------
// Planner results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerResult {
    #[serde(default)]
    pub public_calendar_url: String,
    #[serde(default)]
    pub calendar_name: String,
    #[serde(default)]
    pub fixtures: Vec<Fixture>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub fixture: FixtureInfo,
    #[serde(default)]
    pub league: FixtureLeague,
    #[serde(default)]
    pub teams: FixtureTeams,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureInfo {
    pub id: u64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub venue: Option<FixtureVenue>,
}

impl FixtureInfo {
    /// Kick-off time, when the service sent a valid RFC 3339 date.
    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        self.date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureVenue {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureLeague {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub round: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixtureTeams {
    #[serde(default)]
    pub home: Team,
    #[serde(default)]
    pub away: Team,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn premier_league() -> League {
        League {
            id: 39,
            name: "Premier League".into(),
            logo: "pl.png".into(),
            country_name: "England".into(),
            country_flag: "gb.svg".into(),
            current_season: 2023,
            teams: vec![
                Team { id: 33, name: "Manchester United".into(), logo: "mu.png".into() },
                Team { id: 40, name: "Liverpool".into(), logo: "lfc.png".into() },
            ],
        }
    }

    #[test]
    fn team_options_lead_with_all_teams_sentinel() {
        let league = premier_league();
        let options = league.team_options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].id, ALL_TEAMS_ID);
        assert_eq!(options[0].name, ALL_TEAMS_NAME);
        assert_eq!(options[0].img_url, "pl.png");
        assert_eq!(options[1].name, "Manchester United");
    }

    #[test]
    fn team_options_twice_keep_single_sentinel_and_leave_league_untouched() {
        let league = premier_league();
        let first = league.team_options();
        let second = league.team_options();
        assert_eq!(first, second);
        let sentinels = second.iter().filter(|o| o.name == ALL_TEAMS_NAME).count();
        assert_eq!(sentinels, 1);
        assert_eq!(league.teams.len(), 2);
    }

    #[test]
    fn team_options_skip_sentinel_already_in_cached_catalog() {
        let mut league = premier_league();
        league.teams.insert(
            0,
            Team { id: ALL_TEAMS_ID, name: ALL_TEAMS_NAME.into(), logo: "pl.png".into() },
        );
        let options = league.team_options();
        assert_eq!(options.len(), 3);
        assert_eq!(options.iter().filter(|o| o.id == ALL_TEAMS_ID).count(), 1);
        assert_eq!(options[0].name, ALL_TEAMS_NAME);
    }

    #[test]
    fn catalog_filters_leagues_by_country_name() {
        let mut serie_a = premier_league();
        serie_a.id = 135;
        serie_a.name = "Serie A".into();
        serie_a.country_name = "Italy".into();
        let catalog = Catalog { countries: vec![], leagues: vec![premier_league(), serie_a] };

        let italian = catalog.league_options_in("Italy");
        assert_eq!(italian.len(), 1);
        assert_eq!(italian[0].id, 135);
        assert!(catalog.league_options_in("Spain").is_empty());
        assert!(catalog.team_options(999).is_empty());
    }

    #[test]
    fn favorite_uses_historical_image_field_names() {
        let fav = Favorite::new(
            &SelectOption { id: 39, name: "Premier League".into(), img_url: "pl.png".into() },
            &SelectOption { id: 40, name: "Liverpool".into(), img_url: "lfc.png".into() },
        );
        let json = serde_json::to_value(&fav).unwrap();
        assert_eq!(json["league_imgURL"], "pl.png");
        assert_eq!(json["team_imgURL"], "lfc.png");
        assert_eq!(json["team_id"], 40);
    }

    #[test]
    fn planner_request_keeps_favorites_order_and_drops_blank_params() {
        let favs = vec![
            Favorite { league_id: 1, team_id: 10, ..Default::default() },
            Favorite { league_id: 2, team_id: 20, ..Default::default() },
        ];
        let req = PlannerRequest::new(&favs, Some("  "), Some("Europe/Lisbon"));
        assert_eq!(req.entries, vec![(1, 10), (2, 20)]);
        assert_eq!(req.name, None);
        assert_eq!(req.time_zone.as_deref(), Some("Europe/Lisbon"));
    }

    #[test]
    fn fixture_kickoff_parses_offset_dates() {
        let info = FixtureInfo {
            id: 1,
            date: Some("2024-08-16T19:00:00+01:00".into()),
            ..Default::default()
        };
        let kickoff = info.kickoff().unwrap();
        assert_eq!(kickoff.to_rfc3339(), "2024-08-16T18:00:00+00:00");
        assert!(FixtureInfo { id: 2, date: Some("soon".into()), ..Default::default() }
            .kickoff()
            .is_none());
    }
}
