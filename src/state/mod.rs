pub mod app_settings;
pub mod app_state;
pub mod cascade;
pub mod catalog;
pub mod favorites;
pub mod gate;
pub mod messages;
pub mod network;
pub mod planner;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support {
    use planner_api::{Catalog, Country, League, Team};

    fn league(id: u32, name: &str, country: &str, teams: Vec<Team>) -> League {
        League {
            id,
            name: name.into(),
            logo: format!("{id}.png"),
            country_name: country.into(),
            country_flag: String::new(),
            current_season: 2024,
            teams,
        }
    }

    fn team(id: u32, name: &str) -> Team {
        Team { id, name: name.into(), logo: format!("t{id}.png") }
    }

    /// Two countries, three leagues. England has two leagues sharing Liverpool.
    pub fn sample_catalog() -> Catalog {
        Catalog {
            countries: vec![
                Country { id: 1, name: "England".into(), flag: "gb.svg".into(), leagues: vec![] },
                Country { id: 2, name: "Portugal".into(), flag: "pt.svg".into(), leagues: vec![] },
            ],
            leagues: vec![
                league(39, "Premier League", "England", vec![team(40, "Liverpool"), team(50, "Manchester City")]),
                league(45, "FA Cup", "England", vec![team(40, "Liverpool")]),
                league(94, "Primeira Liga", "Portugal", vec![team(211, "Benfica"), team(212, "FC Porto")]),
            ],
        }
    }
}
