/// Wire envelopes for the planner service.
/// Endpoints: `/leagues`, `/countries`, `/plan`.
///
/// `/leagues` returns a bare array of leagues and `/plan` returns a planner
/// result directly, so only the countries envelope needs its own shape.
use crate::Country;
use serde::Deserialize;

#[derive(Deserialize, Default, Debug)]
pub struct CountriesResponse {
    #[serde(default)]
    pub countries: Vec<Country>,
}
