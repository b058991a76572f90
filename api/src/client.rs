use crate::wire::CountriesResponse;
use crate::{Catalog, Country, League, PlannerRequest, PlannerResult};
use reqwest::{Client, StatusCode, Url};
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the planner service: catalog lookups and planner creation.
#[derive(Debug, Clone)]
pub struct PlannerApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for PlannerApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("fxplanner/0.1 (terminal fixture planner)")
                .build()
                .unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Status(StatusCode, String),
    Parsing(reqwest::Error, String),
    Timeout(String),
    Url(String),
}

impl ApiError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Timeout(_))
    }

    fn from_transport(e: reqwest::Error, url: &str) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(url.to_owned())
        } else {
            ApiError::Network(e, url.to_owned())
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Status(status, url) => write!(f, "Unexpected status {status} for {url}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Timeout(url) => write!(f, "Request to {url} timed out"),
            ApiError::Url(msg) => write!(f, "Invalid url: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl PlannerApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Deadline applied to every request; a request past it fails with `ApiError::Timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_leagues(&self) -> ApiResult<Vec<League>> {
        let url = self.endpoint("leagues")?;
        self.get(url).await
    }

    pub async fn fetch_countries(&self) -> ApiResult<Vec<Country>> {
        let url = self.endpoint("countries")?;
        let raw: CountriesResponse = self.get(url).await?;
        Ok(raw.countries)
    }

    /// Fetch leagues, then countries. Either failure discards the whole catalog.
    pub async fn fetch_catalog(&self) -> ApiResult<Catalog> {
        let leagues = self.fetch_leagues().await?;
        let countries = self.fetch_countries().await?;
        Ok(Catalog { countries, leagues })
    }

    /// Build the planner query: `entries[]` alternates league id and team id per
    /// favorite, followed by the optional `name` and `timeZone`.
    pub fn plan_url(&self, request: &PlannerRequest) -> ApiResult<Url> {
        let mut params: Vec<(&str, String)> = Vec::with_capacity(request.entries.len() * 2 + 2);
        for (league_id, team_id) in &request.entries {
            params.push(("entries[]", league_id.to_string()));
            params.push(("entries[]", team_id.to_string()));
        }
        if let Some(name) = &request.name {
            params.push(("name", name.clone()));
        }
        if let Some(tz) = &request.time_zone {
            params.push(("timeZone", tz.clone()));
        }

        let base = self.endpoint("plan")?;
        Url::parse_with_params(base.as_str(), &params).map_err(|e| ApiError::Url(e.to_string()))
    }

    pub async fn fetch_plan(&self, request: &PlannerRequest) -> ApiResult<PlannerResult> {
        let url = self.plan_url(request)?;
        self.get(url).await
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}/{path}", self.base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|e| ApiError::Url(format!("{raw}: {e}")))
    }

    /// Only a 200 counts as success; every other status is an error.
    async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let url_str = url.to_string();
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, &url_str))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::Status(status, url_str));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(url_str.clone())
            } else {
                ApiError::Parsing(e, url_str.clone())
            }
        })
    }
}
