use log::{LevelFilter, warn};
use planner_api::client::DEFAULT_BASE_URL;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub full_screen: bool,
    pub log_level: Option<LevelFilter>,
    pub api_base_url: String,
    pub data_dir: PathBuf,
    /// IANA zone sent with planner requests.
    pub time_zone: Option<String>,
    pub request_timeout: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            full_screen: false,
            log_level: Some(LevelFilter::Info),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from(".fxplanner"),
            time_zone: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl AppSettings {
    pub fn load() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), detect_system_zone)
    }

    /// Build settings from any variable source; blank values count as unset.
    /// `system_zone` is consulted only when neither zone variable is set.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        system_zone: impl FnOnce() -> Option<String>,
    ) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            full_screen: false,
            log_level: get("FXPLANNER_LOG")
                .and_then(|v| v.trim().parse::<LevelFilter>().ok())
                .or(defaults.log_level),
            api_base_url: get("FXPLANNER_API_URL").unwrap_or(defaults.api_base_url),
            data_dir: get("FXPLANNER_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| default_data_dir(&get)),
            time_zone: get("FXPLANNER_TIMEZONE")
                .or_else(|| get("TZ"))
                .map(|tz| {
                    // POSIX allows a leading ':' before a zone name
                    tz.trim().trim_start_matches(':').to_string()
                })
                .or_else(|| system_zone().filter(|tz| !tz.trim().is_empty())),
            request_timeout: get("FXPLANNER_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }
}

fn detect_system_zone() -> Option<String> {
    iana_time_zone::get_timezone()
        .inspect_err(|e| warn!("could not detect the system time zone: {e}"))
        .ok()
}

fn default_data_dir(get: &impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(config_dir) = get("XDG_CONFIG_HOME") {
        return PathBuf::from(config_dir).join("fxplanner");
    }
    if let Some(home) = get("HOME") {
        return PathBuf::from(home).join(".config").join("fxplanner");
    }
    PathBuf::from(".fxplanner")
}
