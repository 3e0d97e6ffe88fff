use crate::{AppError, AppResult};
use std::{env, path::PathBuf, time::Duration};

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_GEOCODING_URL: &str = "https://api.geoapify.com/v1/geocode/autocomplete";
const DEFAULT_DEBOUNCE_MS: u64 = 150;
const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Runtime settings for the client.
/// # Default Values
/// - `api_url`: `http://localhost:8000/api`
/// - `geocoding_url`: the Geoapify autocomplete endpoint
/// - `geocoding_api_key`: empty, which disables suggestions
/// - `debounce`: 150ms
/// - `min_query_len`: 2, queries need at least 3 characters
/// - `storage_dir`: `None`, state is kept in memory only
/// - `request_timeout`: `None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    pub geocoding_url: String,
    pub geocoding_api_key: String,
    /// Quiet period after the last keystroke before suggestions are fetched.
    pub debounce: Duration,
    /// Inputs of this many characters or fewer never query.
    pub min_query_len: usize,
    /// Directory holding the persisted token and itinerary cache.
    pub storage_dir: Option<PathBuf>,
    pub request_timeout: Option<Duration>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            geocoding_api_key: String::new(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            storage_dir: None,
            request_timeout: None,
        }
    }
}

impl AppConfig {
    /// Read settings from the process environment, loading `.env` first when
    /// one exists.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to the defaults for
    /// unset or empty keys.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            api_url: get("TRIP_PLANNER_API_URL").unwrap_or(defaults.api_url),
            geocoding_url: get("GEOAPIFY_AUTOCOMPLETE_URL").unwrap_or(defaults.geocoding_url),
            geocoding_api_key: get("GEOAPIFY_API_KEY").unwrap_or(defaults.geocoding_api_key),
            debounce: match get("TRIP_PLANNER_DEBOUNCE_MS") {
                Some(value) => Duration::from_millis(parse_number("TRIP_PLANNER_DEBOUNCE_MS", &value)?),
                None => defaults.debounce,
            },
            min_query_len: defaults.min_query_len,
            storage_dir: get("TRIP_PLANNER_STORAGE_DIR").map(PathBuf::from),
            request_timeout: get("TRIP_PLANNER_TIMEOUT_SECS")
                .map(|value| parse_number("TRIP_PLANNER_TIMEOUT_SECS", &value))
                .transpose()?
                .map(Duration::from_secs),
        })
    }
}

fn parse_number(key: &str, value: &str) -> AppResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|error| AppError::Config(format!("{key} must be a whole number: {error}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn unset_keys_fall_back_to_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).expect("valid config");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.debounce, Duration::from_millis(150));
    }

    #[test]
    fn reads_every_key() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TRIP_PLANNER_API_URL", "https://planner.example/api"),
            ("GEOAPIFY_API_KEY", "geo-key"),
            ("GEOAPIFY_AUTOCOMPLETE_URL", "http://127.0.0.1:9/autocomplete"),
            ("TRIP_PLANNER_DEBOUNCE_MS", "300"),
            ("TRIP_PLANNER_STORAGE_DIR", "/tmp/trip-planner"),
            ("TRIP_PLANNER_TIMEOUT_SECS", "30"),
        ]))
        .expect("valid config");

        assert_eq!(config.api_url, "https://planner.example/api");
        assert_eq!(config.geocoding_api_key, "geo-key");
        assert_eq!(config.geocoding_url, "http://127.0.0.1:9/autocomplete");
        assert_eq!(config.debounce, Duration::from_millis(300));
        assert_eq!(config.storage_dir, Some(PathBuf::from("/tmp/trip-planner")));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn malformed_numbers_are_config_errors() {
        let error = AppConfig::from_lookup(lookup(&[("TRIP_PLANNER_DEBOUNCE_MS", "soon")]))
            .expect_err("rejected");
        assert!(matches!(error, AppError::Config(message) if message.contains("TRIP_PLANNER_DEBOUNCE_MS")));
    }
}
