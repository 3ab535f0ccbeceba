use std::env;
use std::path::{Path, PathBuf};

use dotenv::dotenv;
use tracing::{debug, info, warn};

use crate::app::ErrorDisplay;
use crate::error::ConfigError;
use crate::weather::DEFAULT_BASE_URL;

pub const API_KEY_VAR: &str = "OPENWEATHERMAP_API_KEY";
pub const CITY_VAR: &str = "WEATHER_CITY";
pub const BASE_URL_VAR: &str = "OPENWEATHERMAP_BASE_URL";
pub const SHOW_ERRORS_VAR: &str = "WEATHER_SHOW_ERRORS";

pub const DEFAULT_CITY: &str = "London";

/// Settings the app needs before its first fetch.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub city: String,
    pub base_url: String,
    pub error_display: ErrorDisplay,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &format_args!("<{} chars>", self.api_key.len()))
            .field("city", &self.city)
            .field("base_url", &self.base_url)
            .field("error_display", &self.error_display)
            .finish()
    }
}

impl Config {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let city = lookup(CITY_VAR)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CITY.to_string());

        let base_url = lookup(BASE_URL_VAR)
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let error_display = match lookup(SHOW_ERRORS_VAR) {
            Some(v) if parse_flag(&v) => ErrorDisplay::Surface,
            _ => ErrorDisplay::Silent,
        };

        Ok(Self {
            api_key,
            city,
            base_url,
            error_display,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Candidate `.env` locations, most specific first.
pub fn env_file_candidates() -> Vec<PathBuf> {
    let mut env_paths = vec![PathBuf::from(".env")];

    // Next to the executable, for installed copies
    if let Ok(exe_path) = env::current_exe() {
        debug!("Executable path: {}", exe_path.display());
        if let Some(exe_dir) = exe_path.parent() {
            env_paths.push(exe_dir.join(".env"));
        }
    }

    if let Ok(home) = env::var("HOME") {
        let home = Path::new(&home);
        env_paths.push(home.join(".weather_display.env"));
        env_paths.push(home.join(".env"));
    }

    env_paths
}

/// Load the first `.env` file found, falling back to dotenv's own search.
///
/// Returns the path that was loaded, if any.
pub fn load_env_file() -> Option<PathBuf> {
    let env_paths = env_file_candidates();

    if let Some(path) = load_first_env_file(&env_paths) {
        return Some(path);
    }

    debug!("No .env file found in any of these locations: {:?}", env_paths);
    let loaded = dotenv().ok();
    report_api_key();
    loaded
}

/// Load the first existing file in `env_paths`. Variables already set in the
/// environment are left alone.
pub fn load_first_env_file(env_paths: &[PathBuf]) -> Option<PathBuf> {
    for path in env_paths {
        if !path.exists() {
            debug!("No .env at {}", path.display());
            continue;
        }
        match dotenv::from_path(path) {
            Ok(()) => {
                info!("Loaded .env from {}", path.display());
                report_api_key();
                return Some(path.clone());
            }
            Err(e) => {
                warn!("Error loading .env from {}: {}", path.display(), e);
            }
        }
    }

    None
}

fn report_api_key() {
    match env::var(API_KEY_VAR) {
        Ok(key) => debug!("API key found (length: {})", key.len()),
        Err(_) => debug!("{} not set", API_KEY_VAR),
    }
}
