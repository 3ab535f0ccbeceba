use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::{ConfigError, FetchError};
use crate::weather_type::{Theme, WeatherType};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Category assumed when the provider sends no condition entries.
pub const FALLBACK_CATEGORY: &str = "Clear";

const UNITS: &str = "metric";

/// Result of one fetch attempt. Never partially applied.
pub type FetchOutcome = Result<WeatherReading, FetchError>;

/// One request for current conditions at a named place.
#[derive(Clone)]
pub struct WeatherQuery {
    pub location: String,
    pub api_key: String,
}

impl WeatherQuery {
    pub fn new(location: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            api_key: api_key.into(),
        }
    }

    /// Unit system sent upstream. Always metric.
    pub fn units(&self) -> &'static str {
        UNITS
    }
}

// Keep the credential out of logs.
impl std::fmt::Debug for WeatherQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherQuery")
            .field("location", &self.location)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

// API response structs
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    name: String,
    main: MainReadings,
    weather: Vec<ConditionPayload>,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionPayload {
    description: String,
    main: String,
}

/// A single upstream condition, e.g. `light rain` / `Rain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionEntry {
    pub description: String,
    pub category: String,
}

/// Normalized current conditions for one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReading {
    pub location_name: String,
    pub temperature_celsius: f64,
    pub temp_min_celsius: f64,
    pub temp_max_celsius: f64,
    pub conditions: Vec<ConditionEntry>,
    /// Category of the first condition, or [`FALLBACK_CATEGORY`].
    pub primary_category: String,
}

impl From<WeatherResponse> for WeatherReading {
    fn from(response: WeatherResponse) -> Self {
        let conditions: Vec<ConditionEntry> = response
            .weather
            .into_iter()
            .map(|w| ConditionEntry {
                description: w.description,
                category: w.main,
            })
            .collect();

        let primary_category = conditions
            .first()
            .map(|c| c.category.clone())
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());

        Self {
            location_name: response.name,
            temperature_celsius: response.main.temp,
            temp_min_celsius: response.main.temp_min,
            temp_max_celsius: response.main.temp_max,
            conditions,
            primary_category,
        }
    }
}

impl WeatherReading {
    /// Description of the first condition, empty when there is none.
    pub fn description(&self) -> &str {
        self.conditions
            .first()
            .map(|c| c.description.as_str())
            .unwrap_or("")
    }

    pub fn weather_type(&self) -> WeatherType {
        WeatherType::from_category(&self.primary_category)
    }

    pub fn theme(&self) -> Theme {
        self.weather_type().theme()
    }
}

/// Decode a current-weather body into a [`WeatherReading`].
///
/// Unknown fields are ignored and an empty `weather` array is accepted. Any
/// other mismatch, including a missing `weather` key or invalid UTF-8, is a
/// [`FetchError::Decode`] naming the field.
pub fn decode_reading(body: impl AsRef<[u8]>) -> Result<WeatherReading, FetchError> {
    let mut de = serde_json::Deserializer::from_slice(body.as_ref());
    let response: WeatherResponse = serde_path_to_error::deserialize(&mut de)?;
    de.end().map_err(|e| FetchError::Decode {
        path: ".".to_string(),
        message: e.to_string(),
    })?;
    Ok(WeatherReading::from(response))
}

/// Performs one current-weather request per call and normalizes the reply.
///
/// Holds no per-call state; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct WeatherFetcher {
    client: Client,
    base_url: String,
}

impl Default for WeatherFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the fetcher at another host, e.g. a mock server in tests.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let parsed =
            Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if parsed.cannot_be_a_base() {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the request URL with the location encoded as `q`.
    pub fn request_url(&self, query: &WeatherQuery) -> Result<Url, FetchError> {
        if query.location.is_empty() {
            return Err(FetchError::InvalidRequest("location is empty".to_string()));
        }

        Url::parse_with_params(
            &format!("{}/weather", self.base_url),
            &[
                ("q", query.location.as_str()),
                ("appid", query.api_key.as_str()),
                ("units", query.units()),
            ],
        )
        .map_err(|e| FetchError::InvalidRequest(e.to_string()))
    }

    /// Fetch current conditions for `query.location`.
    #[instrument(skip(self, query), fields(location = %query.location), level = "info")]
    pub async fn fetch(&self, query: &WeatherQuery) -> FetchOutcome {
        let outcome = self.fetch_once(query).await;
        if let Err(e) = &outcome {
            debug!("Weather fetch for {} failed: {}", query.location, e);
        }
        outcome
    }

    async fn fetch_once(&self, query: &WeatherQuery) -> FetchOutcome {
        let url = self.request_url(query)?;

        info!("Fetching weather data for location: {}", query.location);
        // Strip the URL from transport errors so the appid never reaches a log line.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Upstream { status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.without_url()))?;

        let reading = decode_reading(&body)?;
        debug!("Weather data fetched successfully: {:?}", reading);
        Ok(reading)
    }
}
