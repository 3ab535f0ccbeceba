//! Current-weather fetching and display state for OpenWeatherMap.
//!
//! [`WeatherFetcher`] performs one request per call and returns a
//! [`FetchOutcome`]; [`WeatherApp`] holds what the display shows and is only
//! updated by applying those outcomes.

pub mod app;
pub mod config;
pub mod error;
pub mod weather;
pub mod weather_type;

pub use app::{ErrorDisplay, WeatherApp};
pub use config::{load_env_file, Config};
pub use error::{ConfigError, FetchError};
pub use weather::{
    decode_reading, ConditionEntry, FetchOutcome, WeatherFetcher, WeatherQuery, WeatherReading,
};
pub use weather_type::{Theme, WeatherType};
