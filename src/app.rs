use chrono::{DateTime, Utc};
use tracing::warn;

use crate::weather::{FetchOutcome, WeatherReading};
use crate::weather_type::{Theme, WeatherType};

/// Whether failed fetches show up in the rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorDisplay {
    /// Keep showing the previous state; failures only reach the log.
    #[default]
    Silent,
    /// Also print the latest failure under the reading.
    Surface,
}

/// Presentation state, changed only by applying fetch outcomes.
#[derive(Debug, Clone, Default)]
pub struct WeatherApp {
    reading: Option<WeatherReading>,
    last_error: Option<String>,
    updated_at: Option<DateTime<Utc>>,
    error_display: ErrorDisplay,
}

impl WeatherApp {
    pub fn new(error_display: ErrorDisplay) -> Self {
        Self {
            error_display,
            ..Self::default()
        }
    }

    /// Apply one outcome. A failure never clears the last good reading.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            Ok(reading) => {
                self.reading = Some(reading);
                self.last_error = None;
                self.updated_at = Some(Utc::now());
            }
            Err(e) => {
                warn!(
                    "Keeping previous weather state ({}): {}",
                    if self.reading.is_some() { "last reading" } else { "loading" },
                    e
                );
                self.last_error = Some(e.user_message());
            }
        }
    }

    pub fn reading(&self) -> Option<&WeatherReading> {
        self.reading.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_loading(&self) -> bool {
        self.reading.is_none()
    }

    /// Background for the current state; clear sky while loading.
    pub fn theme(&self) -> Theme {
        self.reading
            .as_ref()
            .map(WeatherReading::theme)
            .unwrap_or_else(|| WeatherType::Clear.theme())
    }

    /// Text view of the current state.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();

        match &self.reading {
            None => lines.push("Loading...".to_string()),
            Some(reading) => {
                lines.push(reading.location_name.clone());
                lines.push(format!("{:.1}°C", reading.temperature_celsius));
                lines.push(reading.description().to_string());
                lines.push(format!(
                    "H: {:.1}°C  L: {:.1}°C",
                    reading.temp_max_celsius, reading.temp_min_celsius
                ));
                lines.push(format!("Background: {}", self.theme()));
            }
        }

        if self.error_display == ErrorDisplay::Surface {
            if let Some(err) = &self.last_error {
                lines.push(format!("Error: {}", err));
            }
        }

        lines.join("\n")
    }
}
