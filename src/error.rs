use reqwest::StatusCode;
use thiserror::Error;

/// Why a single weather fetch produced no reading.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The location could not be turned into a request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// DNS, connection, timeout or body read failure.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("Weather provider returned {status}")]
    Upstream { status: StatusCode },

    /// The body did not match the expected schema.
    #[error("Failed to decode weather response at `{path}`: {message}")]
    Decode { path: String, message: String },
}

impl FetchError {
    /// Short message suitable for the display's error line.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidRequest(msg) => format!("Invalid location: {}", msg),
            Self::Transport(_) => "Network error. Check your connection.".to_string(),
            Self::Upstream { status } if *status == StatusCode::UNAUTHORIZED => {
                "Weather API key was rejected".to_string()
            }
            Self::Upstream { status } if *status == StatusCode::NOT_FOUND => {
                "City not found".to_string()
            }
            Self::Upstream { status } => format!("Weather service error ({})", status.as_u16()),
            Self::Decode { .. } => "Unexpected response from weather service".to_string(),
        }
    }

    /// Whether the same request might succeed later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Upstream { status } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::InvalidRequest(_) | Self::Decode { .. } => false,
        }
    }
}

impl From<serde_path_to_error::Error<serde_json::Error>> for FetchError {
    fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = e.path().to_string();
        Self::Decode {
            path,
            message: e.into_inner().to_string(),
        }
    }
}

/// Configuration problems that stop the app before any fetch.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENWEATHERMAP_API_KEY is not set")]
    MissingApiKey,

    #[error("Invalid weather API base URL: {0}")]
    InvalidBaseUrl(String),
}
