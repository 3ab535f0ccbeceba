/// Coarse condition groups as reported in OpenWeatherMap's `weather[].main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeatherType {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    /// Mist, smoke, haze, dust, fog, sand, ash, squall, tornado.
    Atmosphere,
    Other,
}

/// What the presentation layer paints behind the reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Named background image asset.
    Background(&'static str),
    /// Vertical gradient between two named colors.
    Gradient {
        top: &'static str,
        bottom: &'static str,
    },
}

impl WeatherType {
    pub fn from_category(category: &str) -> Self {
        match category.to_ascii_lowercase().as_str() {
            "clear" => WeatherType::Clear,
            "clouds" => WeatherType::Clouds,
            "rain" => WeatherType::Rain,
            "drizzle" => WeatherType::Drizzle,
            "thunderstorm" => WeatherType::Thunderstorm,
            "snow" => WeatherType::Snow,
            "mist" | "smoke" | "haze" | "dust" | "fog" | "sand" | "ash" | "squall"
            | "tornado" => WeatherType::Atmosphere,
            _ => WeatherType::Other,
        }
    }

    /// Only clear, cloudy and rainy skies have artwork; everything else
    /// falls back to the blue/purple gradient.
    pub fn theme(self) -> Theme {
        match self {
            WeatherType::Clear => Theme::Background("clearBackground"),
            WeatherType::Clouds => Theme::Background("cloudyBackground"),
            WeatherType::Rain => Theme::Background("rainyBackground"),
            _ => Theme::Gradient {
                top: "blue",
                bottom: "purple",
            },
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Background(asset) => write!(f, "{}", asset),
            Theme::Gradient { top, bottom } => write!(f, "gradient({} -> {})", top, bottom),
        }
    }
}
