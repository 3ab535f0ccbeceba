use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use weather_display::{
    load_env_file, Config, ErrorDisplay, WeatherApp, WeatherFetcher, WeatherQuery,
};

/// Show the current weather for a city.
#[derive(Parser, Debug)]
#[command(name = "weather_display", version, about)]
struct Args {
    /// City to look up; defaults to London
    #[arg(long, env = "WEATHER_CITY")]
    city: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHERMAP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Alternate API endpoint, without the trailing `/weather`
    #[arg(long)]
    base_url: Option<String>,

    /// Print fetch failures under the reading instead of only logging them
    #[arg(long)]
    show_errors: bool,

    /// Print the decoded reading as JSON instead of the text view
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // .env must be loaded before clap reads env-backed args
    load_env_file();
    let args = Args::parse();

    let mut config = match args.api_key.as_deref() {
        Some(key) => Config::from_lookup(|var| {
            if var == weather_display::config::API_KEY_VAR {
                Some(key.to_string())
            } else {
                std::env::var(var).ok()
            }
        }),
        None => Config::from_env(),
    }
    .context("Set OPENWEATHERMAP_API_KEY in the environment or a .env file, or pass --api-key")?;

    if let Some(city) = args.city {
        config.city = city;
    }
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if args.show_errors {
        config.error_display = ErrorDisplay::Surface;
    }
    info!("Starting with {:?}", config);

    let fetcher = WeatherFetcher::with_base_url(&config.base_url)?;
    let query = WeatherQuery::new(config.city.clone(), config.api_key.clone());

    let mut app = WeatherApp::new(config.error_display);
    app.apply(fetcher.fetch(&query).await);

    if args.json {
        match app.reading() {
            Some(reading) => println!("{}", serde_json::to_string_pretty(reading)?),
            None => println!("null"),
        }
    } else {
        println!("{}", app.render());
    }

    Ok(())
}
