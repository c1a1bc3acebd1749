//! Weather Config

use clap::Args;
use harvest_app::domain::weather::client::{DEFAULT_WEATHER_API_BASE_URL, WeatherConfig};

/// Weather provider settings.
#[derive(Debug, Args)]
pub struct WeatherApiConfig {
    /// OpenWeatherMap API key; demo data is served when unset
    #[arg(long = "weather-api-key", env = "WEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// OpenWeatherMap API origin
    #[arg(
        long = "weather-api-base-url",
        env = "WEATHER_API_BASE_URL",
        default_value = DEFAULT_WEATHER_API_BASE_URL
    )]
    pub base_url: String,
}

impl WeatherApiConfig {
    #[must_use]
    pub fn to_weather_config(&self) -> WeatherConfig {
        WeatherConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
        }
    }
}
