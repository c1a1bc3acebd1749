//! OpenWeatherMap HTTP client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::weather::records::WeatherReport;

/// Default OpenWeatherMap API origin.
pub const DEFAULT_WEATHER_API_BASE_URL: &str = "https://api.openweathermap.org";

/// Configuration for the weather provider.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// API key; the service answers with demo data when absent.
    pub api_key: Option<String>,

    /// Provider origin, e.g. `"https://api.openweathermap.org"`.
    pub base_url: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_WEATHER_API_BASE_URL.to_string(),
        }
    }
}

/// Errors returned by a weather provider.
#[derive(Debug, Error)]
pub enum WeatherApiError {
    /// The provider answered with a non-2xx status.
    #[error("weather provider returned status {0}")]
    Status(StatusCode),

    /// An HTTP transport or deserialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

#[automock]
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Fetch current conditions for `city` in metric units.
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, WeatherApiError>;
}

/// HTTP client for the OpenWeatherMap current weather endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    #[must_use]
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl WeatherApi for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, WeatherApiError> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(WeatherApiError::Status(status));
        }

        let parsed: CurrentWeatherResponse = response.json().await?;

        Ok(parsed.into_report(city))
    }
}

#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    weather: Vec<Condition>,
    main: Readings,
}

#[derive(Debug, Deserialize)]
struct Condition {
    main: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Readings {
    temp: f64,
    humidity: Option<u8>,
}

impl CurrentWeatherResponse {
    fn into_report(self, requested_city: &str) -> WeatherReport {
        let (weather, description) = self
            .weather
            .into_iter()
            .next()
            .map_or_else(|| (String::new(), None), |c| (c.main, c.description));

        WeatherReport {
            city: self
                .name
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| requested_city.to_string()),
            weather,
            description,
            temp: self.main.temp,
            humidity: self.main.humidity,
            demo: false,
            message: None,
        }
    }
}
