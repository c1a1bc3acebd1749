//! Weather service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use reqwest::StatusCode;
use tracing::{error, warn};

use crate::{
    domain::weather::{
        client::{OpenWeatherClient, WeatherApi, WeatherApiError, WeatherConfig},
        errors::WeatherServiceError,
        records::{DEMO_MESSAGE, MapConfig, WeatherReport},
    },
    validation::non_blank,
};

/// Weather lookups through a provider, or demo data when none is configured.
#[derive(Clone)]
pub struct ProxyWeatherService {
    api: Option<Arc<dyn WeatherApi>>,
    map: MapConfig,
}

impl std::fmt::Debug for ProxyWeatherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyWeatherService")
            .field("live", &self.api.is_some())
            .field("map", &self.map)
            .finish()
    }
}

impl ProxyWeatherService {
    /// Build the service from configuration; a blank or missing key selects demo mode.
    #[must_use]
    pub fn new(config: WeatherConfig) -> Self {
        let api = config
            .api_key
            .as_deref()
            .and_then(non_blank)
            .map(|key| {
                Arc::new(OpenWeatherClient::new(key.to_string(), config.base_url.clone()))
                    as Arc<dyn WeatherApi>
            });

        Self::with_api(api)
    }

    #[must_use]
    pub fn with_api(api: Option<Arc<dyn WeatherApi>>) -> Self {
        Self {
            api,
            map: MapConfig::default(),
        }
    }
}

#[async_trait]
impl WeatherService for ProxyWeatherService {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, WeatherServiceError> {
        let city = non_blank(city).ok_or(WeatherServiceError::MissingCity)?;

        let Some(api) = &self.api else {
            return Ok(WeatherReport {
                message: Some(DEMO_MESSAGE.to_string()),
                ..WeatherReport::demo(city)
            });
        };

        api.current_weather(city)
            .await
            .map_err(|api_error| match api_error {
                WeatherApiError::Status(StatusCode::UNAUTHORIZED) => {
                    warn!(city, "weather API key rejected by provider");

                    WeatherServiceError::KeyNotActivated {
                        fallback: WeatherReport::demo(city),
                    }
                }
                WeatherApiError::Status(StatusCode::NOT_FOUND) => WeatherServiceError::CityNotFound,
                WeatherApiError::Status(status) => {
                    error!(city, %status, "weather provider request failed");

                    WeatherServiceError::Upstream(status.as_u16())
                }
                WeatherApiError::Http(source) => {
                    error!(city, error = %source, "weather provider unreachable");

                    WeatherServiceError::Http(source)
                }
            })
    }

    fn map_config(&self) -> MapConfig {
        self.map.clone()
    }
}

#[automock]
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Current conditions for `city`.
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, WeatherServiceError>;

    /// Public map settings.
    fn map_config(&self) -> MapConfig;
}
