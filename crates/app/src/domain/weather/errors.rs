//! Weather service errors.

use thiserror::Error;

use crate::domain::weather::records::WeatherReport;

#[derive(Debug, Error)]
pub enum WeatherServiceError {
    #[error("City is required")]
    MissingCity,

    /// The upstream rejected the API key; carries placeholder data to show instead.
    #[error("Weather API key is not activated yet")]
    KeyNotActivated { fallback: WeatherReport },

    #[error("City not found")]
    CityNotFound,

    #[error("weather provider responded with status {0}")]
    Upstream(u16),

    #[error("Error fetching weather data")]
    Http(#[source] reqwest::Error),
}
