//! Weather Errors

use salvo::http::StatusError;
use tracing::error;

use harvest_app::domain::weather::WeatherServiceError;

/// Map every failure except [`WeatherServiceError::KeyNotActivated`], which has its own body.
pub(crate) fn into_status_error(error: WeatherServiceError) -> StatusError {
    match error {
        WeatherServiceError::MissingCity => StatusError::bad_request().brief("City is required"),
        WeatherServiceError::CityNotFound => StatusError::not_found()
            .brief("City not found")
            .detail("Please check the city name and try again"),
        WeatherServiceError::KeyNotActivated { .. } => StatusError::service_unavailable()
            .brief("Weather API key is not activated yet"),
        WeatherServiceError::Upstream(status) => {
            error!(status, "weather provider returned an error");

            StatusError::bad_gateway().brief("Error fetching weather data")
        }
        WeatherServiceError::Http(source) => {
            error!("weather provider request failed: {source}");

            StatusError::bad_gateway().brief("Error fetching weather data")
        }
    }
}
