//! Weather Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use harvest_app::domain::weather::records::{MapConfig, WeatherReport};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct WeatherResponse {
    pub city: String,

    /// Short condition label, e.g. `Clouds`
    pub weather: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Degrees Celsius
    pub temp: f64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<u8>,

    /// Placeholder data rather than a live reading
    pub demo: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<WeatherReport> for WeatherResponse {
    fn from(report: WeatherReport) -> Self {
        Self {
            city: report.city,
            weather: report.weather,
            description: report.description,
            temp: report.temp,
            humidity: report.humidity,
            demo: report.demo,
            message: report.message,
        }
    }
}

/// Returned with 503 while a new provider key is still being activated.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct KeyNotActivatedResponse {
    pub message: String,
    pub error: String,

    /// Demo data to show in the meantime
    pub fallback: WeatherResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub(crate) enum WeatherBody {
    Report(WeatherResponse),
    KeyNotActivated(KeyNotActivatedResponse),
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MapCenterResponse {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MapConfigResponse {
    pub center: MapCenterResponse,
    pub zoom: u8,

    /// e.g. `roadmap`
    pub map_type: String,
}

impl From<MapConfig> for MapConfigResponse {
    fn from(config: MapConfig) -> Self {
        Self {
            center: MapCenterResponse {
                lat: config.center.lat,
                lng: config.center.lng,
            },
            zoom: config.zoom,
            map_type: config.map_type.to_string(),
        }
    }
}
