//! Weather Records

/// Temperature reported while no API key is configured.
pub const DEMO_TEMPERATURE: f64 = 25.0;

pub const DEMO_MESSAGE: &str =
    "Running in demo mode: Please add WEATHER_API_KEY to .env for real data";

/// Current conditions for a city.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,

    /// Short condition label, e.g. `Clouds`.
    pub weather: String,
    pub description: Option<String>,

    /// Degrees Celsius.
    pub temp: f64,
    pub humidity: Option<u8>,

    /// Whether this report is placeholder data rather than a live reading.
    pub demo: bool,
    pub message: Option<String>,
}

impl WeatherReport {
    /// Placeholder conditions used when live data is unavailable.
    #[must_use]
    pub fn demo(city: &str) -> Self {
        Self {
            city: city.to_string(),
            weather: "Sunny".to_string(),
            description: None,
            temp: DEMO_TEMPERATURE,
            humidity: None,
            demo: true,
            message: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapCenter {
    pub lat: f64,
    pub lng: f64,
}

/// Public settings for the embedded map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub center: MapCenter,
    pub zoom: u8,
    pub map_type: &'static str,
}

impl Default for MapConfig {
    /// Colombo, Sri Lanka.
    fn default() -> Self {
        Self {
            center: MapCenter {
                lat: 6.9271,
                lng: 79.8612,
            },
            zoom: 12,
            map_type: "roadmap",
        }
    }
}
