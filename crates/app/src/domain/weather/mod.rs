//! Weather widget backed by OpenWeatherMap, plus static map settings.

pub mod client;
pub mod errors;
pub mod records;
pub mod service;

pub use errors::WeatherServiceError;
pub use service::*;
