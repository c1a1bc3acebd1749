//! Server configuration module

use clap::Parser;
use harvest_app::context::AppSettings;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    weather::WeatherApiConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod weather;

/// Urban Harvest JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "harvest-json", about = "Urban Harvest JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Weather provider settings.
    #[command(flatten)]
    pub weather: WeatherApiConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for building the application context.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            max_connections: self.database.max_connections,
            run_migrations: self.database.run_migrations,
            session_ttl: self.auth.session_ttl(),
            weather: self.weather.to_weather_config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_database_url_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "harvest-json",
            "--database-url",
            "postgres://localhost/harvest",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:5000");
        assert_eq!(config.database.max_connections, 10);
        assert!(config.database.run_migrations);
        assert_eq!(config.auth.session_ttl_hours, 24);
        assert!(config.weather.api_key.is_none());
        assert!(!config.observability.otel_enabled);

        Ok(())
    }

    #[test]
    fn app_settings_carry_session_and_weather_options() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "harvest-json",
            "--database-url",
            "postgres://localhost/harvest",
            "--database-run-migrations",
            "false",
            "--session-ttl-hours",
            "2",
            "--weather-api-key",
            "abc123",
        ])?;

        let settings = config.app_settings();

        assert_eq!(settings.database_url, "postgres://localhost/harvest");
        assert!(!settings.run_migrations);
        assert_eq!(settings.session_ttl, jiff::SignedDuration::from_hours(2));
        assert_eq!(settings.weather.api_key.as_deref(), Some("abc123"));

        Ok(())
    }

    #[test]
    fn zero_session_ttl_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "harvest-json",
            "--database-url",
            "postgres://localhost/harvest",
            "--session-ttl-hours",
            "0",
        ]);

        assert!(result.is_err(), "a zero TTL should not parse");
    }
}
