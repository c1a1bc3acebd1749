//! App Context

use std::sync::Arc;

use jiff::SignedDuration;
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, DEFAULT_MAX_CONNECTIONS, Db},
    domain::{
        bookings::{BookingsService, PgBookingsService},
        catalog::{CatalogService, PgCatalogService},
        reviews::{PgReviewsService, ReviewsService},
        subscriptions::{PgSubscriptionsService, SubscriptionsService},
        users::{DEFAULT_SESSION_TTL, PgUsersService, UsersService},
        weather::{ProxyWeatherService, WeatherService, client::WeatherConfig},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] sqlx::migrate::MigrateError),
}

/// Settings needed to build an [`AppContext`].
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
    pub session_ttl: SignedDuration,
    pub weather: WeatherConfig,
}

impl AppSettings {
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            run_migrations: true,
            session_ttl: DEFAULT_SESSION_TTL,
            weather: WeatherConfig::default(),
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub users: Arc<dyn UsersService>,
    pub bookings: Arc<dyn BookingsService>,
    pub reviews: Arc<dyn ReviewsService>,
    pub subscriptions: Arc<dyn SubscriptionsService>,
    pub weather: Arc<dyn WeatherService>,
}

impl AppContext {
    /// Build application context from settings, connecting to the database and
    /// optionally applying pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating fails.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect_with(&settings.database_url, settings.max_connections)
            .await
            .map_err(AppInitError::Database)?;

        if settings.run_migrations {
            database::migrate(&pool)
                .await
                .map_err(AppInitError::Migrations)?;

            info!("database migrations applied");
        }

        Ok(Self::from_db(
            &Db::new(pool),
            settings.session_ttl,
            settings.weather,
        ))
    }

    #[must_use]
    pub fn from_db(db: &Db, session_ttl: SignedDuration, weather: WeatherConfig) -> Self {
        Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            users: Arc::new(PgUsersService::new(db.clone(), session_ttl)),
            bookings: Arc::new(PgBookingsService::new(db.clone())),
            reviews: Arc::new(PgReviewsService::new(db.clone())),
            subscriptions: Arc::new(PgSubscriptionsService::new(db.clone())),
            weather: Arc::new(ProxyWeatherService::new(weather)),
        }
    }
}
