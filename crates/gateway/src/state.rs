//! Shared application state for the gateway

use hotel_config::AppConfig;
use hotel_database::initialize_database;
use hotel_operations::Services;
use sqlx::SqlitePool;

use crate::error::GatewayResult;

/// Shared application state containing all services
#[derive(Clone)]
pub struct GatewayState {
    /// Database connection pool
    pub pool: SqlitePool,
    /// Domain services built on the pool
    pub services: Services,
}

impl GatewayState {
    pub fn new(pool: SqlitePool, services: Services) -> Self {
        Self { pool, services }
    }

    /// Open the configured database, apply migrations and wire the services.
    pub async fn from_config(config: &AppConfig) -> GatewayResult<Self> {
        let pool = initialize_database(&config.database).await?;
        let services = Services::new(pool.clone(), config.operations.clone());
        Ok(Self::new(pool, services))
    }
}
