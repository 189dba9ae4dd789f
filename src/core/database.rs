use crate::core::config::{DatabaseBackend, DatabaseConfig};
use sqlx::{mysql::MySqlPoolOptions, postgres::PgPoolOptions, MySqlPool, PgPool};
use std::time::Duration;

/// Connection pool for whichever backend `DATABASE_URL` points at
#[derive(Debug, Clone)]
pub enum DatabasePool {
    Postgres(PgPool),
    MySql(MySqlPool),
}

pub async fn create_pool(config: &DatabaseConfig) -> Result<DatabasePool, sqlx::Error> {
    let acquire_timeout = Duration::from_secs(config.acquire_timeout_secs);
    let idle_timeout = Duration::from_secs(config.idle_timeout_secs);
    let max_lifetime = Duration::from_secs(config.max_lifetime_secs);

    match config.backend {
        DatabaseBackend::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .acquire_timeout(acquire_timeout)
                .idle_timeout(idle_timeout)
                .max_lifetime(max_lifetime)
                .connect(&config.url)
                .await?;
            Ok(DatabasePool::Postgres(pool))
        }
        DatabaseBackend::MySql => {
            let pool = MySqlPoolOptions::new()
                .max_connections(config.max_connections)
                .min_connections(config.min_connections)
                .acquire_timeout(acquire_timeout)
                .idle_timeout(idle_timeout)
                .max_lifetime(max_lifetime)
                .connect(&config.url)
                .await?;
            Ok(DatabasePool::MySql(pool))
        }
    }
}

/// Apply the embedded migrations for the pool's backend
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), sqlx::migrate::MigrateError> {
    match pool {
        DatabasePool::Postgres(pool) => sqlx::migrate!("./migrations/postgres").run(pool).await,
        DatabasePool::MySql(pool) => sqlx::migrate!("./migrations/mysql").run(pool).await,
    }
}
