use crate::config::Config;
use crate::error::Result;
use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(config: &Config) -> Result<DbPool> {
    let max_connections = config.database.max_connections.unwrap_or(10);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(&config.database.url)
        .await?;

    Ok(pool)
}

/// Creates the devices and energy_readings tables if they do not exist yet.
pub async fn init_schema(pool: &DbPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS devices (
            id UUID PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            location TEXT NOT NULL,
            max_wattage DOUBLE PRECISION NOT NULL,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS energy_readings (
            id UUID PRIMARY KEY,
            device_id UUID NOT NULL REFERENCES devices(id),
            ts TIMESTAMPTZ NOT NULL,
            wattage DOUBLE PRECISION NOT NULL,
            duration_minutes DOUBLE PRECISION NOT NULL,
            energy_kwh DOUBLE PRECISION NOT NULL,
            cost DOUBLE PRECISION NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS energy_readings_device_ts
         ON energy_readings (device_id, ts DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
