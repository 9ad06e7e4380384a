use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::Result;
use crate::models::EnergyReading;
use crate::window::TimeWindow;

/// Reading store boundary. Window queries are inclusive at both ends to match
/// the resolver's range semantics.
#[async_trait]
pub trait ReadingRepository: Send + Sync {
    async fn insert(&self, reading: EnergyReading) -> Result<EnergyReading>;
    async fn find_by_device_and_window(
        &self,
        device_id: Uuid,
        window: &TimeWindow,
    ) -> Result<Vec<EnergyReading>>;
    async fn find_by_window(&self, window: &TimeWindow) -> Result<Vec<EnergyReading>>;
}

#[derive(Clone)]
pub struct PostgresReadingRepository {
    pool: DbPool,
}

impl PostgresReadingRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn reading_from_row(row: &PgRow) -> EnergyReading {
    EnergyReading {
        id: row.get("id"),
        device_id: row.get("device_id"),
        timestamp: row.get("ts"),
        wattage: row.get("wattage"),
        duration_minutes: row.get("duration_minutes"),
        energy_kwh: row.get("energy_kwh"),
        cost: row.get("cost"),
    }
}

#[async_trait]
impl ReadingRepository for PostgresReadingRepository {
    async fn insert(&self, reading: EnergyReading) -> Result<EnergyReading> {
        sqlx::query(
            "INSERT INTO energy_readings (id, device_id, ts, wattage, duration_minutes, energy_kwh, cost)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(reading.id)
        .bind(reading.device_id)
        .bind(reading.timestamp)
        .bind(reading.wattage)
        .bind(reading.duration_minutes)
        .bind(reading.energy_kwh)
        .bind(reading.cost)
        .execute(&self.pool)
        .await?;

        Ok(reading)
    }

    async fn find_by_device_and_window(
        &self,
        device_id: Uuid,
        window: &TimeWindow,
    ) -> Result<Vec<EnergyReading>> {
        let rows = sqlx::query(
            "SELECT id, device_id, ts, wattage, duration_minutes, energy_kwh, cost
             FROM energy_readings
             WHERE device_id = $1 AND ts >= $2 AND ts <= $3
             ORDER BY ts ASC",
        )
        .bind(device_id)
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(reading_from_row).collect())
    }

    async fn find_by_window(&self, window: &TimeWindow) -> Result<Vec<EnergyReading>> {
        let rows = sqlx::query(
            "SELECT id, device_id, ts, wattage, duration_minutes, energy_kwh, cost
             FROM energy_readings
             WHERE ts >= $1 AND ts <= $2
             ORDER BY ts ASC",
        )
        .bind(window.start)
        .bind(window.end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(reading_from_row).collect())
    }
}
