use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Device, DeviceCategory};

/// Device registry boundary. The engine owns no locks over the store; it only
/// issues requests against whichever implementation is injected.
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    async fn create(&self, device: Device) -> Result<Device>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Device>>;
    async fn find_all(&self) -> Result<Vec<Device>>;
}

#[derive(Clone)]
pub struct PostgresDeviceRepository {
    pool: DbPool,
}

impl PostgresDeviceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn device_from_row(row: &PgRow) -> Result<Device> {
    let category: String = row.get("category");
    let category = category
        .parse::<DeviceCategory>()
        .map_err(AppError::Internal)?;

    Ok(Device {
        id: row.get("id"),
        name: row.get("name"),
        category,
        location: row.get("location"),
        max_wattage: row.get("max_wattage"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
    })
}

#[async_trait]
impl DeviceRepository for PostgresDeviceRepository {
    async fn create(&self, device: Device) -> Result<Device> {
        sqlx::query(
            "INSERT INTO devices (id, name, category, location, max_wattage, is_active, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(device.id)
        .bind(&device.name)
        .bind(device.category.as_str())
        .bind(&device.location)
        .bind(device.max_wattage)
        .bind(device.is_active)
        .bind(device.created_at)
        .execute(&self.pool)
        .await?;

        Ok(device)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Device>> {
        let row = sqlx::query(
            "SELECT id, name, category, location, max_wattage, is_active, created_at
             FROM devices WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(device_from_row).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Device>> {
        let rows = sqlx::query(
            "SELECT id, name, category, location, max_wattage, is_active, created_at
             FROM devices ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(device_from_row).collect()
    }
}
