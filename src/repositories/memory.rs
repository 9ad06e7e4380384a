//! In-memory store, used by the integration tests and by deployments that
//! run without Postgres. Same trait surface as the Postgres implementations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Device, EnergyReading};
use crate::window::TimeWindow;

use super::{DeviceRepository, ReadingRepository};

#[derive(Default)]
pub struct InMemoryDeviceRepository {
    devices: RwLock<HashMap<Uuid, Device>>,
}

impl InMemoryDeviceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AppError {
    AppError::Internal("in-memory store lock poisoned".to_string())
}

#[async_trait]
impl DeviceRepository for InMemoryDeviceRepository {
    async fn create(&self, device: Device) -> Result<Device> {
        let mut devices = self.devices.write().map_err(|_| poisoned())?;
        devices.insert(device.id, device.clone());
        Ok(device)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Device>> {
        let devices = self.devices.read().map_err(|_| poisoned())?;
        Ok(devices.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Device>> {
        let devices = self.devices.read().map_err(|_| poisoned())?;
        let mut all: Vec<Device> = devices.values().cloned().collect();
        all.sort_by_key(|d| d.created_at);
        Ok(all)
    }
}

#[derive(Default)]
pub struct InMemoryReadingRepository {
    readings: RwLock<Vec<EnergyReading>>,
}

impl InMemoryReadingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReadingRepository for InMemoryReadingRepository {
    async fn insert(&self, reading: EnergyReading) -> Result<EnergyReading> {
        let mut readings = self.readings.write().map_err(|_| poisoned())?;
        readings.push(reading.clone());
        Ok(reading)
    }

    async fn find_by_device_and_window(
        &self,
        device_id: Uuid,
        window: &TimeWindow,
    ) -> Result<Vec<EnergyReading>> {
        let readings = self.readings.read().map_err(|_| poisoned())?;
        let mut matched: Vec<EnergyReading> = readings
            .iter()
            .filter(|r| r.device_id == device_id && window.contains(r.timestamp))
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.timestamp);
        Ok(matched)
    }

    async fn find_by_window(&self, window: &TimeWindow) -> Result<Vec<EnergyReading>> {
        let readings = self.readings.read().map_err(|_| poisoned())?;
        let mut matched: Vec<EnergyReading> = readings
            .iter()
            .filter(|r| window.contains(r.timestamp))
            .cloned()
            .collect();
        matched.sort_by_key(|r| r.timestamp);
        Ok(matched)
    }
}
