use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::aggregation;
use crate::error::{AppError, Result};
use crate::models::{
    derived_energy_kwh, CategoryUsage, Device, DeviceCategory, EnergyReading, NewDevice,
    ReadingSubmission, UsageTotals,
};
use crate::repositories::{DeviceRepository, ReadingRepository};
use crate::window::{self, Period};

const DEFAULT_DURATION_MINUTES: f64 = 15.0;

/// Device registry plus reading ingest and windowed summaries. Summary
/// methods take an explicit `now` so windows are reproducible under test.
#[derive(Clone)]
pub struct EnergyService {
    devices: Arc<dyn DeviceRepository>,
    readings: Arc<dyn ReadingRepository>,
    unit_rate: f64,
}

impl EnergyService {
    pub fn new(
        devices: Arc<dyn DeviceRepository>,
        readings: Arc<dyn ReadingRepository>,
        unit_rate: f64,
    ) -> Self {
        Self {
            devices,
            readings,
            unit_rate,
        }
    }

    pub async fn register_device(&self, new: NewDevice) -> Result<Device> {
        if new.name.trim().is_empty() {
            return Err(AppError::Validation("Device name must not be empty".to_string()));
        }
        if new.location.trim().is_empty() {
            return Err(AppError::Validation(
                "Device location must not be empty".to_string(),
            ));
        }
        if new.max_wattage <= 0.0 {
            return Err(AppError::Validation(
                "Device maxWattage must be positive".to_string(),
            ));
        }

        let device = Device {
            id: Uuid::new_v4(),
            name: new.name,
            category: new.category,
            location: new.location,
            max_wattage: new.max_wattage,
            is_active: true,
            created_at: Utc::now(),
        };

        self.devices.create(device).await
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>> {
        self.devices.find_all().await
    }

    /// Validates a raw submission, derives the energy and cost fields and
    /// persists the reading. Derived fields are stored with the measurement
    /// so aggregation never recomputes them.
    pub async fn record_reading(&self, submission: ReadingSubmission) -> Result<EnergyReading> {
        if submission.wattage < 0.0 {
            return Err(AppError::InvalidMeasurement(
                "wattage must not be negative".to_string(),
            ));
        }

        let duration_minutes = submission
            .duration_minutes
            .unwrap_or(DEFAULT_DURATION_MINUTES);
        if duration_minutes <= 0.0 {
            return Err(AppError::InvalidMeasurement(
                "duration must be positive".to_string(),
            ));
        }

        self.devices
            .find_by_id(submission.device_id)
            .await?
            .ok_or(AppError::DeviceNotFound(submission.device_id))?;

        let energy_kwh = derived_energy_kwh(submission.wattage, duration_minutes);
        let reading = EnergyReading {
            id: Uuid::new_v4(),
            device_id: submission.device_id,
            timestamp: submission.timestamp.unwrap_or_else(Utc::now),
            wattage: submission.wattage,
            duration_minutes,
            energy_kwh,
            cost: energy_kwh * self.unit_rate,
        };

        self.readings.insert(reading).await
    }

    /// Readings for one device within the resolved period, ascending by
    /// timestamp.
    pub async fn device_readings(
        &self,
        device_id: Uuid,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<Vec<EnergyReading>> {
        self.devices
            .find_by_id(device_id)
            .await?
            .ok_or(AppError::DeviceNotFound(device_id))?;

        let window = window::resolve(period, now);
        self.readings
            .find_by_device_and_window(device_id, &window)
            .await
    }

    pub async fn usage_totals(&self, period: Period, now: DateTime<Utc>) -> Result<UsageTotals> {
        let window = window::resolve(period, now);
        let readings = self.readings.find_by_window(&window).await?;
        Ok(aggregation::window_totals(&readings, &window))
    }

    /// Grouped summary per device category. Readings referencing a device
    /// that no longer resolves are dropped from the result and logged; the
    /// rest of the request still succeeds.
    pub async fn usage_by_category(
        &self,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<Vec<CategoryUsage>> {
        let window = window::resolve(period, now);
        let readings = self.readings.find_by_window(&window).await?;
        let categories = self.category_lookup().await?;

        let breakdown = aggregation::window_totals_by_category(&readings, &categories, &window);
        for device_id in &breakdown.unresolved {
            tracing::warn!(
                %device_id,
                "reading references unknown device, excluded from grouped totals"
            );
        }

        Ok(breakdown.rows)
    }

    /// Inputs for a prediction exchange: all devices plus the readings inside
    /// the resolved window.
    pub async fn prediction_inputs(
        &self,
        period: Period,
        now: DateTime<Utc>,
    ) -> Result<(Vec<EnergyReading>, Vec<Device>)> {
        let window = window::resolve(period, now);
        let readings = self.readings.find_by_window(&window).await?;
        let devices = self.devices.find_all().await?;
        Ok((readings, devices))
    }

    async fn category_lookup(&self) -> Result<HashMap<Uuid, DeviceCategory>> {
        let devices = self.devices.find_all().await?;
        Ok(devices.into_iter().map(|d| (d.id, d.category)).collect())
    }
}
