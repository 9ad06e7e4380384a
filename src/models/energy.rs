use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::DeviceCategory;

/// kWh produced by `wattage` watts sustained for `duration_minutes` minutes.
pub fn derived_energy_kwh(wattage: f64, duration_minutes: f64) -> f64 {
    wattage * duration_minutes / 60_000.0
}

/// A single stored measurement. `energy_kwh` and `cost` are derived once at
/// ingest time and never recomputed downstream, so later unit-rate changes
/// cannot drift historical data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyReading {
    pub id: Uuid,
    pub device_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub wattage: f64,
    #[serde(rename = "duration")]
    pub duration_minutes: f64,
    #[serde(rename = "energyKWh")]
    pub energy_kwh: f64,
    pub cost: f64,
}

/// Raw reading submission, before validation and derivation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingSubmission {
    pub device_id: Uuid,
    pub wattage: f64,
    #[serde(rename = "duration")]
    pub duration_minutes: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageTotals {
    pub total_energy: f64,
    pub total_cost: f64,
}

impl UsageTotals {
    pub fn zero() -> Self {
        Self {
            total_energy: 0.0,
            total_cost: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUsage {
    #[serde(rename = "type")]
    pub category: DeviceCategory,
    pub total_energy: f64,
    pub total_cost: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_energy_matches_formula() {
        // 1000 W for 30 minutes is half a kWh
        assert_eq!(derived_energy_kwh(1000.0, 30.0), 0.5);
        // default 15-minute sample of a 60 W bulb
        assert_eq!(derived_energy_kwh(60.0, 15.0), 60.0 * 15.0 / 60_000.0);
        assert_eq!(derived_energy_kwh(0.0, 15.0), 0.0);
    }

    #[test]
    fn cost_is_energy_times_rate() {
        let energy = derived_energy_kwh(1000.0, 30.0);
        assert_eq!(energy * 0.15, 0.075);
    }
}
