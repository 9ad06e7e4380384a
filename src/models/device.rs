use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Classification used for grouped aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceCategory {
    Light,
    Hvac,
    Appliance,
    Electronics,
    Other,
}

impl DeviceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceCategory::Light => "light",
            DeviceCategory::Hvac => "hvac",
            DeviceCategory::Appliance => "appliance",
            DeviceCategory::Electronics => "electronics",
            DeviceCategory::Other => "other",
        }
    }
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(DeviceCategory::Light),
            "hvac" => Ok(DeviceCategory::Hvac),
            "appliance" => Ok(DeviceCategory::Appliance),
            "electronics" => Ok(DeviceCategory::Electronics),
            "other" => Ok(DeviceCategory::Other),
            other => Err(format!("unknown device category: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub category: DeviceCategory,
    pub location: String,
    pub max_wattage: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Registration payload for a new device.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDevice {
    pub name: String,
    #[serde(rename = "type")]
    pub category: DeviceCategory,
    pub location: String,
    pub max_wattage: f64,
}
