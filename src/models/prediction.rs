use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Device, EnergyReading};

/// Payload handed to the external predictor on its standard input.
/// Transient, rebuilt per call, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    pub readings: Vec<EnergyReading>,
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictedPoint {
    pub timestamp: DateTime<Utc>,
    pub predicted_wattage: f64,
}

/// Single JSON document expected on the predictor's standard output when it
/// exits 0. Exit code 0 with anything else on stdout is a parse error, not a
/// pass-through.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    pub predictions: Vec<PredictedPoint>,
    pub success: bool,
}
