pub mod devices;
pub mod energy;
pub mod prediction;

use crate::services::{EnergyService, PredictionService};

#[derive(Clone)]
pub struct AppState {
    pub energy: EnergyService,
    pub predictor: PredictionService,
}
