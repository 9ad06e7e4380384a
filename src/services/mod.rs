pub mod energy;
pub mod prediction;

pub use energy::EnergyService;
pub use prediction::PredictionService;
