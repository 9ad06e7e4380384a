pub mod device;
pub mod energy;
pub mod prediction;

pub use device::{Device, DeviceCategory, NewDevice};
pub use energy::{derived_energy_kwh, CategoryUsage, EnergyReading, ReadingSubmission, UsageTotals};
pub use prediction::{PredictedPoint, PredictionRequest, PredictionResponse};
