pub mod devices;
pub mod memory;
pub mod readings;

pub use devices::{DeviceRepository, PostgresDeviceRepository};
pub use memory::{InMemoryDeviceRepository, InMemoryReadingRepository};
pub use readings::{PostgresReadingRepository, ReadingRepository};
