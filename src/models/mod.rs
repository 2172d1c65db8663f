pub mod record;
pub mod subset;
pub mod table;

pub use record::{TempField, TemperatureRecord};
pub use subset::SameDaySubset;
pub use table::TemperatureTable;
