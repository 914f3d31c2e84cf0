pub mod angles;
pub mod calculator;
pub mod placidus;
pub mod types;

pub use calculator::HouseCalculator;
pub use types::{ChartAngles, CuspQuality, HouseCusp, HouseSystem};
