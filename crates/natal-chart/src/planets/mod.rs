pub mod calculator;
pub mod types;

pub use calculator::{PlanetCalculator, SPEED_STEP_DAYS};
pub use types::PlanetPosition;
