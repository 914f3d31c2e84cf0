use crate::ephemeris::EphemerisError;
use thiserror::Error;

/// Errors surfaced by chart computation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Chart requested before the ephemeris provider was initialized")]
    Uninitialized,
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
}
