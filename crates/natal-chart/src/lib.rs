pub mod angles;
pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod houses;
pub mod planets;
pub mod time;
pub mod zodiac;

pub use aspects::{Aspect, AspectCalculator, AspectType, Influence};
pub use chart::{AstroProcessor, ChartLocation, NatalChart, Ready, Uninitialized};
pub use ephemeris::{
    AnalyticEphemeris, Body, EphemerisConfig, EphemerisError, EphemerisProvider, GeoLocation,
    RawPosition,
};
pub use error::ChartError;
pub use houses::{CuspQuality, HouseCalculator, HouseCusp, HouseSystem};
pub use planets::{PlanetCalculator, PlanetPosition};
pub use zodiac::{to_sign, Element, Sign, ZodiacSign};

#[cfg(feature = "swiss")]
pub use ephemeris::SwissEphemerisAdapter;
