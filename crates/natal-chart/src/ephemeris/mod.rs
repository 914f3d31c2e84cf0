pub mod analytic;
pub mod provider;
pub mod types;

#[cfg(feature = "swiss")]
pub mod adapter;

pub use analytic::AnalyticEphemeris;
pub use provider::{EphemerisError, EphemerisProvider};
pub use types::{Body, EphemerisConfig, GeoLocation, RawPosition};

#[cfg(feature = "swiss")]
pub use adapter::SwissEphemerisAdapter;
