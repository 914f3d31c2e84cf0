use crate::ephemeris::Body;
use crate::zodiac::ZodiacSign;
use serde::{Deserialize, Serialize};

/// Planetary position data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetPosition {
    #[serde(rename = "name")]
    pub body: Body,
    /// Longitude in degrees (0-360)
    pub longitude: f64,
    /// Latitude in degrees
    pub latitude: f64,
    /// Geocentric distance in AU
    pub distance: f64,
    /// Speed in longitude (degrees per day)
    pub speed: f64,
    /// Whether the planet is retrograde
    pub retrograde: bool,
    #[serde(rename = "zodiacSign")]
    pub zodiac_sign: ZodiacSign,
}
