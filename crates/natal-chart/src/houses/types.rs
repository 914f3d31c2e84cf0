use crate::error::ChartError;
use crate::zodiac::ZodiacSign;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported house division systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseSystem {
    WholeSign,
    Equal,
    Placidus,
}

impl HouseSystem {
    pub const ALL: [HouseSystem; 3] = [HouseSystem::WholeSign, HouseSystem::Equal, HouseSystem::Placidus];

    pub fn name(self) -> &'static str {
        match self {
            HouseSystem::WholeSign => "whole_sign",
            HouseSystem::Equal => "equal",
            HouseSystem::Placidus => "placidus",
        }
    }
}

impl Default for HouseSystem {
    fn default() -> Self {
        HouseSystem::Placidus
    }
}

impl fmt::Display for HouseSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HouseSystem {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase().replace(['-', ' '], "_");
        match lower.as_str() {
            "whole_sign" | "whole" => Ok(HouseSystem::WholeSign),
            "equal" => Ok(HouseSystem::Equal),
            "placidus" => Ok(HouseSystem::Placidus),
            _ => Err(ChartError::InvalidHouseSystem {
                system: s.to_string(),
                valid: HouseSystem::ALL.iter().map(|h| h.name().to_string()).collect(),
            }),
        }
    }
}

/// How a cusp position was obtained.
///
/// Only Placidus can produce anything but `Exact`: inside the polar circles
/// the semi-arc of some ecliptic degrees is undefined and the cusp falls
/// back to an approximation instead of failing the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CuspQuality {
    /// Closed form, or a bracketed and bisected root
    Exact,
    /// No bracket found; the scan sample with the smallest residual
    BestSample,
    /// Evenly spaced inside its quadrant
    Interpolated,
}

impl CuspQuality {
    pub fn is_approximate(self) -> bool {
        self != CuspQuality::Exact
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// House number, 1..=12
    pub house: u8,
    /// Ecliptic longitude of the cusp (0-360)
    pub position: f64,
    #[serde(rename = "zodiacSign")]
    pub zodiac_sign: ZodiacSign,
    pub quality: CuspQuality,
}

/// Angles of the chart plus the sidereal inputs they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartAngles {
    pub ascendant: f64,
    pub midheaven: f64,
    pub descendant: f64,
    pub imum_coeli: f64,
    /// Local sidereal time in degrees, equal to the RA of the midheaven
    pub ramc: f64,
    /// Obliquity of the ecliptic used, in degrees
    pub obliquity: f64,
}
