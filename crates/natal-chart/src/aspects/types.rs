use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Aspect kinds recognised between planets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Quincunx,
    Opposition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Influence {
    Positive,
    Negative,
    Neutral,
}

impl AspectType {
    pub const ALL: [AspectType; 6] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Quincunx,
        AspectType::Opposition,
    ];

    /// Exact separation for this aspect, degrees
    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Quincunx => 150.0,
            AspectType::Opposition => 180.0,
        }
    }

    /// Allowed deviation from the exact angle, degrees
    pub fn max_orb(self) -> f64 {
        match self {
            AspectType::Conjunction | AspectType::Opposition => 8.0,
            AspectType::Square | AspectType::Trine => 6.0,
            AspectType::Sextile => 4.0,
            AspectType::Quincunx => 3.0,
        }
    }

    pub fn influence(self) -> Influence {
        match self {
            AspectType::Trine | AspectType::Sextile => Influence::Positive,
            AspectType::Square | AspectType::Opposition => Influence::Negative,
            AspectType::Conjunction | AspectType::Quincunx => Influence::Neutral,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Sextile => "sextile",
            AspectType::Square => "square",
            AspectType::Trine => "trine",
            AspectType::Quincunx => "quincunx",
            AspectType::Opposition => "opposition",
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Core aspect information for a pair of longitudes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectCore {
    #[serde(rename = "type")]
    pub aspect_type: AspectType,
    /// Orb value (deviation from exact angle)
    pub orb: f64,
    /// Whether the aspect is exact (orb under half a degree)
    pub exact: bool,
}

/// An aspect between two planets of one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub planet1: Body,
    pub planet2: Body,
    /// `norm360(lon2 - lon1)`
    pub angle: f64,
    #[serde(rename = "type")]
    pub aspect_type: AspectType,
    pub orb: f64,
    pub exact: bool,
    pub influence: Influence,
    /// Whether the planets are moving towards the exact angle
    pub applying: bool,
}
