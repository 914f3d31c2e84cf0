use crate::angles::forward_arc;
use crate::ephemeris::Body;
use crate::houses::HouseCusp;
use crate::planets::PlanetPosition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Birth place as stored on a chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLocation {
    pub latitude: f64,
    pub longitude: f64,
    /// UTC offset in hours; kept for display, never used in computation
    pub timezone: f64,
}

/// A computed natal chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NatalChart {
    pub planets: Vec<PlanetPosition>,
    pub houses: Vec<HouseCusp>,
    pub ascendant: f64,
    pub midheaven: f64,
    pub date: DateTime<Utc>,
    pub location: ChartLocation,
}

impl NatalChart {
    /// Position of `body`, if the chart tracks it.
    pub fn planet(&self, body: Body) -> Option<&PlanetPosition> {
        self.planets.iter().find(|p| p.body == body)
    }

    /// House (1-12) containing `longitude`.
    ///
    /// A house runs from its cusp up to the next cusp, so the span of house
    /// 12 may cross 0° Aries.
    pub fn house_of(&self, longitude: f64) -> u8 {
        let n = self.houses.len();
        for i in 0..n {
            let start = self.houses[i].position;
            let end = self.houses[(i + 1) % n].position;
            let span = forward_arc(start, end);
            if span > 0.0 && forward_arc(start, longitude) < span {
                return self.houses[i].house;
            }
        }
        // only reachable when every cusp coincides
        self.houses.first().map(|h| h.house).unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::houses::CuspQuality;
    use crate::zodiac::to_sign;

    fn chart_with_cusps(positions: [f64; 12]) -> NatalChart {
        NatalChart {
            planets: Vec::new(),
            houses: positions
                .iter()
                .enumerate()
                .map(|(i, &position)| HouseCusp {
                    house: (i + 1) as u8,
                    position,
                    zodiac_sign: to_sign(position),
                    quality: CuspQuality::Exact,
                })
                .collect(),
            ascendant: positions[0],
            midheaven: positions[9],
            date: DateTime::<Utc>::UNIX_EPOCH,
            location: ChartLocation {
                latitude: 0.0,
                longitude: 0.0,
                timezone: 0.0,
            },
        }
    }

    #[test]
    fn test_house_of_across_aries_point() {
        let cusps: [f64; 12] = std::array::from_fn(|i| (300.0 + 30.0 * i as f64) % 360.0);
        let chart = chart_with_cusps(cusps);
        assert_eq!(chart.house_of(300.0), 1);
        assert_eq!(chart.house_of(345.0), 2);
        // second house spans 330..0
        assert_eq!(chart.house_of(359.9), 2);
        assert_eq!(chart.house_of(0.0), 3);
        assert_eq!(chart.house_of(299.9), 12);
    }

    #[test]
    fn test_planet_lookup_missing() {
        let chart = chart_with_cusps(std::array::from_fn(|i| 30.0 * i as f64));
        assert!(chart.planet(Body::Sun).is_none());
    }
}
