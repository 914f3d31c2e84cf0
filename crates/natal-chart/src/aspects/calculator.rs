use crate::angles::{norm360, shortest_delta};
use crate::aspects::types::{Aspect, AspectCore, AspectType};
use crate::planets::PlanetPosition;

/// Orb under which an aspect counts as exact, degrees
pub const EXACT_ORB: f64 = 0.5;

/// Aspect calculator
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// Aspects between every pair of planets.
    ///
    /// Pairs keep the list order: `planet1` always precedes `planet2` in
    /// `planets`. Pairs outside every orb produce nothing.
    pub fn calculate_aspects(&self, planets: &[PlanetPosition]) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..planets.len() {
            for j in (i + 1)..planets.len() {
                let p1 = &planets[i];
                let p2 = &planets[j];

                if let Some(core) = self.calculate_aspect(p1.longitude, p2.longitude) {
                    aspects.push(Aspect {
                        planet1: p1.body,
                        planet2: p2.body,
                        angle: norm360(p2.longitude - p1.longitude),
                        aspect_type: core.aspect_type,
                        orb: core.orb,
                        exact: core.exact,
                        influence: core.aspect_type.influence(),
                        applying: self.is_aspect_applying(
                            p1.longitude,
                            p2.longitude,
                            p1.speed,
                            p2.speed,
                            core.aspect_type.angle(),
                        ),
                    });
                }
            }
        }
        aspects
    }

    /// Classify the separation between two longitudes.
    pub fn calculate_aspect(&self, lon1: f64, lon2: f64) -> Option<AspectCore> {
        let angle = norm360(lon2 - lon1);
        // compare along the shorter way round: angle or 360 - angle
        let separation = angle.min(360.0 - angle);

        AspectType::ALL.iter().find_map(|&aspect_type| {
            let orb = (separation - aspect_type.angle()).abs();
            (orb <= aspect_type.max_orb()).then_some(AspectCore {
                aspect_type,
                orb,
                exact: orb < EXACT_ORB,
            })
        })
    }

    /// Determine if an aspect is applying (approaching exact) or separating
    fn is_aspect_applying(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
        aspect_angle: f64,
    ) -> bool {
        let relative_speed = speed2 - speed1;
        let current = shortest_delta(lon1, lon2).abs();

        // Project forward a small amount to see if we're getting closer to exact
        let time_step = 0.1; // days
        let future = shortest_delta(lon1, lon2 + relative_speed * time_step).abs();

        (future - aspect_angle).abs() < (current - aspect_angle).abs()
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries_of_orbs() {
        let calc = AspectCalculator::new();
        assert_eq!(calc.calculate_aspect(0.0, 8.0).unwrap().aspect_type, AspectType::Conjunction);
        assert!(calc.calculate_aspect(0.0, 8.5).is_none());
        assert_eq!(calc.calculate_aspect(0.0, 147.0).unwrap().aspect_type, AspectType::Quincunx);
        assert!(calc.calculate_aspect(0.0, 146.5).is_none());
        assert!(calc.calculate_aspect(0.0, 30.0).is_none());
    }

    #[test]
    fn test_shorter_way_round() {
        let calc = AspectCalculator::new();
        // 350 -> 50 is 60° through Aries
        let core = calc.calculate_aspect(350.0, 50.0).unwrap();
        assert_eq!(core.aspect_type, AspectType::Sextile);
        assert!(core.orb.abs() < 1e-9);
        // 300° forward is also 60° the short way
        let core = calc.calculate_aspect(10.0, 310.0).unwrap();
        assert_eq!(core.aspect_type, AspectType::Sextile);
    }

    #[test]
    fn test_applying_and_separating() {
        let calc = AspectCalculator::new();
        // fast body 2° behind a square, closing in
        assert!(calc.is_aspect_applying(0.0, 88.0, 0.0, 1.0, 90.0));
        // same body 2° past the square, moving away
        assert!(!calc.is_aspect_applying(0.0, 92.0, 0.0, 1.0, 90.0));
    }
}
