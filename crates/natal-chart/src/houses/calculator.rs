use crate::angles::norm360;
use crate::ephemeris::EphemerisProvider;
use crate::houses::angles::compute_angles;
use crate::houses::placidus::placidus_cusps;
use crate::houses::types::{ChartAngles, CuspQuality, HouseCusp, HouseSystem};
use crate::time::mean_obliquity_deg;
use crate::zodiac::to_sign;
use log::debug;

/// House and angle calculator.
///
/// Stateless: the house system is an argument of every call, so one
/// calculator can serve any number of concurrent charts.
pub struct HouseCalculator;

impl HouseCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Obliquity for `jd`: the provider's value when it has one, the mean
    /// obliquity polynomial otherwise.
    pub fn obliquity<P: EphemerisProvider + ?Sized>(&self, provider: &P, jd: f64) -> f64 {
        provider
            .obliquity(jd)
            .unwrap_or_else(|| mean_obliquity_deg(jd))
    }

    /// Ascendant, midheaven and their opposites for an instant and place.
    pub fn compute_asc_mc(&self, jd: f64, latitude: f64, longitude: f64, obliquity: f64) -> ChartAngles {
        let angles = compute_angles(jd, latitude, longitude, obliquity);
        debug!(
            "LST {:.4}°, obliquity {:.5}°, ASC {:.4}°, MC {:.4}°",
            angles.ramc, angles.obliquity, angles.ascendant, angles.midheaven
        );
        angles
    }

    /// Twelve cusps, house 1 first.
    pub fn build_houses(&self, system: HouseSystem, angles: &ChartAngles, latitude: f64) -> Vec<HouseCusp> {
        let positions: [(f64, CuspQuality); 12] = match system {
            HouseSystem::WholeSign => {
                let first = (angles.ascendant / 30.0).floor() * 30.0;
                std::array::from_fn(|i| (norm360(first + 30.0 * i as f64), CuspQuality::Exact))
            }
            HouseSystem::Equal => {
                std::array::from_fn(|i| (norm360(angles.ascendant + 30.0 * i as f64), CuspQuality::Exact))
            }
            HouseSystem::Placidus => placidus_cusps(angles, latitude),
        };
        debug!("Built {} houses at latitude {:.4}", system, latitude);

        positions
            .iter()
            .enumerate()
            .map(|(i, &(position, quality))| HouseCusp {
                house: (i + 1) as u8,
                position,
                zodiac_sign: to_sign(position),
                quality,
            })
            .collect()
    }
}

impl Default for HouseCalculator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::houses::angles::angles_from_lst;

    #[test]
    fn test_whole_sign_starts_at_rising_sign() {
        let angles = angles_from_lst(45.0, 51.5, 23.4393);
        let houses = HouseCalculator::new().build_houses(HouseSystem::WholeSign, &angles, 51.5);
        // ASC ≈ 148.39 (Leo) -> first house begins at 120
        assert_eq!(houses[0].position, 120.0);
        assert_eq!(houses[11].position, 90.0);
        assert!(houses.iter().all(|h| h.position % 30.0 == 0.0));
    }

    #[test]
    fn test_equal_offsets_from_ascendant() {
        let angles = angles_from_lst(300.0, 40.0, 23.4393);
        let houses = HouseCalculator::new().build_houses(HouseSystem::Equal, &angles, 40.0);
        for (i, h) in houses.iter().enumerate() {
            assert_eq!(h.house as usize, i + 1);
            assert_eq!(h.position, norm360(angles.ascendant + 30.0 * i as f64));
            assert_eq!(h.quality, CuspQuality::Exact);
        }
    }
}
