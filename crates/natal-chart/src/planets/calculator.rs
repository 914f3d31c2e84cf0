use crate::angles::{norm360, shortest_delta};
use crate::ephemeris::{Body, EphemerisError, EphemerisProvider};
use crate::planets::types::PlanetPosition;
use crate::zodiac::to_sign;

/// Finite-difference step for longitudinal speed: one hour, in days.
pub const SPEED_STEP_DAYS: f64 = 1.0 / 24.0;

/// Derives chart-ready planet positions from raw provider output.
pub struct PlanetCalculator<'a, P: EphemerisProvider + ?Sized> {
    provider: &'a P,
}

impl<'a, P: EphemerisProvider + ?Sized> PlanetCalculator<'a, P> {
    pub fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// Position, speed and placement of one body at Julian day `jd`.
    ///
    /// Speed is a forward difference over [`SPEED_STEP_DAYS`] taken through
    /// the shortest angular delta, so a 359°→0° crossing reads as direct
    /// motion.
    pub fn position(&self, jd: f64, body: Body) -> Result<PlanetPosition, EphemerisError> {
        let now = self.provider.position(jd, body)?;
        let later = self.provider.position(jd + SPEED_STEP_DAYS, body)?;

        let longitude = norm360(now.longitude);
        let speed = shortest_delta(longitude, later.longitude) / SPEED_STEP_DAYS;

        Ok(PlanetPosition {
            body,
            longitude,
            latitude: now.latitude,
            distance: now.distance,
            speed,
            retrograde: speed < 0.0,
            zodiac_sign: to_sign(longitude),
        })
    }

    /// All tracked bodies, Sun through Pluto.
    pub fn all_positions(&self, jd: f64) -> Result<Vec<PlanetPosition>, EphemerisError> {
        Body::ALL
            .iter()
            .map(|&body| self.position(jd, body))
            .collect()
    }
}
