//! Ascendant and Midheaven.
//!
//! Closed-form spherical astronomy (Meeus ch. 13/14): both angles follow
//! from the local sidereal time, the obliquity and the geographic latitude.

use crate::angles::norm360;
use crate::houses::types::ChartAngles;
use crate::time::local_sidereal_time_deg;

/// Ecliptic longitude culminating on the meridian.
///
/// `MC = atan(tan(LST) / cos(eps))`, placed in the same half of the circle
/// as the LST. `atan2(sin LST, cos LST cos eps)` does the quadrant
/// correction in one step.
pub fn midheaven_deg(lst_deg: f64, obliquity_deg: f64) -> f64 {
    let lst = lst_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    norm360(f64::atan2(lst.sin(), lst.cos() * eps.cos()).to_degrees())
}

/// Ecliptic longitude rising on the eastern horizon.
///
/// `ASC = atan2(-cos LST, sin eps tan phi + cos eps sin LST) + 180°`.
/// Without the half-turn the formula yields the descendant.
pub fn ascendant_deg(lst_deg: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    let lst = lst_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    let phi = latitude_deg.to_radians();
    let raw = f64::atan2(-lst.cos(), eps.sin() * phi.tan() + eps.cos() * lst.sin());
    norm360(raw.to_degrees() + 180.0)
}

/// All four angles from a local sidereal time.
pub fn angles_from_lst(lst_deg: f64, latitude_deg: f64, obliquity_deg: f64) -> ChartAngles {
    let ascendant = ascendant_deg(lst_deg, latitude_deg, obliquity_deg);
    let midheaven = midheaven_deg(lst_deg, obliquity_deg);
    ChartAngles {
        ascendant,
        midheaven,
        descendant: norm360(ascendant + 180.0),
        imum_coeli: norm360(midheaven + 180.0),
        ramc: norm360(lst_deg),
        obliquity: obliquity_deg,
    }
}

/// Angles for an instant and place.
pub fn compute_angles(jd: f64, latitude_deg: f64, longitude_deg: f64, obliquity_deg: f64) -> ChartAngles {
    let lst = local_sidereal_time_deg(jd, longitude_deg);
    angles_from_lst(lst, latitude_deg, obliquity_deg)
}
