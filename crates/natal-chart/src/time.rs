//! Julian day, sidereal time and mean obliquity.
//!
//! Sources: Meeus, "Astronomical Algorithms" (2nd ed), Eq. 12.4 for GMST and
//! Eq. 22.2 (IAU 1980) for the mean obliquity of the ecliptic.

use crate::angles::norm360;
use chrono::{DateTime, Utc};

/// Julian day of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Julian day of J2000.0 (2000-01-01T12:00:00 TT, used here as UT).
pub const J2000_JD: f64 = 2_451_545.0;
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
const SECONDS_PER_DAY: f64 = 86_400.0;

pub const GMST_BASE_DEG: f64 = 280.460_618_37;
pub const GMST_ROTATION_PER_DAY: f64 = 360.985_647_366_29;
const GMST_T2: f64 = 0.000_387_933;
const GMST_T3_DIVISOR: f64 = 38_710_000.0;

/// Mean obliquity at J2000.0 in degrees (84381.448″).
pub const OBLIQUITY_J2000_DEG: f64 = 23.439_291_111;

/// Convert a UTC instant to a Julian day number.
pub fn julian_day(dt: DateTime<Utc>) -> f64 {
    let secs = dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 * 1e-9;
    UNIX_EPOCH_JD + secs / SECONDS_PER_DAY
}

/// Convert a Julian day back to a UTC instant (millisecond resolution).
pub fn julian_day_to_datetime(jd: f64) -> Option<DateTime<Utc>> {
    let millis = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round() as i64;
    DateTime::from_timestamp_millis(millis)
}

/// Julian centuries since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Greenwich mean sidereal time in degrees, `[0, 360)`.
pub fn gmst_deg(jd: f64) -> f64 {
    let d = jd - J2000_JD;
    let t = d / DAYS_PER_JULIAN_CENTURY;
    norm360(GMST_BASE_DEG + GMST_ROTATION_PER_DAY * d + GMST_T2 * t * t - t * t * t / GMST_T3_DIVISOR)
}

/// Greenwich mean sidereal time in hours, `[0, 24)`.
pub fn gmst_hours(jd: f64) -> f64 {
    gmst_deg(jd) / 15.0
}

/// Local sidereal time in degrees for an east-positive longitude.
///
/// `LST = (GMST_h + lon/15) * 15`, normalized to `[0, 360)`. This is also the
/// right ascension of the midheaven (RAMC).
pub fn local_sidereal_time_deg(jd: f64, longitude_east_deg: f64) -> f64 {
    norm360((gmst_hours(jd) + longitude_east_deg / 15.0) * 15.0)
}

/// Mean obliquity of the ecliptic in degrees (IAU 1980 polynomial).
pub fn mean_obliquity_deg(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let arcsec = 84_381.448 + (-46.8150 + (-0.000_59 + 0.001_813 * t) * t) * t;
    arcsec / 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_julian_day_j2000() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((julian_day(dt) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn test_julian_day_round_trip() {
        let dt = Utc.with_ymd_and_hms(1987, 4, 10, 19, 21, 0).unwrap();
        let back = julian_day_to_datetime(julian_day(dt)).unwrap();
        assert_eq!(back, dt);
    }

    #[test]
    fn test_gmst_meeus_example_12a() {
        // 1987 April 10, 0h UT: GMST = 13h10m46.3668s
        let jd = 2_446_895.5;
        let expected_h = 13.0 + 10.0 / 60.0 + 46.3668 / 3600.0;
        assert!((gmst_hours(jd) - expected_h).abs() < 1e-6);
    }

    #[test]
    fn test_gmst_j2000_midnight() {
        // 2000-01-01 0h UT: GMST ≈ 6h39m51s ≈ 99.96°
        let g = gmst_deg(2_451_544.5);
        assert!((g - 99.967).abs() < 0.01, "gmst = {g}");
    }

    #[test]
    fn test_lst_east_offset() {
        let jd = 2_451_545.0;
        let lst = local_sidereal_time_deg(jd, 90.0);
        assert!((lst - norm360(gmst_deg(jd) + 90.0)).abs() < 1e-9);
        let west = local_sidereal_time_deg(jd, -74.0);
        assert!((0.0..360.0).contains(&west));
    }

    #[test]
    fn test_mean_obliquity() {
        assert!((mean_obliquity_deg(J2000_JD) - 23.4393).abs() < 1e-4);
        // drifts down by ~47" per century
        let later = mean_obliquity_deg(J2000_JD + DAYS_PER_JULIAN_CENTURY);
        assert!(later < mean_obliquity_deg(J2000_JD));
        assert!((mean_obliquity_deg(J2000_JD) - later - 46.815 / 3600.0).abs() < 1e-5);
    }
}
