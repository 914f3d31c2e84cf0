//! Angle helpers shared by every calculator in the crate.
//!
//! All public angles are in degrees. Radians only appear inside the
//! trigonometric routines and never leak through the API.

/// Normalize an angle into `[0, 360)`.
pub fn norm360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Signed shortest rotation from `a` to `b`, in `(-180, 180]`.
pub fn shortest_delta(a: f64, b: f64) -> f64 {
    let d = norm360(b - a);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Unsigned separation between two longitudes, in `[0, 180]`.
pub fn separation(a: f64, b: f64) -> f64 {
    shortest_delta(a, b).abs()
}

/// Forward (zodiacal) arc from `from` to `to`, in `[0, 360)`.
pub fn forward_arc(from: f64, to: f64) -> f64 {
    norm360(to - from)
}

pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}
