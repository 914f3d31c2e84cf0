//! Placidus house cusps.
//!
//! Placidus trisects each quadrant in *time*: an intermediate cusp is the
//! ecliptic degree whose distance from the meridian, measured in right
//! ascension, is a fixed fraction of its own semi-arc (diurnal above the
//! horizon, nocturnal below). The semi-arc depends on the degree's
//! declination, so there is no closed form and each cusp is found
//! numerically:
//!
//! 1. scan the quadrant's longitude interval for a sign change of the
//!    residual,
//! 2. bisect the first valid bracket down to [`ROOT_TOLERANCE_DEG`] or
//!    [`MAX_BISECTIONS`] steps,
//! 3. with no bracket, take the scan sample with the smallest residual if it
//!    is within [`BEST_SAMPLE_TOLERANCE_DEG`],
//! 4. otherwise place the cusp evenly inside its quadrant.
//!
//! Steps 3 and 4 only happen inside the polar circles, where the semi-arc of
//! some degrees is undefined (they never rise or never set). The chart is
//! still returned; the affected cusps carry a non-exact [`CuspQuality`]. No
//! error bound is claimed for those cusps.

use crate::angles::{forward_arc, norm360, shortest_delta};
use crate::houses::types::{ChartAngles, CuspQuality};
use log::warn;

/// Samples taken across a quadrant when looking for a bracket.
pub const SCAN_SAMPLES: usize = 180;
pub const MAX_BISECTIONS: usize = 60;
/// Bracket width at which bisection stops, in degrees of longitude.
pub const ROOT_TOLERANCE_DEG: f64 = 1e-7;
/// Largest residual accepted from the best-sample fallback, in degrees.
pub const BEST_SAMPLE_TOLERANCE_DEG: f64 = 1.0;

/// A bracket whose residual jumps more than this between neighbouring
/// samples straddles the ±180° discontinuity, not a root.
const MAX_SAMPLE_JUMP_DEG: f64 = 45.0;
/// Residual a bisected root must reach to count as exact.
const ROOT_CHECK_DEG: f64 = 1e-3;

/// Declination of an ecliptic degree (zero ecliptic latitude).
pub fn declination_deg(longitude_deg: f64, obliquity_deg: f64) -> f64 {
    let lam = longitude_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    (eps.sin() * lam.sin()).asin().to_degrees()
}

/// Right ascension of an ecliptic degree, `[0, 360)`.
pub fn right_ascension_deg(longitude_deg: f64, obliquity_deg: f64) -> f64 {
    let lam = longitude_deg.to_radians();
    let eps = obliquity_deg.to_radians();
    norm360(f64::atan2(lam.sin() * eps.cos(), lam.cos()).to_degrees())
}

/// Diurnal semi-arc in degrees: `acos(-tan(lat) tan(dec))`.
///
/// NaN when `|tan(lat) tan(dec)| > 1`, i.e. the point is circumpolar or
/// never rises.
pub fn semi_arc_deg(declination_deg: f64, latitude_deg: f64) -> f64 {
    let x = -latitude_deg.to_radians().tan() * declination_deg.to_radians().tan();
    if x.abs() > 1.0 {
        return f64::NAN;
    }
    x.acos().to_degrees()
}

/// Diurnal semi-arc of an ecliptic degree.
pub fn ecliptic_semi_arc_deg(longitude_deg: f64, latitude_deg: f64, obliquity_deg: f64) -> f64 {
    semi_arc_deg(declination_deg(longitude_deg, obliquity_deg), latitude_deg)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quadrant {
    /// Houses 10-12, above the horizon, east of the meridian
    MidheavenToAscendant,
    /// Houses 1-3, below the horizon, east
    AscendantToImumCoeli,
    /// Houses 4-6, below the horizon, west
    ImumCoeliToDescendant,
    /// Houses 7-9, above the horizon, west
    DescendantToMidheaven,
}

/// One intermediate cusp to solve for.
#[derive(Debug, Clone, Copy)]
struct CuspTarget {
    house: u8,
    quadrant: Quadrant,
    /// Progress through the quadrant in zodiacal order, 1/3 or 2/3
    fraction: f64,
}

const TARGETS: [CuspTarget; 8] = [
    CuspTarget { house: 11, quadrant: Quadrant::MidheavenToAscendant, fraction: 1.0 / 3.0 },
    CuspTarget { house: 12, quadrant: Quadrant::MidheavenToAscendant, fraction: 2.0 / 3.0 },
    CuspTarget { house: 2, quadrant: Quadrant::AscendantToImumCoeli, fraction: 1.0 / 3.0 },
    CuspTarget { house: 3, quadrant: Quadrant::AscendantToImumCoeli, fraction: 2.0 / 3.0 },
    CuspTarget { house: 5, quadrant: Quadrant::ImumCoeliToDescendant, fraction: 1.0 / 3.0 },
    CuspTarget { house: 6, quadrant: Quadrant::ImumCoeliToDescendant, fraction: 2.0 / 3.0 },
    CuspTarget { house: 8, quadrant: Quadrant::DescendantToMidheaven, fraction: 1.0 / 3.0 },
    CuspTarget { house: 9, quadrant: Quadrant::DescendantToMidheaven, fraction: 2.0 / 3.0 },
];

struct Solver<'a> {
    angles: &'a ChartAngles,
    latitude: f64,
}

impl<'a> Solver<'a> {
    fn bounds(&self, quadrant: Quadrant) -> (f64, f64) {
        let a = self.angles;
        match quadrant {
            Quadrant::MidheavenToAscendant => (a.midheaven, a.ascendant),
            Quadrant::AscendantToImumCoeli => (a.ascendant, a.imum_coeli),
            Quadrant::ImumCoeliToDescendant => (a.imum_coeli, a.descendant),
            Quadrant::DescendantToMidheaven => (a.descendant, a.midheaven),
        }
    }

    /// Meridian distance minus the required share of the semi-arc.
    ///
    /// Zero at the cusp; NaN where the semi-arc is undefined.
    fn residual(&self, target: &CuspTarget, longitude: f64) -> f64 {
        let eps = self.angles.obliquity;
        let ramc = self.angles.ramc;
        let raic = norm360(ramc + 180.0);
        let ra = right_ascension_deg(longitude, eps);
        let diurnal = ecliptic_semi_arc_deg(longitude, self.latitude, eps);
        let nocturnal = 180.0 - diurnal;
        let k = target.fraction;

        match target.quadrant {
            Quadrant::MidheavenToAscendant => shortest_delta(ramc, ra) - k * diurnal,
            Quadrant::AscendantToImumCoeli => shortest_delta(ra, raic) - (1.0 - k) * nocturnal,
            Quadrant::ImumCoeliToDescendant => shortest_delta(raic, ra) - k * nocturnal,
            Quadrant::DescendantToMidheaven => shortest_delta(ra, ramc) - (1.0 - k) * diurnal,
        }
    }

    fn solve(&self, target: &CuspTarget) -> (f64, CuspQuality) {
        let (start, end) = self.bounds(target.quadrant);
        let arc = forward_arc(start, end);
        let step = arc / SCAN_SAMPLES as f64;

        let samples: Vec<(f64, f64)> = (0..=SCAN_SAMPLES)
            .map(|i| {
                let offset = i as f64 * step;
                (offset, self.residual(target, norm360(start + offset)))
            })
            .collect();

        for pair in samples.windows(2) {
            let (lo, f_lo) = pair[0];
            let (hi, f_hi) = pair[1];
            if !f_lo.is_finite() || !f_hi.is_finite() {
                continue;
            }
            if f_lo == 0.0 {
                return (norm360(start + lo), CuspQuality::Exact);
            }
            if (f_lo < 0.0) == (f_hi < 0.0) || (f_lo - f_hi).abs() > MAX_SAMPLE_JUMP_DEG {
                continue;
            }
            if let Some(root) = self.bisect(target, start, lo, hi, f_lo) {
                return (root, CuspQuality::Exact);
            }
        }

        let best = samples
            .iter()
            .filter(|(_, f)| f.is_finite())
            .min_by(|a, b| a.1.abs().total_cmp(&b.1.abs()));
        if let Some(&(offset, f)) = best {
            if f.abs() <= BEST_SAMPLE_TOLERANCE_DEG {
                warn!(
                    "Placidus cusp {} has no bracketed root at latitude {:.2}; using best sample (residual {:.4}°)",
                    target.house, self.latitude, f
                );
                return (norm360(start + offset), CuspQuality::BestSample);
            }
        }

        warn!(
            "Placidus cusp {} undefined at latitude {:.2}; spacing it evenly in its quadrant",
            target.house, self.latitude
        );
        (norm360(start + target.fraction * arc), CuspQuality::Interpolated)
    }

    /// Bisect a bracket given as offsets from `start`.
    fn bisect(&self, target: &CuspTarget, start: f64, mut lo: f64, mut hi: f64, mut f_lo: f64) -> Option<f64> {
        for _ in 0..MAX_BISECTIONS {
            if hi - lo < ROOT_TOLERANCE_DEG {
                break;
            }
            let mid = 0.5 * (lo + hi);
            let f_mid = self.residual(target, norm360(start + mid));
            if !f_mid.is_finite() {
                return None;
            }
            if (f_mid < 0.0) == (f_lo < 0.0) {
                lo = mid;
                f_lo = f_mid;
            } else {
                hi = mid;
            }
        }
        let root = norm360(start + 0.5 * (lo + hi));
        let check = self.residual(target, root);
        (check.is_finite() && check.abs() < ROOT_CHECK_DEG).then_some(root)
    }
}

/// All twelve Placidus cusps, indexed by house number minus one.
///
/// Cusps 1, 4, 7 and 10 are the angles themselves.
pub fn placidus_cusps(angles: &ChartAngles, latitude: f64) -> [(f64, CuspQuality); 12] {
    let mut cusps = [(0.0, CuspQuality::Exact); 12];
    cusps[0] = (angles.ascendant, CuspQuality::Exact);
    cusps[3] = (angles.imum_coeli, CuspQuality::Exact);
    cusps[6] = (angles.descendant, CuspQuality::Exact);
    cusps[9] = (angles.midheaven, CuspQuality::Exact);

    let solver = Solver { angles, latitude };
    for target in TARGETS.iter() {
        cusps[(target.house - 1) as usize] = solver.solve(target);
    }
    cusps
}
