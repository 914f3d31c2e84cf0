//! Built-in low-precision ephemeris that needs no data files.
//!
//! Planets use the JPL "Approximate Positions of the Planets" Keplerian
//! elements (Table 1, valid 1800-2050) with their secular rates. The Moon
//! uses the leading terms of the Meeus chapter 47 lunar series. Results are
//! geometric positions corrected for light-time and precessed to the
//! ecliptic of date; nutation and aberration are ignored. Expect errors of a
//! few arcminutes for the planets and about a tenth of a degree for the Moon.

use crate::angles::norm360;
use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{Body, RawPosition};
use crate::time::julian_centuries;
use async_trait::async_trait;
use log::info;

const KM_PER_AU: f64 = 149_597_870.7;
/// Light travel time for one AU, in days.
const LIGHT_DAYS_PER_AU: f64 = 0.005_775_518_3;

/// Heliocentric J2000 elements and their rates per Julian century.
struct Elements {
    a: (f64, f64),
    e: (f64, f64),
    incl: (f64, f64),
    mean_lon: (f64, f64),
    lon_peri: (f64, f64),
    node: (f64, f64),
}

const MERCURY: Elements = Elements {
    a: (0.387_099_27, 0.000_000_37),
    e: (0.205_635_93, 0.000_019_06),
    incl: (7.004_979_02, -0.005_947_49),
    mean_lon: (252.250_323_50, 149_472.674_111_75),
    lon_peri: (77.457_796_28, 0.160_476_89),
    node: (48.330_765_93, -0.125_340_81),
};

const VENUS: Elements = Elements {
    a: (0.723_335_66, 0.000_003_90),
    e: (0.006_776_72, -0.000_041_07),
    incl: (3.394_676_05, -0.000_788_90),
    mean_lon: (181.979_099_50, 58_517.815_387_29),
    lon_peri: (131.602_467_18, 0.002_683_29),
    node: (76.679_842_55, -0.277_694_18),
};

const EARTH_MOON_BARYCENTER: Elements = Elements {
    a: (1.000_002_61, 0.000_005_62),
    e: (0.016_711_23, -0.000_043_92),
    incl: (-0.000_015_31, -0.012_946_68),
    mean_lon: (100.464_571_66, 35_999.372_449_81),
    lon_peri: (102.937_681_93, 0.323_273_64),
    node: (0.0, 0.0),
};

const MARS: Elements = Elements {
    a: (1.523_710_34, 0.000_018_47),
    e: (0.093_394_10, 0.000_078_82),
    incl: (1.849_691_42, -0.008_131_31),
    mean_lon: (-4.553_432_05, 19_140.302_684_99),
    lon_peri: (-23.943_629_59, 0.444_410_88),
    node: (49.559_538_91, -0.292_573_43),
};

const JUPITER: Elements = Elements {
    a: (5.202_887_00, -0.000_116_07),
    e: (0.048_386_24, -0.000_132_53),
    incl: (1.304_396_95, -0.001_837_14),
    mean_lon: (34.396_440_51, 3_034.746_127_75),
    lon_peri: (14.728_479_83, 0.212_526_68),
    node: (100.473_909_09, 0.204_691_06),
};

const SATURN: Elements = Elements {
    a: (9.536_675_94, -0.001_250_60),
    e: (0.053_861_79, -0.000_509_91),
    incl: (2.485_991_87, 0.001_936_09),
    mean_lon: (49.954_244_23, 1_222.493_622_01),
    lon_peri: (92.598_878_31, -0.418_972_16),
    node: (113.662_424_48, -0.288_677_94),
};

const URANUS: Elements = Elements {
    a: (19.189_164_64, -0.001_961_76),
    e: (0.047_257_44, -0.000_043_97),
    incl: (0.772_637_83, -0.002_429_39),
    mean_lon: (313.238_104_51, 428.482_027_85),
    lon_peri: (170.954_276_30, 0.408_052_81),
    node: (74.016_925_03, 0.042_405_89),
};

const NEPTUNE: Elements = Elements {
    a: (30.069_922_76, 0.000_262_91),
    e: (0.008_590_48, 0.000_051_05),
    incl: (1.770_043_47, 0.000_353_72),
    mean_lon: (-55.120_029_69, 218.459_453_25),
    lon_peri: (44.964_762_27, -0.322_414_64),
    node: (131.784_225_74, -0.005_086_64),
};

const PLUTO: Elements = Elements {
    a: (39.482_116_75, -0.000_315_96),
    e: (0.248_827_30, 0.000_051_70),
    incl: (17.140_012_06, 0.000_048_18),
    mean_lon: (238.929_038_33, 145.207_805_15),
    lon_peri: (224.068_916_29, -0.040_629_42),
    node: (110.303_936_84, -0.011_834_82),
};

impl Elements {
    /// Heliocentric ecliptic J2000 rectangular coordinates in AU.
    fn heliocentric(&self, t: f64) -> [f64; 3] {
        let at = |(v0, rate): (f64, f64)| v0 + rate * t;
        let a = at(self.a);
        let e = at(self.e);
        let incl = at(self.incl).to_radians();
        let lon_peri = at(self.lon_peri);
        let node_deg = at(self.node);
        let arg_peri = (lon_peri - node_deg).to_radians();
        let node = node_deg.to_radians();
        let mean_anomaly = norm360(at(self.mean_lon) - lon_peri).to_radians();

        let ea = solve_kepler(mean_anomaly, e);
        let xp = a * (ea.cos() - e);
        let yp = a * (1.0 - e * e).sqrt() * ea.sin();

        let (sw, cw) = arg_peri.sin_cos();
        let (so, co) = node.sin_cos();
        let (si, ci) = incl.sin_cos();

        [
            (cw * co - sw * so * ci) * xp + (-sw * co - cw * so * ci) * yp,
            (cw * so + sw * co * ci) * xp + (-sw * so + cw * co * ci) * yp,
            (sw * si) * xp + (cw * si) * yp,
        ]
    }
}

/// Solve Kepler's equation `M = E - e sin E` by Newton-Raphson.
fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ea = if e < 0.8 { mean_anomaly } else { std::f64::consts::PI };
    for _ in 0..50 {
        let delta = (ea - e * ea.sin() - mean_anomaly) / (1.0 - e * ea.cos());
        ea -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ea
}

/// General precession in longitude from J2000 to the equinox of date, degrees.
fn precession_in_longitude(t: f64) -> f64 {
    (5_029.0966 * t + 1.111_13 * t * t) / 3600.0
}

fn spherical(v: [f64; 3]) -> (f64, f64, f64) {
    let [x, y, z] = v;
    let r = (x * x + y * y + z * z).sqrt();
    let lon = norm360(y.atan2(x).to_degrees());
    let lat = (z / r).asin().to_degrees();
    (lon, lat, r)
}

// Periodic terms for the Moon: multiples of D, M, M', F and the coefficients
// of sin (longitude, 1e-6 deg) and cos (distance, 1e-3 km).
const MOON_LON_DIST: [(i8, i8, i8, i8, f64, f64); 32] = [
    (0, 0, 1, 0, 6_288_774.0, -20_905_355.0),
    (2, 0, -1, 0, 1_274_027.0, -3_699_111.0),
    (2, 0, 0, 0, 658_314.0, -2_955_968.0),
    (0, 0, 2, 0, 213_618.0, -569_925.0),
    (0, 1, 0, 0, -185_116.0, 48_888.0),
    (0, 0, 0, 2, -114_332.0, -3_149.0),
    (2, 0, -2, 0, 58_793.0, 246_158.0),
    (2, -1, -1, 0, 57_066.0, -152_138.0),
    (2, 0, 1, 0, 53_322.0, -170_733.0),
    (2, -1, 0, 0, 45_758.0, -204_586.0),
    (0, 1, -1, 0, -40_923.0, -129_620.0),
    (1, 0, 0, 0, -34_720.0, 108_743.0),
    (0, 1, 1, 0, -30_383.0, 104_755.0),
    (2, 0, 0, -2, 15_327.0, 10_321.0),
    (0, 0, 1, 2, -12_528.0, 0.0),
    (0, 0, 1, -2, 10_980.0, 79_661.0),
    (4, 0, -1, 0, 10_675.0, -34_782.0),
    (0, 0, 3, 0, 10_034.0, -23_210.0),
    (4, 0, -2, 0, 8_548.0, -21_636.0),
    (2, 1, -1, 0, -7_888.0, 24_208.0),
    (2, 1, 0, 0, -6_766.0, 30_824.0),
    (1, 0, -1, 0, -5_163.0, -8_379.0),
    (1, 1, 0, 0, 4_987.0, -16_675.0),
    (2, -1, 1, 0, 4_036.0, -12_831.0),
    (2, 0, 2, 0, 3_994.0, -10_445.0),
    (4, 0, 0, 0, 3_861.0, -11_650.0),
    (2, 0, -3, 0, 3_665.0, 14_403.0),
    (0, 1, -2, 0, -2_689.0, -7_003.0),
    (2, 0, -1, 2, -2_602.0, 0.0),
    (2, -1, -2, 0, 2_390.0, 10_056.0),
    (1, 0, 1, 0, -2_348.0, 6_322.0),
    (2, -2, 0, 0, 2_236.0, -9_884.0),
];

// Latitude terms (1e-6 deg).
const MOON_LAT: [(i8, i8, i8, i8, f64); 14] = [
    (0, 0, 0, 1, 5_128_122.0),
    (0, 0, 1, 1, 280_602.0),
    (0, 0, 1, -1, 277_693.0),
    (2, 0, 0, -1, 173_237.0),
    (2, 0, -1, 1, 55_413.0),
    (2, 0, -1, -1, 46_271.0),
    (2, 0, 0, 1, 32_573.0),
    (0, 0, 2, 1, 17_198.0),
    (2, 0, 1, -1, 9_266.0),
    (0, 0, 2, -1, 8_822.0),
    (2, -1, 0, -1, 8_216.0),
    (2, 0, -2, -1, 4_324.0),
    (2, 0, 1, 1, 4_200.0),
    (2, 1, 0, -1, -3_359.0),
];

/// Geocentric Moon: longitude and latitude of date in degrees, distance in km.
fn moon_position(t: f64) -> (f64, f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let mean_lon = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let elong = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let sun_anom = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let moon_anom = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let arg_lat = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    let ecc = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let d = norm360(elong).to_radians();
    let m = norm360(sun_anom).to_radians();
    let mp = norm360(moon_anom).to_radians();
    let f = norm360(arg_lat).to_radians();
    let lp = norm360(mean_lon).to_radians();

    let arg = |cd: i8, cm: i8, cmp: i8, cf: i8| {
        cd as f64 * d + cm as f64 * m + cmp as f64 * mp + cf as f64 * f
    };
    let ecc_factor = |cm: i8| match cm.abs() {
        1 => ecc,
        2 => ecc * ecc,
        _ => 1.0,
    };

    let mut sum_l = 0.0;
    let mut sum_r = 0.0;
    for &(cd, cm, cmp, cf, sl, sr) in MOON_LON_DIST.iter() {
        let a = arg(cd, cm, cmp, cf);
        let k = ecc_factor(cm);
        sum_l += sl * k * a.sin();
        sum_r += sr * k * a.cos();
    }

    let mut sum_b = 0.0;
    for &(cd, cm, cmp, cf, sb) in MOON_LAT.iter() {
        sum_b += sb * ecc_factor(cm) * arg(cd, cm, cmp, cf).sin();
    }

    let a1 = norm360(119.75 + 131.849 * t).to_radians();
    let a2 = norm360(53.09 + 479_264.290 * t).to_radians();
    let a3 = norm360(313.45 + 481_266.484 * t).to_radians();
    sum_l += 3_958.0 * a1.sin() + 1_962.0 * (lp - f).sin() + 318.0 * a2.sin();
    sum_b += -2_235.0 * lp.sin() + 382.0 * a3.sin() + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();

    let lon = norm360(mean_lon + sum_l / 1_000_000.0);
    let lat = sum_b / 1_000_000.0;
    let dist_km = 385_000.56 + sum_r / 1000.0;
    (lon, lat, dist_km)
}

/// Analytic ephemeris provider.
#[derive(Debug, Default)]
pub struct AnalyticEphemeris {
    initialized: bool,
}

impl AnalyticEphemeris {
    pub fn new() -> Self {
        Self { initialized: false }
    }

    fn elements(body: Body) -> Option<&'static Elements> {
        match body {
            Body::Mercury => Some(&MERCURY),
            Body::Venus => Some(&VENUS),
            Body::Mars => Some(&MARS),
            Body::Jupiter => Some(&JUPITER),
            Body::Saturn => Some(&SATURN),
            Body::Uranus => Some(&URANUS),
            Body::Neptune => Some(&NEPTUNE),
            Body::Pluto => Some(&PLUTO),
            Body::Sun | Body::Moon => None,
        }
    }

    fn planet_position(elements: &Elements, jd: f64) -> RawPosition {
        let t = julian_centuries(jd);
        let earth = EARTH_MOON_BARYCENTER.heliocentric(t);
        let geocentric = |planet: [f64; 3]| {
            [planet[0] - earth[0], planet[1] - earth[1], planet[2] - earth[2]]
        };

        // one light-time iteration is enough at this precision
        let (_, _, dist) = spherical(geocentric(elements.heliocentric(t)));
        let tau = dist * LIGHT_DAYS_PER_AU;
        let retarded = elements.heliocentric(julian_centuries(jd - tau));
        let (lon, lat, dist) = spherical(geocentric(retarded));

        RawPosition {
            longitude: norm360(lon + precession_in_longitude(t)),
            latitude: lat,
            distance: dist,
        }
    }

    fn sun_position(jd: f64) -> RawPosition {
        let t = julian_centuries(jd);
        let earth = EARTH_MOON_BARYCENTER.heliocentric(t);
        let (lon, lat, dist) = spherical([-earth[0], -earth[1], -earth[2]]);
        RawPosition {
            longitude: norm360(lon + precession_in_longitude(t)),
            latitude: lat,
            distance: dist,
        }
    }
}

#[async_trait]
impl EphemerisProvider for AnalyticEphemeris {
    fn name(&self) -> &str {
        "analytic"
    }

    async fn initialize(&mut self) -> Result<(), EphemerisError> {
        if !self.initialized {
            self.initialized = true;
            info!("Analytic ephemeris ready");
        }
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn position(&self, jd_ut: f64, body: Body) -> Result<RawPosition, EphemerisError> {
        if !self.initialized {
            return Err(EphemerisError::Uninitialized);
        }
        let pos = match body {
            Body::Sun => Self::sun_position(jd_ut),
            Body::Moon => {
                let (longitude, latitude, km) = moon_position(julian_centuries(jd_ut));
                RawPosition {
                    longitude,
                    latitude,
                    distance: km / KM_PER_AU,
                }
            }
            other => {
                let elements = Self::elements(other).ok_or_else(|| EphemerisError::UnsupportedBody {
                    body: other.to_string(),
                })?;
                Self::planet_position(elements, jd_ut)
            }
        };
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready() -> AnalyticEphemeris {
        AnalyticEphemeris { initialized: true }
    }

    #[test]
    fn test_kepler_circular_and_eccentric() {
        let m = 1.0;
        assert!((solve_kepler(m, 0.0) - m).abs() < 1e-12);
        let e = 0.2;
        let ea = solve_kepler(m, e);
        assert!((ea - e * ea.sin() - m).abs() < 1e-12);
    }

    #[test]
    fn test_uninitialized_rejected() {
        let eph = AnalyticEphemeris::new();
        assert_eq!(
            eph.position(2_451_545.0, Body::Sun),
            Err(EphemerisError::Uninitialized)
        );
    }

    #[test]
    fn test_sun_meeus_example_25a() {
        // 1992 October 13.0: geometric longitude 199.90988°, R = 0.99766 AU
        let pos = ready().position(2_448_908.5, Body::Sun).unwrap();
        assert!((pos.longitude - 199.9099).abs() < 0.02, "sun = {}", pos.longitude);
        assert!((pos.distance - 0.99766).abs() < 0.001);
        assert!(pos.latitude.abs() < 0.01);
    }

    #[test]
    fn test_moon_meeus_example_47a() {
        // 1992 April 12.0: λ = 133.1627°, β = -3.2291°, Δ = 368409.7 km
        let (lon, lat, km) = moon_position(julian_centuries(2_448_724.5));
        assert!((lon - 133.1627).abs() < 0.1, "moon lon = {lon}");
        assert!((lat + 3.2291).abs() < 0.05, "moon lat = {lat}");
        assert!((km - 368_409.7).abs() < 300.0, "moon dist = {km}");
    }

    #[test]
    fn test_venus_meeus_example_33a() {
        // 1992 December 20.0: λ = 313.08°, β = -2.08°, Δ = 0.9109 AU
        let pos = ready().position(2_448_976.5, Body::Venus).unwrap();
        assert!((pos.longitude - 313.081).abs() < 0.15, "venus = {}", pos.longitude);
        assert!((pos.latitude + 2.085).abs() < 0.1);
        assert!((pos.distance - 0.9109).abs() < 0.005);
    }

    #[test]
    fn test_all_bodies_in_range() {
        let eph = ready();
        for jd in [2_415_020.5, 2_451_545.0, 2_460_000.5] {
            for body in Body::ALL {
                let p = eph.position(jd, body).unwrap();
                assert!((0.0..360.0).contains(&p.longitude), "{body} at {jd}");
                assert!(p.distance > 0.0);
            }
        }
    }
}
