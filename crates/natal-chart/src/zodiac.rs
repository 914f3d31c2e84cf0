//! Zodiac placement of ecliptic longitudes.
//!
//! Maps a longitude to its tropical sign and the sexagesimal position inside
//! that sign.

use crate::angles::norm360;
use crate::ephemeris::Body;
use serde::{Deserialize, Serialize};
use std::fmt;

const SIGN_WIDTH: f64 = 30.0;
const ARCSEC_PER_SIGN: u32 = 30 * 3600;

/// The twelve tropical signs in zodiacal order, Aries first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

impl Sign {
    pub const ALL: [Sign; 12] = [
        Sign::Aries,
        Sign::Taurus,
        Sign::Gemini,
        Sign::Cancer,
        Sign::Leo,
        Sign::Virgo,
        Sign::Libra,
        Sign::Scorpio,
        Sign::Sagittarius,
        Sign::Capricorn,
        Sign::Aquarius,
        Sign::Pisces,
    ];

    /// Sign at `index` (taken modulo 12).
    pub fn from_index(index: usize) -> Sign {
        Self::ALL[index % 12]
    }

    /// Zero-based position in the zodiac (Aries = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }

    /// Triplicity: fire, earth, air, water repeating from Aries.
    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    /// Traditional (pre-telescopic) ruler of the sign.
    pub fn ruler(self) -> Body {
        const TRADITIONAL_RULERS: [Body; 12] = [
            Body::Mars,    // Aries
            Body::Venus,   // Taurus
            Body::Mercury, // Gemini
            Body::Moon,    // Cancer
            Body::Sun,     // Leo
            Body::Mercury, // Virgo
            Body::Venus,   // Libra
            Body::Mars,    // Scorpio
            Body::Jupiter, // Sagittarius
            Body::Saturn,  // Capricorn
            Body::Saturn,  // Aquarius
            Body::Jupiter, // Pisces
        ];
        TRADITIONAL_RULERS[self.index()]
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a longitude inside its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZodiacSign {
    pub sign: Sign,
    /// Whole degrees into the sign, 0..30
    pub degree: u8,
    pub minute: u8,
    pub second: u8,
}

impl ZodiacSign {
    /// Decimal degrees inside the sign.
    pub fn degrees_in_sign(&self) -> f64 {
        self.degree as f64 + self.minute as f64 / 60.0 + self.second as f64 / 3600.0
    }

    /// Ecliptic longitude this placement stands for, to the second.
    pub fn longitude(&self) -> f64 {
        self.sign.index() as f64 * SIGN_WIDTH + self.degrees_in_sign()
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}°{:02}'{:02}\" {}",
            self.degree, self.minute, self.second, self.sign
        )
    }
}

/// Map an ecliptic longitude to its zodiac placement.
///
/// Degree and minute are floored, the second is rounded. Rounding never
/// carries the placement into the next sign: the last half arc-second of a
/// sign reads as 29°59'59".
pub fn to_sign(longitude: f64) -> ZodiacSign {
    let lon = norm360(longitude);
    let sign_index = ((lon / SIGN_WIDTH).floor() as usize).min(11);
    let within = lon - sign_index as f64 * SIGN_WIDTH;

    let degree = within.floor();
    let minutes_total = (within - degree) * 60.0;
    let minute = minutes_total.floor();
    let second = ((minutes_total - minute) * 60.0).round();

    let mut arcsec = degree as u32 * 3600 + minute as u32 * 60 + second as u32;
    if arcsec >= ARCSEC_PER_SIGN {
        arcsec = ARCSEC_PER_SIGN - 1;
    }

    ZodiacSign {
        sign: Sign::from_index(sign_index),
        degree: (arcsec / 3600) as u8,
        minute: ((arcsec / 60) % 60) as u8,
        second: (arcsec % 60) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capricorn_ten_degrees() {
        let z = to_sign(280.0);
        assert_eq!(z.sign, Sign::Capricorn);
        assert_eq!(z.degree, 10);
        assert_eq!(z.minute, 0);
        assert_eq!(z.second, 0);
    }

    #[test]
    fn test_sexagesimal_split() {
        // 15°30'45" Taurus
        let z = to_sign(30.0 + 15.0 + 30.0 / 60.0 + 45.0 / 3600.0);
        assert_eq!(z.sign, Sign::Taurus);
        assert_eq!((z.degree, z.minute, z.second), (15, 30, 45));
    }

    #[test]
    fn test_negative_and_wrapped_longitudes() {
        assert_eq!(to_sign(-1.0).sign, Sign::Pisces);
        assert_eq!(to_sign(360.0).sign, Sign::Aries);
        assert_eq!(to_sign(725.0).sign, Sign::Aries);
    }

    #[test]
    fn test_rounding_does_not_cross_sign() {
        let z = to_sign(29.999_999_9);
        assert_eq!(z.sign, Sign::Aries);
        assert_eq!((z.degree, z.minute, z.second), (29, 59, 59));
    }

    #[test]
    fn test_rounding_carries_into_minute() {
        // 10°59'59.8" rounds to 11°00'00"
        let z = to_sign(10.0 + 59.0 / 60.0 + 59.8 / 3600.0);
        assert_eq!((z.degree, z.minute, z.second), (11, 0, 0));
    }

    #[test]
    fn test_elements_and_rulers() {
        assert_eq!(Sign::Aries.element(), Element::Fire);
        assert_eq!(Sign::Cancer.element(), Element::Water);
        assert_eq!(Sign::Capricorn.element(), Element::Earth);
        assert_eq!(Sign::Aquarius.element(), Element::Air);
        assert_eq!(Sign::Leo.ruler(), Body::Sun);
        assert_eq!(Sign::Scorpio.ruler(), Body::Mars);
        assert_eq!(Sign::Pisces.ruler(), Body::Jupiter);
    }

    #[test]
    fn test_display() {
        assert_eq!(to_sign(280.5).to_string(), "10°30'00\" Capricorn");
    }
}
