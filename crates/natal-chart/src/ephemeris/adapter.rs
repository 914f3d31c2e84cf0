//! Swiss Ephemeris backed provider (feature `swiss`).

use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{Body, EphemerisConfig, RawPosition};
use async_trait::async_trait;
use log::info;
use std::env;
use std::path::PathBuf;
use swisseph::swe::calc_ut;

/// FLG_SWIEPH: use the Swiss Ephemeris data files
const FLG_SWIEPH: i32 = 2;

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

// Swiss Ephemeris body codes: SUN=0 .. PLUTO=9
fn body_code(body: Body) -> u32 {
    match body {
        Body::Sun => 0,
        Body::Moon => 1,
        Body::Mercury => 2,
        Body::Venus => 3,
        Body::Mars => 4,
        Body::Jupiter => 5,
        Body::Saturn => 6,
        Body::Uranus => 7,
        Body::Neptune => 8,
        Body::Pluto => 9,
    }
}

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    flags: i32,
    initialized: bool,
}

impl SwissEphemerisAdapter {
    /// Create an adapter. The data path comes from the config, then
    /// `SWISS_EPHEMERIS_PATH`, then the system default.
    pub fn new(config: &EphemerisConfig) -> Self {
        let ephemeris_path = config.path.clone().unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHEMERIS_PATH))
        });
        let flags = if config.flags == 0 {
            FLG_SWIEPH
        } else {
            config.flags
        };
        Self {
            ephemeris_path,
            flags,
            initialized: false,
        }
    }

    pub fn ephemeris_path(&self) -> &PathBuf {
        &self.ephemeris_path
    }
}

#[async_trait]
impl EphemerisProvider for SwissEphemerisAdapter {
    fn name(&self) -> &str {
        "swiss"
    }

    async fn initialize(&mut self) -> Result<(), EphemerisError> {
        if self.initialized {
            return Ok(());
        }
        if tokio::fs::metadata(&self.ephemeris_path).await.is_err() {
            return Err(EphemerisError::FileNotFound {
                path: self.ephemeris_path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }
        self.initialized = true;
        info!(
            "Swiss Ephemeris ready (path: {})",
            self.ephemeris_path.display()
        );
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn position(&self, jd_ut: f64, body: Body) -> Result<RawPosition, EphemerisError> {
        if !self.initialized {
            return Err(EphemerisError::Uninitialized);
        }
        let result = calc_ut(jd_ut, body_code(body), self.flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body: body.to_string(),
                jd: jd_ut,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(RawPosition {
            longitude: out[0].rem_euclid(360.0),
            latitude: out[1],
            distance: out[2],
        })
    }
}
