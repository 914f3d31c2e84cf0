use crate::ephemeris::types::{Body, RawPosition};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during ephemeris calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EphemerisError {
    #[error("Ephemeris provider used before initialization")]
    Uninitialized,
    #[error("Unsupported body: {body}")]
    UnsupportedBody { body: String },
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed {
        body: String,
        jd: f64,
        message: String,
    },
}

/// Source of raw geocentric positions.
///
/// Implementations must be initialized once before `position` is called and
/// must report `EphemerisError::Uninitialized` otherwise. After
/// initialization a provider is read-only, so one instance can serve many
/// concurrent chart computations.
#[async_trait]
pub trait EphemerisProvider: Send + Sync {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// One-time setup. A second call is a no-op.
    async fn initialize(&mut self) -> Result<(), EphemerisError>;

    fn is_initialized(&self) -> bool;

    /// Apparent geocentric ecliptic-of-date coordinates of `body` at
    /// Julian day `jd_ut`.
    fn position(&self, jd_ut: f64, body: Body) -> Result<RawPosition, EphemerisError>;

    /// Obliquity of the ecliptic in degrees, if the provider knows it more
    /// precisely than the mean-obliquity polynomial.
    fn obliquity(&self, _jd_ut: f64) -> Option<f64> {
        None
    }

    /// Look a body up by name, for callers holding string identifiers.
    fn position_by_name(&self, jd_ut: f64, body_id: &str) -> Result<RawPosition, EphemerisError> {
        let body = body_id
            .parse::<Body>()
            .map_err(|_| EphemerisError::UnsupportedBody {
                body: body_id.to_string(),
            })?;
        self.position(jd_ut, body)
    }
}

#[async_trait]
impl<T: EphemerisProvider + ?Sized> EphemerisProvider for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn initialize(&mut self) -> Result<(), EphemerisError> {
        (**self).initialize().await
    }

    fn is_initialized(&self) -> bool {
        (**self).is_initialized()
    }

    fn position(&self, jd_ut: f64, body: Body) -> Result<RawPosition, EphemerisError> {
        (**self).position(jd_ut, body)
    }

    fn obliquity(&self, jd_ut: f64) -> Option<f64> {
        (**self).obliquity(jd_ut)
    }
}
