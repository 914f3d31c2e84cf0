use crate::aspects::{Aspect, AspectCalculator};
use crate::chart::types::{ChartLocation, NatalChart};
use crate::ephemeris::{EphemerisProvider, GeoLocation};
use crate::error::ChartError;
use crate::houses::{HouseCalculator, HouseSystem};
use crate::planets::{PlanetCalculator, PlanetPosition};
use crate::time::julian_day;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::marker::PhantomData;

/// Processor state before the ephemeris provider has been set up.
pub struct Uninitialized;

/// Processor state once the provider is ready; only this state computes charts.
pub struct Ready;

/// Natal chart orchestrator.
///
/// Holds no per-chart state: the house system is passed to every call, so a
/// `Ready` processor behind an `Arc` can serve concurrent requests.
pub struct AstroProcessor<P, S = Uninitialized> {
    provider: P,
    houses: HouseCalculator,
    aspects: AspectCalculator,
    _state: PhantomData<S>,
}

impl<P, S> AstroProcessor<P, S> {
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: EphemerisProvider> AstroProcessor<P, Uninitialized> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            houses: HouseCalculator::new(),
            aspects: AspectCalculator::new(),
            _state: PhantomData,
        }
    }

    /// Set up the ephemeris provider. Provider errors are returned unchanged.
    pub async fn initialize(mut self) -> Result<AstroProcessor<P, Ready>, ChartError> {
        self.provider.initialize().await?;
        info!("Astro processor ready ({} ephemeris)", self.provider.name());
        Ok(AstroProcessor {
            provider: self.provider,
            houses: self.houses,
            aspects: self.aspects,
            _state: PhantomData,
        })
    }
}

impl<P: EphemerisProvider> AstroProcessor<P, Ready> {
    /// Already initialized; returns the processor untouched.
    pub async fn initialize(self) -> Result<Self, ChartError> {
        Ok(self)
    }

    /// Compute a natal chart for a UTC instant and place.
    ///
    /// `timezone_offset_hours` is only stored on the chart; `datetime` must
    /// already be UTC.
    pub fn calculate_natal_chart(
        &self,
        datetime: DateTime<Utc>,
        location: GeoLocation,
        timezone_offset_hours: f64,
        house_system: HouseSystem,
    ) -> Result<NatalChart, ChartError> {
        if !self.provider.is_initialized() {
            return Err(ChartError::Uninitialized);
        }

        let jd = julian_day(datetime);
        debug!(
            "Natal chart for {} (JD {:.6}) at {:.4}, {:.4} using {}",
            datetime, jd, location.lat, location.lon, house_system
        );

        let planets = PlanetCalculator::new(&self.provider).all_positions(jd)?;

        let obliquity = self.houses.obliquity(&self.provider, jd);
        let angles = self.houses.compute_asc_mc(jd, location.lat, location.lon, obliquity);
        let houses = self.houses.build_houses(house_system, &angles, location.lat);

        Ok(NatalChart {
            planets,
            houses,
            ascendant: angles.ascendant,
            midheaven: angles.midheaven,
            date: datetime,
            location: ChartLocation {
                latitude: location.lat,
                longitude: location.lon,
                timezone: timezone_offset_hours,
            },
        })
    }

    /// Aspects between the given planets. Pure; no provider access.
    pub fn calculate_aspects(&self, planets: &[PlanetPosition]) -> Vec<Aspect> {
        self.aspects.calculate_aspects(planets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{AnalyticEphemeris, Body, EphemerisError, RawPosition};
    use async_trait::async_trait;
    use chrono::TimeZone;

    /// Provider whose setup never flips it to ready.
    struct StuckProvider;

    #[async_trait]
    impl EphemerisProvider for StuckProvider {
        fn name(&self) -> &str {
            "stuck"
        }
        async fn initialize(&mut self) -> Result<(), EphemerisError> {
            Ok(())
        }
        fn is_initialized(&self) -> bool {
            false
        }
        fn position(&self, _jd: f64, _body: Body) -> Result<RawPosition, EphemerisError> {
            Err(EphemerisError::Uninitialized)
        }
    }

    fn sample_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1990, 6, 15, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_provider_not_ready_is_uninitialized() {
        let processor = AstroProcessor::new(StuckProvider).initialize().await.unwrap();
        let result = processor.calculate_natal_chart(
            sample_date(),
            GeoLocation::new(51.5, 0.0),
            0.0,
            HouseSystem::Placidus,
        );
        assert_eq!(result.unwrap_err(), ChartError::Uninitialized);
    }

    #[tokio::test]
    async fn test_initialize_twice_is_noop() {
        let processor = AstroProcessor::new(AnalyticEphemeris::new())
            .initialize()
            .await
            .unwrap()
            .initialize()
            .await
            .unwrap();
        assert!(processor.provider().is_initialized());
    }

    #[tokio::test]
    async fn test_timezone_is_stored_only() {
        let processor = AstroProcessor::new(AnalyticEphemeris::new()).initialize().await.unwrap();
        let loc = GeoLocation::new(40.7, -74.0);
        let a = processor
            .calculate_natal_chart(sample_date(), loc, -4.0, HouseSystem::Equal)
            .unwrap();
        let b = processor
            .calculate_natal_chart(sample_date(), loc, 0.0, HouseSystem::Equal)
            .unwrap();
        assert_eq!(a.location.timezone, -4.0);
        assert_eq!(a.planets, b.planets);
        assert_eq!(a.houses, b.houses);
    }
}
