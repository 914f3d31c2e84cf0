use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use log::{info, warn};
use natal_chart::chart::AstroProcessor;
use natal_chart::ephemeris::{AnalyticEphemeris, EphemerisProvider, GeoLocation};
use natal_chart::houses::HouseSystem;
use natal_chart::zodiac::to_sign;
use natal_config::{EphemerisBackend, NatalSettings};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "natal", author, version, about = "Natal chart calculator")]
struct Cli {
    /// Settings file (defaults to configs/natal.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a natal chart and print it as JSON
    Chart {
        /// Birth instant, RFC 3339 (e.g. 1990-06-15T12:00:00Z)
        #[arg(long)]
        datetime: String,
        /// Latitude in degrees, north positive
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees, east positive
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// UTC offset in hours, stored on the chart for display
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        tz: f64,
        /// whole_sign, equal or placidus (overrides the settings file)
        #[arg(long)]
        house_system: Option<String>,
        /// Also print the aspects between planets
        #[arg(long)]
        aspects: bool,
    },
    /// Zodiac placement of a tropical ecliptic longitude
    Sign {
        /// Ecliptic longitude in degrees
        #[arg(allow_hyphen_values = true)]
        lon: f64,
    },
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<NatalSettings> {
    match path {
        Some(p) => natal_config::load_natal_settings_from(p),
        None => Ok(natal_config::load_natal_settings().unwrap_or_else(|e| {
            warn!("{e}; using default settings");
            NatalSettings::default()
        })),
    }
}

fn build_provider(settings: &NatalSettings) -> anyhow::Result<Box<dyn EphemerisProvider>> {
    match settings.backend {
        EphemerisBackend::Analytic => Ok(Box::new(AnalyticEphemeris::new())),
        #[cfg(feature = "swiss")]
        EphemerisBackend::Swiss => Ok(Box::new(natal_chart::ephemeris::SwissEphemerisAdapter::new(
            &settings.ephemeris_config(),
        ))),
        #[cfg(not(feature = "swiss"))]
        EphemerisBackend::Swiss => {
            anyhow::bail!("ephemeris.backend = \"swiss\" needs a build with the `swiss` feature")
        }
    }
}

async fn run_chart(
    settings: &NatalSettings,
    datetime: &str,
    location: GeoLocation,
    tz: f64,
    house_system: Option<&str>,
    with_aspects: bool,
) -> anyhow::Result<()> {
    let datetime: DateTime<Utc> = DateTime::parse_from_rfc3339(datetime)
        .map_err(|e| anyhow::anyhow!("Invalid --datetime {datetime:?}: {e}"))?
        .with_timezone(&Utc);
    let house_system = match house_system {
        Some(name) => name.parse::<HouseSystem>()?,
        None => settings.house_system,
    };

    let processor = AstroProcessor::new(build_provider(settings)?).initialize().await?;
    info!("Computing {house_system} chart for {datetime}");

    let chart = processor.calculate_natal_chart(datetime, location, tz, house_system)?;
    let output = if with_aspects {
        let aspects = processor.calculate_aspects(&chart.planets);
        serde_json::json!({ "chart": chart, "aspects": aspects })
    } else {
        serde_json::to_value(&chart)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_sign(lon: f64) -> anyhow::Result<()> {
    let placement = to_sign(lon);
    let output = serde_json::json!({
        "longitude": lon,
        "placement": placement.to_string(),
        "zodiacSign": placement,
        "element": placement.sign.element(),
        "ruler": placement.sign.ruler(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Chart {
            datetime,
            lat,
            lon,
            tz,
            house_system,
            aspects,
        } => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                anyhow::bail!("Location out of range: lat {lat}, lon {lon}");
            }
            let settings = load_settings(cli.config.as_deref())?;
            run_chart(
                &settings,
                &datetime,
                GeoLocation::new(lat, lon),
                tz,
                house_system.as_deref(),
                aspects,
            )
            .await
        }
        Commands::Sign { lon } => print_sign(lon),
    }
}
