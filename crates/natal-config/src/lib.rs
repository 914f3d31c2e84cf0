use natal_chart::ephemeris::EphemerisConfig;
use natal_chart::houses::HouseSystem;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

/// Which ephemeris provider the front end should build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EphemerisBackend {
    #[default]
    Analytic,
    Swiss,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NatalSettings {
    pub backend: EphemerisBackend,
    pub ephemeris_path: Option<PathBuf>,
    pub ephemeris_flags: i32,
    pub house_system: HouseSystem,
}

impl Default for NatalSettings {
    fn default() -> Self {
        Self {
            backend: EphemerisBackend::Analytic,
            ephemeris_path: None,
            ephemeris_flags: 0,
            house_system: HouseSystem::default(),
        }
    }
}

impl NatalSettings {
    /// Provider configuration for the selected backend.
    pub fn ephemeris_config(&self) -> EphemerisConfig {
        EphemerisConfig {
            path: self.ephemeris_path.clone(),
            flags: self.ephemeris_flags,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct EphemerisToml {
    #[serde(default)]
    backend: EphemerisBackend,
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    flags: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ChartToml {
    #[serde(default)]
    house_system: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
    #[serde(default)]
    chart: Option<ChartToml>,
}

/// Try common relative paths for `configs/natal.toml`.
pub fn read_natal_toml_text() -> anyhow::Result<String> {
    let paths = ["configs/natal.toml", "../../configs/natal.toml"];
    for p in &paths {
        if let Ok(c) = fs::read_to_string(p) {
            return Ok(c);
        }
    }
    anyhow::bail!("Could not load natal.toml from {:?}", paths);
}

/// File value first, then the environment.
pub fn resolve_ephemeris_path(from_file: Option<PathBuf>, from_env: Option<String>) -> Option<PathBuf> {
    from_file.or_else(|| from_env.filter(|s| !s.is_empty()).map(PathBuf::from))
}

/// Parse settings from TOML text. Missing sections keep their defaults.
pub fn parse_natal_settings(text: &str) -> anyhow::Result<NatalSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse natal.toml: {e}"))?;
    let ephemeris = root.ephemeris.unwrap_or_default();
    let chart = root.chart.unwrap_or_default();

    let house_system = match chart.house_system {
        Some(name) => name
            .parse::<HouseSystem>()
            .map_err(|e| anyhow::anyhow!("chart.house_system: {e}"))?,
        None => HouseSystem::default(),
    };

    if ephemeris.backend == EphemerisBackend::Analytic && ephemeris.path.is_some() {
        anyhow::bail!("ephemeris.path is only used by the swiss backend");
    }

    let ephemeris_path = match ephemeris.backend {
        EphemerisBackend::Swiss => {
            resolve_ephemeris_path(ephemeris.path, std::env::var(EPHEMERIS_PATH_ENV).ok())
        }
        EphemerisBackend::Analytic => None,
    };

    Ok(NatalSettings {
        backend: ephemeris.backend,
        ephemeris_path,
        ephemeris_flags: ephemeris.flags.unwrap_or(0),
        house_system,
    })
}

pub fn load_natal_settings_from(path: &Path) -> anyhow::Result<NatalSettings> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
    parse_natal_settings(&text)
}

pub fn load_natal_settings() -> anyhow::Result<NatalSettings> {
    let text = read_natal_toml_text()?;
    parse_natal_settings(&text)
}
