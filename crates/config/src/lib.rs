//! Flight-test manifests for the TAS calculator.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use tas_core::units;
use tas_solver::Observation;
use thiserror::Error;

/// One three-leg flight test parsed from a manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct FlightTestConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub units: SpeedUnit,
    pub legs: Vec<LegConfig>,
}

/// A single GPS reading: groundspeed in the manifest's units and track in degrees.
#[derive(Debug, Deserialize, Clone, Copy)]
pub struct LegConfig {
    pub groundspeed: f64,
    pub track: f64,
}

/// Speed unit used for every leg of a flight test.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpeedUnit {
    #[default]
    #[serde(rename = "kt", alias = "knots")]
    Knots,
    #[serde(rename = "mph")]
    MilesPerHour,
    #[serde(rename = "kmh", alias = "km/h")]
    KilometresPerHour,
    #[serde(rename = "mps", alias = "m/s")]
    MetresPerSecond,
}

impl SpeedUnit {
    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            SpeedUnit::Knots => "kt",
            SpeedUnit::MilesPerHour => "mph",
            SpeedUnit::KilometresPerHour => "km/h",
            SpeedUnit::MetresPerSecond => "m/s",
        }
    }

    /// Convert a speed in this unit to knots.
    pub fn to_knots(&self, v: f64) -> f64 {
        match self {
            SpeedUnit::Knots => v,
            SpeedUnit::MilesPerHour => units::mph_to_kt(v),
            SpeedUnit::KilometresPerHour => units::kmh_to_kt(v),
            SpeedUnit::MetresPerSecond => units::mps_to_kt(v),
        }
    }

    /// Convert a speed in knots to this unit.
    pub fn from_knots(&self, v: f64) -> f64 {
        match self {
            SpeedUnit::Knots => v,
            SpeedUnit::MilesPerHour => units::kt_to_mph(v),
            SpeedUnit::KilometresPerHour => units::kt_to_kmh(v),
            SpeedUnit::MetresPerSecond => units::kt_to_mps(v),
        }
    }
}

impl FromStr for SpeedUnit {
    type Err = ConfigError;

    /// Accepts the same spellings as manifests.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kt" | "knots" => Ok(SpeedUnit::Knots),
            "mph" => Ok(SpeedUnit::MilesPerHour),
            "kmh" | "km/h" => Ok(SpeedUnit::KilometresPerHour),
            "mps" | "m/s" => Ok(SpeedUnit::MetresPerSecond),
            _ => Err(ConfigError::UnknownUnit(s.to_string())),
        }
    }
}

impl FlightTestConfig {
    /// Legs as solver observations, in manifest order and units.
    pub fn observations(&self) -> Vec<Observation> {
        self.legs
            .iter()
            .map(|leg| Observation::new(leg.groundspeed, leg.track))
            .collect()
    }
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("flight test '{0}' not found in manifest")]
    NotFound(String),
    #[error("manifest contains no flight tests")]
    Empty,
    #[error("unknown speed unit '{0}' (expected kt, mph, kmh or mps)")]
    UnknownUnit(String),
}

/// Load flight tests from a YAML list, a single TOML file, or a directory of TOML files.
pub fn load_flight_tests<P: AsRef<Path>>(path: P) -> Result<Vec<FlightTestConfig>, ConfigError> {
    load_records(path.as_ref())
}

/// Pick a flight test by name (case-insensitive), or the first one when no name is given.
pub fn find_flight_test<'a>(
    tests: &'a [FlightTestConfig],
    requested: Option<&str>,
) -> Result<&'a FlightTestConfig, ConfigError> {
    let first = tests.first().ok_or(ConfigError::Empty)?;
    match requested {
        Some(name) => {
            let upper = name.to_uppercase();
            tests
                .iter()
                .find(|t| t.name.to_uppercase() == upper)
                .ok_or_else(|| ConfigError::NotFound(name.to_string()))
        }
        None => Ok(first),
    }
}

fn load_records(path: &Path) -> Result<Vec<FlightTestConfig>, ConfigError> {
    if path.is_dir() {
        return read_dir_records(path);
    }
    if is_toml(path) {
        return Ok(vec![read_toml(path)?]);
    }
    let reader = File::open(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_yaml::from_reader(reader)?)
}

fn read_dir_records(dir: &Path) -> Result<Vec<FlightTestConfig>, ConfigError> {
    let listing = std::fs::read_dir(dir).map_err(|source| ConfigError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut entries: Vec<PathBuf> = listing
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| is_toml(path))
        .collect();
    entries.sort();
    entries.iter().map(|path| read_toml(path)).collect()
}

fn read_toml(path: &Path) -> Result<FlightTestConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}

fn is_toml(path: &Path) -> bool {
    path.extension().map(|ext| ext == "toml").unwrap_or(false)
}
