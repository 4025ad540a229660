//! Harness configuration.
//!
//! Loaded from a TOML file whose sections mirror the concerns of a run:
//! `general` (verbosity, randomization, time base), `coverage`, `paths` and
//! `model`. Every field has a default, so an empty file (or no file at all)
//! yields a working configuration.

use crate::common::{Result, SimError, TimeUnit};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory for run artifacts when none is configured.
pub const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_MODEL: &str = "counter";
const DEFAULT_COUNTER_WIDTH: u32 = 8;
const DEFAULT_COUNTER_CYCLES: u64 = 50;

/// File name of the coverage database inside the log directory.
pub const COVERAGE_FILE: &str = "coverage.dat";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub coverage: CoverageConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

impl Config {
    /// Reads and parses a TOML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SimError::config(format!("could not read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.model.counter_width == 0 || self.model.counter_width > 64 {
            return Err(SimError::config(format!(
                "model.counter_width must be in 1..=64, got {}",
                self.model.counter_width
            )));
        }
        if self.general.max_ticks == Some(0) {
            return Err(SimError::config("general.max_ticks must be non-zero"));
        }
        Ok(())
    }

    /// Full path of the coverage database written at shutdown.
    pub fn coverage_path(&self) -> PathBuf {
        self.paths.log_dir.join(COVERAGE_FILE)
    }
}

/// Policy for seeding state the design leaves undriven at start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RandReset {
    /// Every bit starts at 0.
    Zeros,
    /// Every bit starts at 1.
    Ones,
    /// Bits come from a deterministic generator keyed by `seed`.
    #[default]
    Random,
}

impl TryFrom<u8> for RandReset {
    type Error = SimError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(RandReset::Zeros),
            1 => Ok(RandReset::Ones),
            2 => Ok(RandReset::Random),
            _ => Err(SimError::config(format!(
                "unknown randomization policy {}, expected 0, 1 or 2",
                code
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub debug_level: u32,

    #[serde(default)]
    pub rand_reset: RandReset,

    #[serde(default)]
    pub seed: u64,

    #[serde(default)]
    pub time_unit: TimeUnit,

    #[serde(default)]
    pub max_ticks: Option<u64>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            debug_level: 0,
            rand_reset: RandReset::default(),
            seed: 0,
            time_unit: TimeUnit::default(),
            max_ticks: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverageConfig {
    #[serde(default = "default_coverage_enabled")]
    pub enabled: bool,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            enabled: default_coverage_enabled(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default)]
    pub stats_file: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            stats_file: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model")]
    pub name: String,

    #[serde(default = "default_counter_width")]
    pub counter_width: u32,

    #[serde(default = "default_counter_cycles")]
    pub counter_cycles: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model(),
            counter_width: default_counter_width(),
            counter_cycles: default_counter_cycles(),
        }
    }
}

fn default_coverage_enabled() -> bool {
    true
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIR)
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_counter_width() -> u32 {
    DEFAULT_COUNTER_WIDTH
}

fn default_counter_cycles() -> u64 {
    DEFAULT_COUNTER_CYCLES
}
