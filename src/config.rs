//! Startup configuration: command line, optional settings file, defaults.
//!
//! Precedence is command line > settings file > defaults. Relative input
//! paths are resolved against the base directory, never the working
//! directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const DEFAULT_DATA_FILE: &str = "devices.js";
pub const DEFAULT_COLUMN_MAP_FILE: &str = "column_map.json";
pub const DEFAULT_MIN_SAMPLE_SIZE: u64 = 10;

/// Directory holding the bundled sample data.
pub fn default_base_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
}

/// Explore mobile-device sensor capabilities (phyphox sensordb export).
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Directory that relative input paths are resolved against
    /// [default: the bundled `data/` directory]
    #[arg(long)]
    pub base_dir: Option<PathBuf>,

    /// Device data file (`var <name> = [...]`) [default: devices.js]
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// JSON object mapping raw column names to canonical ones
    /// [default: column_map.json]
    #[arg(long)]
    pub column_map: Option<PathBuf>,

    /// Minimum total sample size for a manufacturer to be listed [default: 10]
    #[arg(long)]
    pub min_sample_size: Option<u64>,

    /// JSON settings file with `data_file`, `column_map_file`, `min_sample_size`
    #[arg(long)]
    pub settings: Option<PathBuf>,
}

/// Contents of the optional settings file; every key may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub data_file: Option<PathBuf>,
    pub column_map_file: Option<PathBuf>,
    pub min_sample_size: Option<u64>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing settings {}", path.display()))
    }
}

/// Resolved configuration for the device pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_dir: PathBuf,
    /// Absolute or base-relative path already joined with `base_dir`.
    pub data_file: PathBuf,
    pub column_map_file: PathBuf,
    pub min_sample_size: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config::resolve(default_base_dir(), Settings::default())
    }
}

impl Config {
    /// Combine command-line arguments with the settings file they point to.
    pub fn from_args(args: Args) -> Result<Self> {
        let base_dir = match args.base_dir {
            Some(dir) => std::path::absolute(&dir)
                .with_context(|| format!("resolving base directory {}", dir.display()))?,
            None => default_base_dir(),
        };
        let file_settings = match &args.settings {
            Some(path) => Settings::load(&base_dir.join(path))?,
            None => Settings::default(),
        };
        let settings = Settings {
            data_file: args.data.or(file_settings.data_file),
            column_map_file: args.column_map.or(file_settings.column_map_file),
            min_sample_size: args.min_sample_size.or(file_settings.min_sample_size),
        };
        Ok(Config::resolve(base_dir, settings))
    }

    /// Fill defaults and anchor relative paths at `base_dir`.
    pub fn resolve(base_dir: PathBuf, settings: Settings) -> Self {
        let data_file = base_dir.join(
            settings
                .data_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE)),
        );
        let column_map_file = base_dir.join(
            settings
                .column_map_file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_COLUMN_MAP_FILE)),
        );
        Config {
            base_dir,
            data_file,
            column_map_file,
            min_sample_size: settings.min_sample_size.unwrap_or(DEFAULT_MIN_SAMPLE_SIZE),
        }
    }
}
