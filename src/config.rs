//! Configuration management and validation.
//!
//! The operating phase and the data directories are explicit values
//! threaded into the processor, and [`ParseOptions`] is threaded into the
//! decoder. Nothing here is process-wide state.

use crate::constants::{
    DEFAULT_DATA_SUBDIR, DEFAULT_MAX_CONCURRENT_FILES, GEOMETRY_FILE_EXTENSION,
    GEOMETRY_FILE_PREFIX,
};
use crate::error::{GeometryError, Result};
use polars::prelude::ParquetCompression;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Device operating phase, each with its own geometry file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum OperatingPhase {
    #[serde(rename = "OP1")]
    #[value(name = "OP1", alias = "op1")]
    Op1,
    #[serde(rename = "OP2")]
    #[value(name = "OP2", alias = "op2")]
    Op2,
}

impl OperatingPhase {
    pub const ALL: [OperatingPhase; 2] = [OperatingPhase::Op1, OperatingPhase::Op2];

    pub fn label(&self) -> &'static str {
        match self {
            OperatingPhase::Op1 => "OP1",
            OperatingPhase::Op2 => "OP2",
        }
    }

    /// Reference pulse number recorded against the phase
    pub fn pulse(&self) -> u32 {
        match self {
            OperatingPhase::Op1 => 1001,
            OperatingPhase::Op2 => 1002,
        }
    }

    /// Geometry file name, e.g. `coil_vv_OP2.dat`
    pub fn file_name(&self) -> String {
        format!(
            "{}{}.{}",
            GEOMETRY_FILE_PREFIX,
            self.label(),
            GEOMETRY_FILE_EXTENSION
        )
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|phase| phase.label().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for OperatingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OperatingPhase {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s).ok_or_else(|| GeometryError::Configuration {
            message: format!("Unknown operating phase '{}'", s),
        })
    }
}

/// Options changing how a geometry file is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Decode the multi-part vessel contour section between the wall and
    /// the flux loops
    pub vessel_contours: bool,
}

impl ParseOptions {
    pub fn with_vessel_contours(mut self) -> Self {
        self.vessel_contours = true;
        self
    }
}

/// Supported compression algorithms for exported parquet tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    #[value(name = "none")]
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> ParquetCompression {
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

/// Platform data directory holding the geometry files
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DATA_SUBDIR)
}

/// Global configuration for geometry processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    /// Directory holding `coil_vv_<PHASE>.dat` files
    pub data_dir: PathBuf,

    /// Phases to decode when no explicit files are given
    pub phases: Vec<OperatingPhase>,

    /// Explicit geometry files, decoded instead of the phase files
    pub files: Vec<PathBuf>,

    /// Export parquet tables here when set
    pub output_dir: Option<PathBuf>,

    pub compression: CompressionAlgorithm,

    pub parse: ParseOptions,

    /// Maximum geometry files decoded at once
    pub max_concurrent_files: usize,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            phases: vec![OperatingPhase::Op2],
            files: Vec::new(),
            output_dir: None,
            compression: CompressionAlgorithm::Snappy,
            parse: ParseOptions::default(),
            max_concurrent_files: DEFAULT_MAX_CONCURRENT_FILES,
        }
    }
}

impl GeometryConfig {
    /// Load configuration from a JSON file; missing keys take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| GeometryError::Configuration {
            message: format!("Failed to read config {}: {}", path.display(), e),
        })?;
        let config: Self =
            serde_json::from_str(&text).map_err(|e| GeometryError::Configuration {
                message: format!("Invalid config {}: {}", path.display(), e),
            })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_phases(mut self, phases: Vec<OperatingPhase>) -> Self {
        self.phases = phases;
        self
    }

    pub fn with_files(mut self, files: Vec<PathBuf>) -> Self {
        self.files = files;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.compression = compression;
        self
    }

    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    pub fn with_max_concurrent_files(mut self, max_files: usize) -> Self {
        self.max_concurrent_files = max_files;
        self
    }

    /// Geometry file for an operating phase
    pub fn phase_path(&self, phase: OperatingPhase) -> PathBuf {
        self.data_dir.join(phase.file_name())
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_files == 0 {
            return Err(GeometryError::Configuration {
                message: "max_concurrent_files must be at least 1".to_string(),
            });
        }
        if self.files.is_empty() && self.phases.is_empty() {
            return Err(GeometryError::Configuration {
                message: "No geometry files or operating phases selected".to_string(),
            });
        }
        Ok(())
    }
}
