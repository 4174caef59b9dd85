//! Error handling for geometry decoding operations.
//!
//! Every decoding failure is fatal and carries the 1-based line number of
//! the offending input so a malformed file can be fixed at the source.

use crate::models::Section;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeometryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Geometry file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error(
        "Truncated {section} section starting at line {line}: declared {declared} rows, {available} available"
    )]
    TruncatedSection {
        section: Section,
        line: usize,
        declared: usize,
        available: usize,
    },

    #[error("Malformed row at line {line}: {reason} ('{text}')")]
    MalformedRow {
        line: usize,
        text: String,
        reason: String,
    },

    #[error("Unknown part prefix '{prefix}' for coil {name} (line {line})")]
    UnknownPartPrefix {
        name: String,
        prefix: String,
        line: usize,
    },

    #[error("Degenerate geometry for {name} (line {line}): area {area} is not positive")]
    DegenerateGeometry { name: String, line: usize, area: f64 },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },
}

impl GeometryError {
    pub fn malformed(line: usize, text: &str, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            line,
            text: text.to_string(),
            reason: reason.into(),
        }
    }

    /// Source line the error points at, when it has one
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::TruncatedSection { line, .. }
            | Self::MalformedRow { line, .. }
            | Self::UnknownPartPrefix { line, .. }
            | Self::DegenerateGeometry { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GeometryError>;
