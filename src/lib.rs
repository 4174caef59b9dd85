//! Coil Geometry Library
//!
//! Decodes the legacy whitespace-separated geometry text files describing a
//! tokamak's coils, passive vessel filaments, first wall, vessel contour and
//! magnetic diagnostics into typed records, and reduces the raw coil
//! winding-pack patches to one equivalent-circuit rectangle per coil.
//!
//! This library provides tools for:
//! - Walking the self-counting section chain of a geometry file
//! - Two-pass decoding of coil blocks named on their last row
//! - Aggregating patches into coils and deriving filament resistance
//! - Writing a decoded file back in the same layout
//! - Exporting the decoded tables to Apache Parquet
//! - Decoding several operating-phase files concurrently

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod decoder;
pub mod error;
pub mod export;
pub mod models;
pub mod processor;
pub mod tokenizer;
pub mod writer;

// Re-export commonly used types
pub use aggregate::{aggregate_coils, compute_resistance};
pub use config::{CompressionAlgorithm, GeometryConfig, OperatingPhase, ParseOptions};
pub use decoder::{Decoder, parse, parse_file, parse_str};
pub use error::{GeometryError, Result};
pub use export::TableExporter;
pub use models::{
    BoundingRect, Coil, CoilPart, FilamentCircuit, FluxLoop, ParsedFile, PassiveFilament, Probe,
    RawPatch, Section, SectionLayout, VesselContour, VesselSegment, WallPoint,
};
pub use processor::{GeometryProcessor, GeometrySource, ProcessingStats};
pub use writer::{to_text, write_geometry};
