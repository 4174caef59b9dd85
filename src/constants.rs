//! Application constants for the coil geometry decoder
//!
//! File naming conventions, fixed layout sizes and lookup tables used
//! throughout the decoder.

use crate::models::CoilPart;

// =============================================================================
// File Layout
// =============================================================================

/// Lines before the first coil block: coil count, units, row counts
pub const HEADER_LINES: usize = 3;

/// Index of the units/comment line
pub const UNITS_LINE: usize = 1;

/// Index of the per-coil row-count line
pub const ROW_COUNT_LINE: usize = 2;

/// Numeric columns of a coil patch row (turns, r, z, dr, dz)
pub const COIL_NUMERIC_COLUMNS: usize = 5;

/// Lines ahead of the data rows in a self-counting section (the count)
pub const COUNT_LINES: usize = 1;

/// Free title line ahead of the vessel contour count line
pub const VESSEL_TITLE_LINES: usize = 1;

// =============================================================================
// Coil Classification
// =============================================================================

/// Length of the coil name prefix that selects the machine part
pub const PART_PREFIX_LEN: usize = 2;

/// Coil name prefix to machine part
pub const PART_PREFIXES: &[(&str, CoilPart)] = &[
    ("CS", CoilPart::Cs),
    ("EF", CoilPart::Pf),
    ("FP", CoilPart::Ivc),
];

/// Look up the machine part for a coil name prefix
pub fn part_for_prefix(prefix: &str) -> Option<CoilPart> {
    PART_PREFIXES
        .iter()
        .find(|(candidate, _)| *candidate == prefix)
        .map(|(_, part)| *part)
}

// =============================================================================
// Vessel Contour Labels
// =============================================================================

/// Characters dropped from the front of a vessel part label
pub const PART_LABEL_PREFIX_LEN: usize = 2;

/// Separator characters removed from vessel part labels
pub const PART_LABEL_SEPARATORS: &[char] = &[','];

// =============================================================================
// Files and Directories
// =============================================================================

/// Data directory below the platform user data directory
pub const DEFAULT_DATA_SUBDIR: &str = "machine_description/coil_geometry";

/// Geometry file name prefix, followed by the phase label
pub const GEOMETRY_FILE_PREFIX: &str = "coil_vv_";

/// Geometry file extension
pub const GEOMETRY_FILE_EXTENSION: &str = "dat";

/// Parquet table names, suffixed with the source label on export
pub mod tables {
    pub const COILS: &str = "coil_data";
    pub const PASSIVE: &str = "passive_data";
    pub const WALL: &str = "wall_data";
    pub const CONTOUR: &str = "contour_data";
    pub const FLUX_LOOPS: &str = "loop_data";
    pub const PROBES: &str = "probe_data";
}

/// Default number of geometry files decoded at once
pub const DEFAULT_MAX_CONCURRENT_FILES: usize = 4;
