//! Core geometry value objects produced by the decoder.
//!
//! Defines the raw per-row records read from a geometry file, the
//! aggregated coil and filament geometry handed to downstream consumers,
//! and the section layout discovered while walking the file.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// Sections of a geometry file, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    Header,
    Coils,
    PassiveFilaments,
    Wall,
    VesselContours,
    FluxLoops,
    Probes,
}

impl Section {
    pub fn name(&self) -> &'static str {
        match self {
            Section::Header => "header",
            Section::Coils => "coil",
            Section::PassiveFilaments => "passive filament",
            Section::Wall => "wall contour",
            Section::VesselContours => "vessel contour",
            Section::FluxLoops => "flux loop",
            Section::Probes => "magnetic probe",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Machine part a coil belongs to, taken from its two-letter name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoilPart {
    /// Central solenoid (`CS`)
    Cs,
    /// Poloidal field / equilibrium field coil (`EF`)
    Pf,
    /// In-vessel coil (`FP`)
    Ivc,
}

impl CoilPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoilPart::Cs => "cs",
            CoilPart::Pf => "pf",
            CoilPart::Ivc => "ivc",
        }
    }
}

impl fmt::Display for CoilPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rectangular sub-conductor of a named coil winding pack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPatch {
    pub name: String,
    pub turns: f64,
    pub r: f64,
    pub z: f64,
    pub dr: f64,
    pub dz: f64,
    /// 1-based source line, 0 when the patch was not read from a file
    pub line: usize,
}

impl RawPatch {
    pub fn area(&self) -> f64 {
        self.dr * self.dz
    }
}

/// Width and height of the rectangle enclosing every patch of a coil
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub width: f64,
    pub height: f64,
}

/// Equivalent-circuit geometry of one coil
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coil {
    pub name: String,
    pub part: CoilPart,
    pub turns: f64,
    pub area: f64,
    pub centroid_r: f64,
    pub centroid_z: f64,
    pub bounding_rect: BoundingRect,
}

/// Electrical properties derived for a passive filament
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FilamentCircuit {
    /// Toroidal length, 2πr
    pub length: f64,
    /// Cross-section area, dr·dz
    pub area: f64,
    /// resistivity·length/area
    pub resistance: f64,
}

/// Passive conducting loop (vessel structure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveFilament {
    pub index: usize,
    pub turns: f64,
    pub r: f64,
    pub z: f64,
    pub dr: f64,
    pub dz: f64,
    pub resistivity: f64,
    pub line: usize,
    /// Filled in by [`crate::aggregate::compute_resistance`]
    pub circuit: Option<FilamentCircuit>,
}

impl PassiveFilament {
    pub fn name(&self) -> String {
        format!("vv_{}", self.index)
    }

    pub fn area(&self) -> f64 {
        self.dr * self.dz
    }

    pub fn length(&self) -> f64 {
        2.0 * PI * self.r
    }
}

/// One vertex of the first-wall polyline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallPoint {
    pub r: f64,
    pub z: f64,
}

/// One segment of the multi-part vessel contour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselSegment {
    pub r0: f64,
    pub z0: f64,
    pub r1: f64,
    pub z1: f64,
    /// Part token as found in the file (forward-filled when a row omits it)
    pub label: String,
    /// Part name with the two-character prefix and separators removed
    pub part: String,
}

/// Multi-part vessel contour section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselContour {
    /// Free text line announcing the section
    pub title: String,
    pub segments: Vec<VesselSegment>,
}

impl VesselContour {
    /// Distinct part names in first-seen order
    pub fn parts(&self) -> Vec<&str> {
        let mut parts: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if !parts.contains(&segment.part.as_str()) {
                parts.push(&segment.part);
            }
        }
        parts
    }
}

/// Poloidal flux loop position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FluxLoop {
    pub r: f64,
    pub z: f64,
}

impl FluxLoop {
    pub fn name(index: usize) -> String {
        format!("flux_loop_{}", index)
    }

    /// Area enclosed by the toroidal loop
    pub fn area(&self) -> f64 {
        PI * self.r * self.r
    }
}

/// Poloidal field probe position and orientation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    pub r: f64,
    pub z: f64,
    /// Poloidal angle
    pub theta: f64,
}

impl Probe {
    pub fn name(index: usize) -> String {
        format!("b_field_pol_probe_{}", index)
    }
}

/// One coil block as declared by the header row-count line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoilBlock {
    pub name: String,
    pub rows: usize,
    /// 0-based offset of the first row of the block
    pub start_offset: usize,
}

/// Row range of a self-counting section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpan {
    /// 0-based offset of the first line belonging to the section (its count line)
    pub start_offset: usize,
    /// Data rows following the count line
    pub rows: usize,
}

/// File boundaries discovered while decoding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub coil_blocks: Vec<CoilBlock>,
    pub passive: SectionSpan,
    pub wall: SectionSpan,
    pub vessel: Option<SectionSpan>,
    pub flux_loops: SectionSpan,
    pub probes: SectionSpan,
    /// Cursor offset after the probe section; later lines are ignored
    pub end_offset: usize,
}

impl SectionLayout {
    pub fn coil_rows(&self) -> usize {
        self.coil_blocks.iter().map(|block| block.rows).sum()
    }
}

/// Everything decoded from one geometry file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedFile {
    /// Units/comment line of the header, verbatim
    pub units: String,
    pub patches: Vec<RawPatch>,
    pub coils: Vec<Coil>,
    pub filaments: Vec<PassiveFilament>,
    pub wall: Vec<WallPoint>,
    pub vessel: Option<VesselContour>,
    pub flux_loops: Vec<FluxLoop>,
    pub probes: Vec<Probe>,
    pub layout: SectionLayout,
}

impl ParsedFile {
    pub fn coil(&self, name: &str) -> Option<&Coil> {
        self.coils.iter().find(|coil| coil.name == name)
    }

    pub fn patches_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RawPatch> + 'a {
        self.patches.iter().filter(move |patch| patch.name == name)
    }
}
