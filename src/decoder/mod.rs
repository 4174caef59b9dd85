//! Geometry file decoder
//!
//! Walks the section chain of a geometry file in a single linear pass:
//!
//! ```text
//! header -> coils -> passive filaments -> wall -> [vessel contour] -> flux loops -> probes
//! ```
//!
//! Every section after the header announces its own row count, so the
//! start of each section is computed from the counts read before it. The
//! file is buffered in memory; sections are small.
//!
//! - [`coils`] - header and two-pass coil section
//! - [`passive`] - passive filaments
//! - [`wall`] - first wall and vessel contour
//! - [`magnetics`] - flux loops and magnetic probes
//!
//! ## Usage
//!
//! ```rust
//! let text = "1\nm\n1\n10 2.0 0.5 0.2 0.2 EF1\n0\n0\n0\n0\n";
//! let file = coil_geometry::parse(text.as_bytes())?;
//! assert_eq!(file.coils[0].name, "EF1");
//! # Ok::<(), coil_geometry::GeometryError>(())
//! ```

pub mod coils;
pub mod magnetics;
pub mod passive;
pub mod wall;

#[cfg(test)]
pub mod tests;

use crate::aggregate::{aggregate_coils, compute_resistance};
use crate::config::ParseOptions;
use crate::constants::COUNT_LINES;
use crate::cursor::{ColumnSpec, DecodedRow, SectionCursor};
use crate::error::{GeometryError, Result};
use crate::models::{ParsedFile, Section, SectionLayout, SectionSpan};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// Decode a geometry file with default options
pub fn parse<R: BufRead>(reader: R) -> Result<ParsedFile> {
    Decoder::default().parse(reader)
}

pub fn parse_str(text: &str) -> Result<ParsedFile> {
    Decoder::default().parse_str(text)
}

pub fn parse_file(path: &Path) -> Result<ParsedFile> {
    Decoder::default().parse_file(path)
}

/// Decoder configured with [`ParseOptions`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    options: ParseOptions,
}

impl Decoder {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Decode from a reader; `\n` and `\r\n` line endings are accepted
    pub fn parse<R: BufRead>(&self, mut reader: R) -> Result<ParsedFile> {
        let mut lines = Vec::new();
        let mut buffer = Vec::new();

        while reader.read_until(b'\n', &mut buffer)? > 0 {
            if buffer.last() == Some(&b'\n') {
                buffer.pop();
                if buffer.last() == Some(&b'\r') {
                    buffer.pop();
                }
            }
            let line = lines.len() + 1;
            let text = String::from_utf8(std::mem::take(&mut buffer)).map_err(|e| {
                GeometryError::malformed(
                    line,
                    &String::from_utf8_lossy(e.as_bytes()),
                    "line is not valid UTF-8",
                )
            })?;
            lines.push(text);
        }

        self.parse_lines(&lines)
    }

    pub fn parse_str(&self, text: &str) -> Result<ParsedFile> {
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        self.parse_lines(&lines)
    }

    pub fn parse_file(&self, path: &Path) -> Result<ParsedFile> {
        if !path.exists() {
            return Err(GeometryError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        info!("Decoding geometry file: {}", path.display());
        let file = File::open(path)?;
        self.parse(BufReader::new(file))
    }

    /// Decode already split lines
    pub fn parse_lines(&self, lines: &[String]) -> Result<ParsedFile> {
        let mut cursor = SectionCursor::new(lines);

        let header = coils::decode_header(&mut cursor)?;
        let coil_blocks = coils::scan_blocks(&cursor, &header.row_counts)?;
        let patches = coils::read_patches(&mut cursor, &coil_blocks)?;
        debug!(
            "Decoded {} patches for {} coils, cursor at line {}",
            patches.len(),
            coil_blocks.len(),
            cursor.offset() + 1
        );

        let (passive_span, filaments) = passive::decode_filaments(&mut cursor)?;
        let (wall_span, wall_points) = wall::decode_wall(&mut cursor)?;
        let (vessel_span, vessel) = if self.options.vessel_contours {
            let (span, contour) = wall::decode_vessel(&mut cursor)?;
            (Some(span), Some(contour))
        } else {
            (None, None)
        };
        let (flux_span, flux_loops) = magnetics::decode_flux_loops(&mut cursor)?;
        let (probe_span, probes) = magnetics::decode_probes(&mut cursor)?;

        let end_offset = cursor.offset();
        let trailing = lines[end_offset.min(lines.len())..]
            .iter()
            .filter(|line| !line.trim().is_empty())
            .count();
        if trailing > 0 {
            warn!(
                "Ignoring {} non-blank lines after the probe section (line {} onwards)",
                trailing,
                end_offset + 1
            );
        }

        let coils = aggregate_coils(&patches)?;
        let filaments = compute_resistance(&filaments)?;

        debug!(
            "Decoded {} coils, {} filaments, {} wall points, {} flux loops, {} probes",
            coils.len(),
            filaments.len(),
            wall_points.len(),
            flux_loops.len(),
            probes.len()
        );

        Ok(ParsedFile {
            units: header.units,
            patches,
            coils,
            filaments,
            wall: wall_points,
            vessel,
            flux_loops,
            probes,
            layout: SectionLayout {
                coil_blocks,
                passive: passive_span,
                wall: wall_span,
                vessel: vessel_span,
                flux_loops: flux_span,
                probes: probe_span,
                end_offset,
            },
        })
    }
}

/// Read a self-counting section at the cursor and advance past it
///
/// `lead_lines` free lines precede the count line. Returns the section span
/// (starting at the first lead line) and its decoded rows.
pub(crate) fn read_counted_section(
    cursor: &mut SectionCursor<'_>,
    section: Section,
    lead_lines: usize,
    spec: &ColumnSpec,
) -> Result<(SectionSpan, Vec<DecodedRow>)> {
    let start_offset = cursor.offset();
    let count_offset = start_offset + lead_lines;
    let rows = cursor.peek_count(count_offset, section)?;
    let decoded = cursor.read_rows(count_offset + COUNT_LINES, rows, spec, section)?;
    cursor.advance(lead_lines + COUNT_LINES + rows);

    debug!(
        "Decoded {} {} rows starting at line {}",
        rows,
        section,
        count_offset + COUNT_LINES + 1
    );
    Ok((SectionSpan { start_offset, rows }, decoded))
}
