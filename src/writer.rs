//! Re-serialization into the legacy column layout.
//!
//! Writes a [`ParsedFile`] back as a geometry text file that decodes to an
//! equal value. Floats use Rust's shortest round-trip formatting. Columns
//! the decoder ignores are not reproduced, except for the placeholder in
//! the unused vessel contour column.

use crate::error::Result;
use crate::models::ParsedFile;
use std::io::Write;

/// Write `file` in the geometry text layout
pub fn write_geometry<W: Write>(file: &ParsedFile, mut out: W) -> Result<()> {
    let blocks = &file.layout.coil_blocks;
    writeln!(out, "{}", blocks.len())?;
    writeln!(out, "{}", file.units)?;
    let counts: Vec<String> = blocks.iter().map(|block| block.rows.to_string()).collect();
    writeln!(out, "{}", counts.join(" "))?;

    let mut patches = file.patches.iter();
    for block in blocks {
        for patch in patches.by_ref().take(block.rows) {
            writeln!(
                out,
                "{} {} {} {} {} {}",
                patch.turns, patch.r, patch.z, patch.dr, patch.dz, block.name
            )?;
        }
    }

    writeln!(out, "{}", file.filaments.len())?;
    for filament in &file.filaments {
        writeln!(
            out,
            "{} {} {} {} {} {}",
            filament.turns, filament.r, filament.z, filament.dr, filament.dz, filament.resistivity
        )?;
    }

    writeln!(out, "{}", file.wall.len())?;
    for point in &file.wall {
        writeln!(out, "{} {}", point.r, point.z)?;
    }

    if let Some(vessel) = &file.vessel {
        writeln!(out, "{}", vessel.title)?;
        writeln!(out, "{}", vessel.segments.len())?;
        for segment in &vessel.segments {
            writeln!(
                out,
                "{} {} {} {} 0 {}",
                segment.r0, segment.z0, segment.r1, segment.z1, segment.label
            )?;
        }
    }

    writeln!(out, "{}", file.flux_loops.len())?;
    for flux_loop in &file.flux_loops {
        writeln!(out, "{} {}", flux_loop.r, flux_loop.z)?;
    }

    writeln!(out, "{}", file.probes.len())?;
    for probe in &file.probes {
        writeln!(out, "{} {} {}", probe.r, probe.z, probe.theta)?;
    }

    out.flush()?;
    Ok(())
}

/// Render `file` as geometry text
pub fn to_text(file: &ParsedFile) -> Result<String> {
    let mut buffer = Vec::new();
    write_geometry(file, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
