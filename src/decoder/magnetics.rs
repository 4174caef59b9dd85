//! Flux-loop and magnetic probe sections.
//!
//! Each section is decoded from its own rows. Flux loops are never filled
//! from the probe table.

use super::read_counted_section;
use crate::cursor::{Column, ColumnSpec, SectionCursor};
use crate::error::Result;
use crate::models::{FluxLoop, Probe, Section, SectionSpan};

pub const FLUX_LOOP_COLUMNS: ColumnSpec =
    ColumnSpec::new(&[Column::float(0, "r"), Column::float(1, "z")]);

pub const PROBE_COLUMNS: ColumnSpec = ColumnSpec::new(&[
    Column::float(0, "r"),
    Column::float(1, "z"),
    Column::float(2, "theta"),
]);

pub fn decode_flux_loops(cursor: &mut SectionCursor<'_>) -> Result<(SectionSpan, Vec<FluxLoop>)> {
    let (span, rows) = read_counted_section(cursor, Section::FluxLoops, 0, &FLUX_LOOP_COLUMNS)?;
    let loops = rows
        .into_iter()
        .map(|row| FluxLoop {
            r: row.floats[0],
            z: row.floats[1],
        })
        .collect();
    Ok((span, loops))
}

pub fn decode_probes(cursor: &mut SectionCursor<'_>) -> Result<(SectionSpan, Vec<Probe>)> {
    let (span, rows) = read_counted_section(cursor, Section::Probes, 0, &PROBE_COLUMNS)?;
    let probes = rows
        .into_iter()
        .map(|row| Probe {
            r: row.floats[0],
            z: row.floats[1],
            theta: row.floats[2],
        })
        .collect();
    Ok((span, probes))
}
