//! Passive filament section: count line, then `turns r z dr dz resistivity` rows.

use super::read_counted_section;
use crate::cursor::{Column, ColumnSpec, SectionCursor};
use crate::error::Result;
use crate::models::{PassiveFilament, Section, SectionSpan};

pub const FILAMENT_COLUMNS: ColumnSpec = ColumnSpec::new(&[
    Column::float(0, "turns"),
    Column::float(1, "r"),
    Column::float(2, "z"),
    Column::float(3, "dr"),
    Column::float(4, "dz"),
    Column::float(5, "resistivity"),
]);

pub fn decode_filaments(
    cursor: &mut SectionCursor<'_>,
) -> Result<(SectionSpan, Vec<PassiveFilament>)> {
    let (span, rows) =
        read_counted_section(cursor, Section::PassiveFilaments, 0, &FILAMENT_COLUMNS)?;

    let filaments = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| PassiveFilament {
            index,
            turns: row.floats[0],
            r: row.floats[1],
            z: row.floats[2],
            dr: row.floats[3],
            dz: row.floats[4],
            resistivity: row.floats[5],
            line: row.line,
            circuit: None,
        })
        .collect();

    Ok((span, filaments))
}
