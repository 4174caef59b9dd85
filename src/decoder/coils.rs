//! Header and coil section decoding.
//!
//! The header declares one row count per coil, but each coil's name only
//! appears as the trailing token of the last row of its own block. The
//! section is therefore decoded in two passes: a scan that builds the
//! `(rows, name, start_offset)` block table, then a numeric re-read of the
//! same rows tagged from that table.

use crate::constants::{COIL_NUMERIC_COLUMNS, HEADER_LINES, ROW_COUNT_LINE, UNITS_LINE};
use crate::cursor::{Column, ColumnSpec, SectionCursor};
use crate::error::{GeometryError, Result};
use crate::models::{CoilBlock, RawPatch, Section};
use tracing::debug;

/// Numeric columns of a winding-pack patch row
pub const PATCH_COLUMNS: ColumnSpec = ColumnSpec::new(&[
    Column::float(0, "turns"),
    Column::float(1, "r"),
    Column::float(2, "z"),
    Column::float(3, "dr"),
    Column::float(4, "dz"),
]);

/// The three header lines
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub coil_count: usize,
    pub units: String,
    pub row_counts: Vec<usize>,
}

/// Read the header and leave the cursor on the first coil row
pub fn decode_header(cursor: &mut SectionCursor<'_>) -> Result<Header> {
    let rows = cursor.rows(0, HEADER_LINES, Section::Header)?;

    let coil_count = rows[0].parse::<usize>(0, "coil count")?;
    let units = rows[UNITS_LINE].text.trim().to_string();

    let count_row = &rows[ROW_COUNT_LINE];
    let row_counts = (0..count_row.len())
        .map(|index| count_row.parse::<usize>(index, "coil rows"))
        .collect::<Result<Vec<_>>>()?;

    if row_counts.len() != coil_count {
        return Err(GeometryError::malformed(
            count_row.line,
            count_row.text,
            format!(
                "header declares {} coils but lists {} row counts",
                coil_count,
                row_counts.len()
            ),
        ));
    }
    if let Some(position) = row_counts.iter().position(|&rows| rows == 0) {
        return Err(GeometryError::malformed(
            count_row.line,
            count_row.text,
            format!("coil {} declares no rows", position + 1),
        ));
    }

    cursor.advance(HEADER_LINES);
    Ok(Header {
        coil_count,
        units,
        row_counts,
    })
}

/// First pass: find each block's name on its last row
///
/// Does not move the cursor. Each block only looks at its own rows, so a
/// one-row block is named from that single row.
pub fn scan_blocks(cursor: &SectionCursor<'_>, row_counts: &[usize]) -> Result<Vec<CoilBlock>> {
    let mut offset = cursor.offset();
    let mut blocks = Vec::with_capacity(row_counts.len());

    for &rows in row_counts {
        let available = cursor.remaining_from(offset);
        if available < rows {
            return Err(GeometryError::TruncatedSection {
                section: Section::Coils,
                line: offset + 1,
                declared: rows,
                available,
            });
        }

        let last = cursor.row(offset + rows - 1, Section::Coils)?;
        if last.len() <= COIL_NUMERIC_COLUMNS {
            return Err(GeometryError::malformed(
                last.line,
                last.text,
                "last row of coil block carries no coil name",
            ));
        }
        let name = last.last().unwrap_or_default().to_string();

        debug!("Coil block {} at line {}: {} rows", name, offset + 1, rows);
        blocks.push(CoilBlock {
            name,
            rows,
            start_offset: offset,
        });
        offset += rows;
    }

    Ok(blocks)
}

/// Second pass: decode the numeric columns block by block and advance past them
pub fn read_patches(
    cursor: &mut SectionCursor<'_>,
    blocks: &[CoilBlock],
) -> Result<Vec<RawPatch>> {
    let mut patches = Vec::new();

    for block in blocks {
        let rows = cursor.read_rows(
            block.start_offset,
            block.rows,
            &PATCH_COLUMNS,
            Section::Coils,
        )?;
        patches.extend(rows.into_iter().map(|row| RawPatch {
            name: block.name.clone(),
            turns: row.floats[0],
            r: row.floats[1],
            z: row.floats[2],
            dr: row.floats[3],
            dz: row.floats[4],
            line: row.line,
        }));
        cursor.advance(block.rows);
    }

    Ok(patches)
}
