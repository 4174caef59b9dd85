//! First-wall contour and multi-part vessel contour sections.
//!
//! The wall is a plain `r z` polyline. The vessel contour carries segment
//! end points in columns 0-3 and a part label in column 5; a row without a
//! label belongs to the same part as the row before it.

use super::read_counted_section;
use crate::constants::{PART_LABEL_PREFIX_LEN, PART_LABEL_SEPARATORS, VESSEL_TITLE_LINES};
use crate::cursor::{Column, ColumnSpec, SectionCursor};
use crate::error::{GeometryError, Result};
use crate::models::{Section, SectionSpan, VesselContour, VesselSegment, WallPoint};

pub const WALL_COLUMNS: ColumnSpec =
    ColumnSpec::new(&[Column::float(0, "r"), Column::float(1, "z")]);

pub const VESSEL_COLUMNS: ColumnSpec = ColumnSpec::new(&[
    Column::float(0, "r0"),
    Column::float(1, "z0"),
    Column::float(2, "r1"),
    Column::float(3, "z1"),
    Column::optional_text(5, "part"),
]);

/// Strip the label prefix and stray separators from a vessel part label
pub fn clean_part_label(label: &str) -> String {
    label
        .chars()
        .skip(PART_LABEL_PREFIX_LEN)
        .filter(|c| !PART_LABEL_SEPARATORS.contains(c))
        .collect()
}

pub fn decode_wall(cursor: &mut SectionCursor<'_>) -> Result<(SectionSpan, Vec<WallPoint>)> {
    let (span, rows) = read_counted_section(cursor, Section::Wall, 0, &WALL_COLUMNS)?;
    let points = rows
        .into_iter()
        .map(|row| WallPoint {
            r: row.floats[0],
            z: row.floats[1],
        })
        .collect();
    Ok((span, points))
}

/// Title line, count line, then the segment rows
pub fn decode_vessel(cursor: &mut SectionCursor<'_>) -> Result<(SectionSpan, VesselContour)> {
    let title = cursor
        .row(cursor.offset(), Section::VesselContours)?
        .text
        .trim()
        .to_string();
    let (span, rows) = read_counted_section(
        cursor,
        Section::VesselContours,
        VESSEL_TITLE_LINES,
        &VESSEL_COLUMNS,
    )?;

    let mut segments = Vec::with_capacity(rows.len());
    let mut current: Option<String> = None;
    for row in rows {
        if let Some(label) = row.texts[0].clone() {
            current = Some(label);
        }
        let label = current.clone().ok_or_else(|| GeometryError::MalformedRow {
            line: row.line,
            text: cursor.line(row.line - 1).unwrap_or_default().to_string(),
            reason: "first vessel contour row has no part label".to_string(),
        })?;

        segments.push(VesselSegment {
            r0: row.floats[0],
            z0: row.floats[1],
            r1: row.floats[2],
            z1: row.floats[3],
            part: clean_part_label(&label),
            label,
        });
    }

    Ok((span, VesselContour { title, segments }))
}
