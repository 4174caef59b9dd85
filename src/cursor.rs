//! Section cursor over a fully buffered geometry file.
//!
//! Sections announce their own row counts, so the start of each section is
//! only known once the sections before it have been measured. The cursor
//! keeps the running offset and offers random-access reads so a count can
//! be peeked before the section is skipped.

use crate::error::{GeometryError, Result};
use crate::models::Section;
use crate::tokenizer::Row;

/// Value type of a decoded column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Float,
    /// Text column that may be absent on a row
    OptionalText,
}

/// Source column mapped onto a record field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub field: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn float(index: usize, field: &'static str) -> Self {
        Self {
            index,
            field,
            kind: ColumnKind::Float,
        }
    }

    pub const fn optional_text(index: usize, field: &'static str) -> Self {
        Self {
            index,
            field,
            kind: ColumnKind::OptionalText,
        }
    }
}

/// Ordered column layout of one record family. Columns not listed are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    pub columns: &'static [Column],
}

impl ColumnSpec {
    pub const fn new(columns: &'static [Column]) -> Self {
        Self { columns }
    }

    fn decode(&self, row: &Row<'_>) -> Result<DecodedRow> {
        let mut floats = Vec::new();
        let mut texts = Vec::new();

        for column in self.columns {
            match column.kind {
                ColumnKind::Float => floats.push(row.parse::<f64>(column.index, column.field)?),
                ColumnKind::OptionalText => texts.push(
                    row.tokens()
                        .get(column.index)
                        .map(|token| token.to_string()),
                ),
            }
        }

        Ok(DecodedRow {
            line: row.line,
            floats,
            texts,
        })
    }
}

/// Row decoded against a [`ColumnSpec`]
///
/// `floats` and `texts` hold the numeric and text columns in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRow {
    /// 1-based line number
    pub line: usize,
    pub floats: Vec<f64>,
    pub texts: Vec<Option<String>>,
}

/// Running offset into a buffered file
#[derive(Debug)]
pub struct SectionCursor<'a> {
    lines: &'a [String],
    offset: usize,
}

impl<'a> SectionCursor<'a> {
    pub fn new(lines: &'a [String]) -> Self {
        Self { lines, offset: 0 }
    }

    /// Next unread line (0-based)
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Lines at or after `offset`
    pub fn remaining_from(&self, offset: usize) -> usize {
        self.lines.len().saturating_sub(offset)
    }

    pub fn line(&self, offset: usize) -> Option<&'a str> {
        self.lines.get(offset).map(String::as_str)
    }

    pub fn advance(&mut self, n: usize) {
        self.offset += n;
    }

    /// Tokenized line at `offset`, or `TruncatedSection` past the end of the file
    pub fn row(&self, offset: usize, section: Section) -> Result<Row<'a>> {
        self.line(offset)
            .map(|text| Row::new(offset, text))
            .ok_or(GeometryError::TruncatedSection {
                section,
                line: offset + 1,
                declared: 1,
                available: 0,
            })
    }

    /// First token of the line at `offset` as a row count, without advancing
    pub fn peek_count(&self, offset: usize, section: Section) -> Result<usize> {
        self.row(offset, section)?.parse::<usize>(0, "count")
    }

    /// Tokenized rows `offset..offset + n`
    pub fn rows(&self, offset: usize, n: usize, section: Section) -> Result<Vec<Row<'a>>> {
        let available = self.remaining_from(offset);
        if available < n {
            return Err(GeometryError::TruncatedSection {
                section,
                line: offset + 1,
                declared: n,
                available,
            });
        }

        Ok(self.lines[offset..offset + n]
            .iter()
            .enumerate()
            .map(|(i, text)| Row::new(offset + i, text))
            .collect())
    }

    /// Decode exactly `n` rows starting at `offset` against `spec`
    pub fn read_rows(
        &self,
        offset: usize,
        n: usize,
        spec: &ColumnSpec,
        section: Section,
    ) -> Result<Vec<DecodedRow>> {
        self.rows(offset, n, section)?
            .iter()
            .map(|row| spec.decode(row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINT: ColumnSpec = ColumnSpec::new(&[Column::float(0, "r"), Column::float(1, "z")]);
    const LABELLED: ColumnSpec = ColumnSpec::new(&[
        Column::float(0, "r"),
        Column::optional_text(3, "label"),
    ]);

    fn lines(text: &str) -> Vec<String> {
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_peek_does_not_advance() {
        let lines = lines("2\n1.0 2.0\n3.0 4.0");
        let cursor = SectionCursor::new(&lines);
        assert_eq!(cursor.peek_count(0, Section::Wall).unwrap(), 2);
        assert_eq!(cursor.offset(), 0);
    }

    #[test]
    fn test_read_rows_ignores_extra_columns() {
        let lines = lines("2\n1.0 2.0 annotation\n3.0   4.0");
        let mut cursor = SectionCursor::new(&lines);
        let rows = cursor.read_rows(1, 2, &POINT, Section::Wall).unwrap();
        assert_eq!(rows[0].floats, vec![1.0, 2.0]);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[1].floats, vec![3.0, 4.0]);
        cursor.advance(3);
        assert_eq!(cursor.offset(), 3);
    }

    #[test]
    fn test_read_rows_truncated() {
        let lines = lines("3\n1.0 2.0");
        let cursor = SectionCursor::new(&lines);
        match cursor.read_rows(1, 3, &POINT, Section::Wall).unwrap_err() {
            GeometryError::TruncatedSection {
                section,
                line,
                declared,
                available,
            } => {
                assert_eq!(section, Section::Wall);
                assert_eq!(line, 2);
                assert_eq!(declared, 3);
                assert_eq!(available, 1);
            }
            other => panic!("Expected TruncatedSection, got {:?}", other),
        }
    }

    #[test]
    fn test_optional_text_column() {
        let lines = lines("1.0 0 0 part_a\n2.0");
        let cursor = SectionCursor::new(&lines);
        let rows = cursor.read_rows(0, 2, &LABELLED, Section::VesselContours).unwrap();
        assert_eq!(rows[0].texts, vec![Some("part_a".to_string())]);
        assert_eq!(rows[1].texts, vec![None]);
    }

    #[test]
    fn test_peek_past_end() {
        let lines = lines("1");
        let cursor = SectionCursor::new(&lines);
        assert!(matches!(
            cursor.peek_count(1, Section::Probes),
            Err(GeometryError::TruncatedSection { line: 2, .. })
        ));
    }

    #[test]
    fn test_count_must_be_unsigned() {
        let lines = lines("-3");
        let cursor = SectionCursor::new(&lines);
        assert!(matches!(
            cursor.peek_count(0, Section::Wall),
            Err(GeometryError::MalformedRow { line: 1, .. })
        ));
    }
}
