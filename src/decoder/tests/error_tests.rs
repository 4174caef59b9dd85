//! Failure modes of whole-file decoding

use super::SAMPLE;
use crate::decoder::{parse, parse_file, parse_str};
use crate::error::GeometryError;
use crate::models::Section;

fn replace_line(text: &str, index: usize, replacement: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    lines[index] = replacement;
    lines.join("\n")
}

#[test]
fn test_short_filament_section() {
    // Declares 5 filaments; only 4 lines remain before EOF once the
    // following sections are dropped
    let lines: Vec<&str> = SAMPLE.lines().collect();
    let text = format!("{}\n5\n{}\n", lines[..9].join("\n"), lines[10..14].join("\n"));

    match parse_str(&text).unwrap_err() {
        GeometryError::TruncatedSection {
            section,
            line,
            declared,
            available,
        } => {
            assert_eq!(section, Section::PassiveFilaments);
            assert_eq!(line, 11);
            assert_eq!(declared, 5);
            assert_eq!(available, 4);
        }
        other => panic!("Expected TruncatedSection error, got {:?}", other),
    }
}

#[test]
fn test_missing_probe_section() {
    let lines: Vec<&str> = SAMPLE.lines().collect();
    let text = lines[..20].join("\n");

    match parse_str(&text).unwrap_err() {
        GeometryError::TruncatedSection { section, line, .. } => {
            assert_eq!(section, Section::Probes);
            assert_eq!(line, 21);
        }
        other => panic!("Expected TruncatedSection error, got {:?}", other),
    }
}

#[test]
fn test_bad_wall_number() {
    let text = replace_line(SAMPLE, 14, "2.5 minus-one");
    match parse_str(&text).unwrap_err() {
        GeometryError::MalformedRow { line, text, .. } => {
            assert_eq!(line, 15);
            assert_eq!(text, "2.5 minus-one");
        }
        other => panic!("Expected MalformedRow error, got {:?}", other),
    }
}

#[test]
fn test_unnamed_coil_block() {
    let text = replace_line(SAMPLE, 5, "10.0 2.00 1.00 0.20 0.20");
    let err = parse_str(&text).unwrap_err();
    assert!(matches!(err, GeometryError::MalformedRow { line: 6, .. }));
}

#[test]
fn test_unknown_coil_prefix() {
    let text = replace_line(SAMPLE, 5, "10.0 2.00 1.00 0.20 0.20 XX9");
    match parse_str(&text).unwrap_err() {
        GeometryError::UnknownPartPrefix { name, prefix, line } => {
            assert_eq!(name, "XX9");
            assert_eq!(prefix, "XX");
            assert_eq!(line, 6);
        }
        other => panic!("Expected UnknownPartPrefix error, got {:?}", other),
    }
}

#[test]
fn test_zero_area_filament() {
    let text = replace_line(SAMPLE, 11, "1.0 1.6 0.5 0.0 0.02 1.2e-6");
    match parse_str(&text).unwrap_err() {
        GeometryError::DegenerateGeometry { name, line, .. } => {
            assert_eq!(name, "vv_1");
            assert_eq!(line, 12);
        }
        other => panic!("Expected DegenerateGeometry error, got {:?}", other),
    }
}

#[test]
fn test_header_count_mismatch() {
    let text = replace_line(SAMPLE, 2, "2 1");
    let err = parse_str(&text).unwrap_err();
    assert!(matches!(err, GeometryError::MalformedRow { line: 3, .. }));
}

#[test]
fn test_empty_input() {
    let err = parse_str("").unwrap_err();
    assert!(matches!(
        err,
        GeometryError::TruncatedSection {
            section: Section::Header,
            ..
        }
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("coil_vv_OP1.dat");
    match parse_file(&path).unwrap_err() {
        GeometryError::FileNotFound { path: missing } => assert_eq!(missing, path),
        other => panic!("Expected FileNotFound error, got {:?}", other),
    }
}

#[test]
fn test_invalid_utf8_names_line() {
    let mut bytes = SAMPLE.as_bytes().to_vec();
    let name_at = SAMPLE.find("CS1U").unwrap();
    bytes[name_at + 3] = 0xC9;

    match parse(bytes.as_slice()).unwrap_err() {
        GeometryError::MalformedRow { line, text, .. } => {
            assert_eq!(line, 5);
            assert!(text.starts_with("1.0 1.10 0.00 0.10 0.20 CS1"));
            assert!(text.contains('\u{FFFD}'));
        }
        other => panic!("Expected MalformedRow error, got {:?}", other),
    }
}

#[test]
fn test_crlf_reader_matches_lf() {
    let crlf = SAMPLE.replace('\n', "\r\n");
    let file = parse(crlf.as_bytes()).unwrap();
    assert_eq!(file, parse_str(SAMPLE).unwrap());
}
