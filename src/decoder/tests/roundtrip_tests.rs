//! Writing a decoded file back and decoding it again

use super::{SAMPLE, sample_with_vessel};
use crate::config::ParseOptions;
use crate::decoder::{Decoder, parse_str};
use crate::writer::to_text;

#[test]
fn test_sample_round_trip() {
    let file = parse_str(SAMPLE).unwrap();
    let text = to_text(&file).unwrap();
    assert_eq!(parse_str(&text).unwrap(), file);
}

#[test]
fn test_vessel_round_trip() {
    let decoder = Decoder::new(ParseOptions::default().with_vessel_contours());
    let file = decoder.parse_str(&sample_with_vessel()).unwrap();
    let text = to_text(&file).unwrap();
    let again = decoder.parse_str(&text).unwrap();
    assert_eq!(again, file);
    assert_eq!(again.vessel.unwrap().segments[1].part, "inner");
}

#[test]
fn test_round_trip_with_trailing_blank_lines() {
    let file = parse_str(&format!("{}\n\n", SAMPLE)).unwrap();
    let again = parse_str(&to_text(&file).unwrap()).unwrap();
    assert_eq!(again, file);
}

#[test]
fn test_round_trip_drops_trailing_text() {
    let file = parse_str(&format!("{}trailing\n", SAMPLE)).unwrap();
    let text = to_text(&file).unwrap();
    assert!(!text.contains("trailing"));
    assert_eq!(parse_str(&text).unwrap(), file);
}
