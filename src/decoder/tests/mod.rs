//! Whole-file decoding tests
//!
//! Exercises the full section chain on small hand-written geometry files.

pub mod error_tests;
pub mod roundtrip_tests;

/// Three coils (CS, EF and in-vessel), two filaments, four wall points,
/// two flux loops and three probes
pub const SAMPLE: &str = "\
3
units: m, m, m, m, ohm m
2 1 3
1.0 1.00 0.00 0.10 0.20
1.0 1.10 0.00 0.10 0.20 CS1U
10.0 2.00 1.00 0.20 0.20 EF1
4.0 0.50 2.00 0.05 0.10
4.0 0.55 2.00 0.05 0.10
4.0 0.60 2.00 0.05 0.10 FP1
2
1.0 1.5 0.5 0.01 0.02 1.2e-6
1.0 1.6 0.5 0.01 0.02 1.2e-6
4
1.0 -1.0
2.5 -1.0
2.5 1.0
1.0 1.0
2
1.2 0.0
2.4 0.0
3
1.3 0.2 0.0
1.3 -0.2 3.14159
2.3 0.0 1.5708
";

/// Vessel contour section, placed between the wall and the flux loops
pub const VESSEL: &str = "\
vessel contour
3
1.0 0.0 1.0 1.0 0 p_inner,
1.0 1.0 2.0 1.0 0
2.0 1.0 2.0 0.0 0 p_outer
";

/// `SAMPLE` with the vessel contour section inserted after line 17
pub fn sample_with_vessel() -> String {
    let lines: Vec<&str> = SAMPLE.lines().collect();
    let mut text = lines[..17].join("\n");
    text.push('\n');
    text.push_str(VESSEL);
    text.push_str(&lines[17..].join("\n"));
    text.push('\n');
    text
}
