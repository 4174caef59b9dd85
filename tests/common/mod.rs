//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const GEOMETRY: &str = "\
2
units
1 2
5.0 1.20 0.00 0.10 0.40 CS1
2.0 3.00 1.50 0.20 0.20
2.0 3.20 1.50 0.20 0.20 EF2
3
1.0 2.0 1.0 0.02 0.02 7.4e-7
1.0 2.1 1.0 0.02 0.02 7.4e-7
1.0 2.2 1.0 0.02 0.02 7.4e-7
3
1.0 -1.5
3.5 0.0
1.0 1.5
2
1.1 0.0
3.4 0.0
2
1.1 0.3 0.0
3.4 -0.3 3.14
";

pub const VESSEL_GEOMETRY: &str = "\
1
units
1
10.0 2.00 1.00 0.20 0.20 EF1
1
1.0 2.0 1.0 0.02 0.02 7.4e-7
2
1.0 -1.5
1.0 1.5
vessel outline
2
1.0 -1.0 1.0 1.0 0 l_inboard,
1.0 1.0 3.0 1.0 0
1
1.1 0.0
1
1.1 0.3 0.0
";

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
