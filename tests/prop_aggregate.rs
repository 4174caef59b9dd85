//! Property-based tests for coil aggregation and round tripping.

use coil_geometry::{
    PassiveFilament, RawPatch, aggregate_coils, compute_resistance, parse_str, to_text,
};
use proptest::prelude::*;

fn patch(name: &str, turns: f64, r: f64, z: f64, dr: f64, dz: f64) -> RawPatch {
    RawPatch {
        name: name.to_string(),
        turns,
        r,
        z,
        dr,
        dz,
        line: 0,
    }
}

fn patch_strategy() -> impl Strategy<Value = (f64, f64, f64, f64, f64)> {
    (
        1.0f64..100.0,
        0.1f64..10.0,
        -5.0f64..5.0,
        0.001f64..1.0,
        0.001f64..1.0,
    )
}

proptest! {
    /// A lone patch keeps its own centre and size.
    #[test]
    fn single_patch_is_exact((turns, r, z, dr, dz) in patch_strategy()) {
        let coils = aggregate_coils(&[patch("EF1", turns, r, z, dr, dz)]).unwrap();

        prop_assert_eq!(coils.len(), 1);
        prop_assert_eq!(coils[0].centroid_r, r);
        prop_assert_eq!(coils[0].centroid_z, z);
        prop_assert_eq!(coils[0].bounding_rect.width, dr);
        prop_assert_eq!(coils[0].bounding_rect.height, dz);
        prop_assert_eq!(coils[0].turns, turns);
    }

    /// Equal-area patches average to their midpoint.
    #[test]
    fn equal_areas_give_midpoint(
        r1 in 0.1f64..10.0,
        r2 in 0.1f64..10.0,
        z1 in -5.0f64..5.0,
        z2 in -5.0f64..5.0,
        dr in 0.001f64..1.0,
        dz in 0.001f64..1.0,
    ) {
        let coils = aggregate_coils(&[
            patch("CS2", 1.0, r1, z1, dr, dz),
            patch("CS2", 1.0, r2, z2, dr, dz),
        ])
        .unwrap();

        prop_assert!((coils[0].centroid_r - (r1 + r2) / 2.0).abs() < 1e-12);
        prop_assert!((coils[0].centroid_z - (z1 + z2) / 2.0).abs() < 1e-12);
        prop_assert_eq!(coils[0].turns, 2.0);
    }

    /// The centroid lies inside the bounding rectangle and totals add up.
    #[test]
    fn centroid_inside_bounds(patches in prop::collection::vec(patch_strategy(), 1..12)) {
        let raw: Vec<RawPatch> = patches
            .iter()
            .map(|&(turns, r, z, dr, dz)| patch("FP3", turns, r, z, dr, dz))
            .collect();
        let coils = aggregate_coils(&raw).unwrap();
        let coil = &coils[0];

        let min_r = raw.iter().map(|p| p.r - p.dr / 2.0).fold(f64::INFINITY, f64::min);
        let max_r = raw.iter().map(|p| p.r + p.dr / 2.0).fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(coil.centroid_r >= min_r - 1e-9 && coil.centroid_r <= max_r + 1e-9);
        prop_assert!(coil.bounding_rect.width <= max_r - min_r + 1e-9);

        let turns: f64 = raw.iter().map(|p| p.turns).sum();
        let area: f64 = raw.iter().map(|p| p.area()).sum();
        prop_assert!((coil.turns - turns).abs() < 1e-9);
        prop_assert!((coil.area - area).abs() < 1e-12);
    }

    /// Recomputing filament resistance changes nothing.
    #[test]
    fn resistance_is_idempotent(
        r in 0.1f64..10.0,
        dr in 0.001f64..0.5,
        dz in 0.001f64..0.5,
        rho in 1e-8f64..1e-5,
    ) {
        let filaments = vec![PassiveFilament {
            index: 0,
            turns: 1.0,
            r,
            z: 0.0,
            dr,
            dz,
            resistivity: rho,
            line: 0,
            circuit: None,
        }];
        let once = compute_resistance(&filaments).unwrap();
        let twice = compute_resistance(&once).unwrap();
        prop_assert_eq!(&once, &twice);
        prop_assert!(once[0].circuit.unwrap().resistance > 0.0);
    }

    /// Writing a decoded file and decoding it again gives the same value.
    #[test]
    fn written_file_decodes_equal(
        patches in prop::collection::vec(patch_strategy(), 1..6),
        wall in prop::collection::vec((0.1f64..10.0, -5.0f64..5.0), 0..8),
    ) {
        let mut text = format!("1\nunits\n{}\n", patches.len());
        for (i, (turns, r, z, dr, dz)) in patches.iter().enumerate() {
            let name = if i + 1 == patches.len() { " EF7" } else { "" };
            text.push_str(&format!("{} {} {} {} {}{}\n", turns, r, z, dr, dz, name));
        }
        text.push_str("0\n");
        text.push_str(&format!("{}\n", wall.len()));
        for (r, z) in &wall {
            text.push_str(&format!("{} {}\n", r, z));
        }
        text.push_str("0\n0\n");

        let file = parse_str(&text).unwrap();
        let again = parse_str(&to_text(&file).unwrap()).unwrap();
        prop_assert_eq!(again, file);
    }
}
