//! Equivalent-circuit aggregation.
//!
//! Reduces the raw winding-pack patches of each named coil to a single
//! rectangle with turns and area, and derives the electrical resistance of
//! passive filaments. Both operations are pure functions over the model.

use crate::constants::{PART_PREFIX_LEN, part_for_prefix};
use crate::error::{GeometryError, Result};
use crate::models::{BoundingRect, Coil, CoilPart, FilamentCircuit, PassiveFilament, RawPatch};
use std::collections::HashMap;
use tracing::debug;

/// Group patches by coil name in first-seen order and aggregate each group
pub fn aggregate_coils(patches: &[RawPatch]) -> Result<Vec<Coil>> {
    let mut groups: Vec<(&str, Vec<&RawPatch>)> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();

    for patch in patches {
        match group_index.get(patch.name.as_str()) {
            Some(&index) => groups[index].1.push(patch),
            None => {
                group_index.insert(patch.name.as_str(), groups.len());
                groups.push((patch.name.as_str(), vec![patch]));
            }
        }
    }

    let coils = groups
        .iter()
        .map(|(name, group)| aggregate_coil(name, group))
        .collect::<Result<Vec<_>>>()?;

    debug!(
        "Aggregated {} patches into {} coils",
        patches.len(),
        coils.len()
    );
    Ok(coils)
}

/// Machine part for a coil name, from its two-letter prefix
pub fn classify_coil(name: &str, line: usize) -> Result<CoilPart> {
    let prefix = name.get(..PART_PREFIX_LEN).unwrap_or(name);
    part_for_prefix(prefix).ok_or_else(|| GeometryError::UnknownPartPrefix {
        name: name.to_string(),
        prefix: prefix.to_string(),
        line,
    })
}

fn aggregate_coil(name: &str, patches: &[&RawPatch]) -> Result<Coil> {
    let line = patches.first().map(|patch| patch.line).unwrap_or(0);
    let part = classify_coil(name, line)?;

    let area: f64 = patches.iter().map(|patch| patch.area()).sum();
    if !area.is_finite() || area <= 0.0 {
        return Err(GeometryError::DegenerateGeometry {
            name: name.to_string(),
            line,
            area,
        });
    }

    // Weights are taken as fractions of the total so a lone patch keeps its
    // centre bit for bit.
    let centroid_r = patches
        .iter()
        .map(|patch| patch.r * (patch.area() / area))
        .sum();
    let centroid_z = patches
        .iter()
        .map(|patch| patch.z * (patch.area() / area))
        .sum();

    Ok(Coil {
        name: name.to_string(),
        part,
        turns: patches.iter().map(|patch| patch.turns).sum(),
        area,
        centroid_r,
        centroid_z,
        bounding_rect: BoundingRect {
            width: extent(patches, |patch| (patch.r, patch.dr)),
            height: extent(patches, |patch| (patch.z, patch.dz)),
        },
    })
}

/// Span of `centre ± size/2` over all patches along one axis
fn extent(patches: &[&RawPatch], axis: impl Fn(&RawPatch) -> (f64, f64)) -> f64 {
    let mut lower = (f64::INFINITY, 0);
    let mut upper = (f64::NEG_INFINITY, 0);

    for (index, patch) in patches.iter().enumerate() {
        let (centre, size) = axis(patch);
        let low = centre - size / 2.0;
        let high = centre + size / 2.0;
        if low < lower.0 {
            lower = (low, index);
        }
        if high > upper.0 {
            upper = (high, index);
        }
    }

    // One patch bounding both sides spans exactly its own size
    if lower.1 == upper.1 {
        return axis(patches[lower.1]).1;
    }
    upper.0 - lower.0
}

/// Add length, area and resistance to every filament
///
/// Order and indices are preserved and any previously computed circuit is
/// recomputed from the raw columns, so re-application is a no-op.
pub fn compute_resistance(filaments: &[PassiveFilament]) -> Result<Vec<PassiveFilament>> {
    filaments
        .iter()
        .map(|filament| {
            let area = filament.area();
            if !area.is_finite() || area <= 0.0 {
                return Err(GeometryError::DegenerateGeometry {
                    name: filament.name(),
                    line: filament.line,
                    area,
                });
            }
            let length = filament.length();
            Ok(PassiveFilament {
                circuit: Some(FilamentCircuit {
                    length,
                    area,
                    resistance: filament.resistivity * length / area,
                }),
                ..filament.clone()
            })
        })
        .collect()
}
