//! Parquet export of decoded geometry tables
//!
//! Writes one table per record family, named `<table>_<label>.parquet`,
//! and reloads the point tables for later use.

use crate::config::CompressionAlgorithm;
use crate::constants::tables;
use crate::error::{GeometryError, Result};
use crate::models::{FluxLoop, ParsedFile, PassiveFilament, Probe, VesselSegment, WallPoint};

use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes parquet tables for a decoded file
#[derive(Debug, Clone)]
pub struct TableExporter {
    output_dir: PathBuf,
    compression: CompressionAlgorithm,
}

impl TableExporter {
    pub fn new(output_dir: impl Into<PathBuf>, compression: CompressionAlgorithm) -> Self {
        Self {
            output_dir: output_dir.into(),
            compression,
        }
    }

    pub fn table_path(&self, table: &str, label: &str) -> PathBuf {
        self.output_dir.join(format!("{}_{}.parquet", table, label))
    }

    /// Write every table of `file`, returning the paths written
    pub fn export(&self, file: &ParsedFile, label: &str) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.output_dir)?;

        let mut written = vec![
            self.write_table(tables::COILS, label, coils_frame(file)?)?,
            self.write_table(tables::PASSIVE, label, filaments_frame(&file.filaments)?)?,
            self.write_table(tables::WALL, label, wall_frame(&file.wall)?)?,
        ];
        if let Some(vessel) = &file.vessel {
            written.push(self.write_table(
                tables::CONTOUR,
                label,
                vessel_frame(&vessel.segments)?,
            )?);
        }
        written.push(self.write_table(
            tables::FLUX_LOOPS,
            label,
            flux_loops_frame(&file.flux_loops)?,
        )?);
        written.push(self.write_table(tables::PROBES, label, probes_frame(&file.probes)?)?);

        Ok(written)
    }

    fn write_table(&self, table: &str, label: &str, mut df: DataFrame) -> Result<PathBuf> {
        let path = self.table_path(table, label);
        let file = File::create(&path)?;
        ParquetWriter::new(file)
            .with_compression(self.compression.to_polars_compression())
            .finish(&mut df)
            .map_err(|e| GeometryError::ProcessingFailed {
                path: path.clone(),
                reason: format!("Failed to write parquet table: {}", e),
            })?;
        debug!("Wrote {} rows to {}", df.height(), path.display());
        Ok(path)
    }
}

/// One row per aggregated coil, with the number of patches it was built from
pub fn coils_frame(file: &ParsedFile) -> Result<DataFrame> {
    let coils = &file.coils;
    Ok(df!(
        "name" => coils.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        "patches" => coils
            .iter()
            .map(|c| file.patches_for(&c.name).count() as u32)
            .collect::<Vec<_>>(),
        "part" => coils.iter().map(|c| c.part.as_str()).collect::<Vec<_>>(),
        "turns" => coils.iter().map(|c| c.turns).collect::<Vec<_>>(),
        "area" => coils.iter().map(|c| c.area).collect::<Vec<_>>(),
        "r" => coils.iter().map(|c| c.centroid_r).collect::<Vec<_>>(),
        "z" => coils.iter().map(|c| c.centroid_z).collect::<Vec<_>>(),
        "width" => coils.iter().map(|c| c.bounding_rect.width).collect::<Vec<_>>(),
        "height" => coils.iter().map(|c| c.bounding_rect.height).collect::<Vec<_>>()
    )?)
}

pub fn filaments_frame(filaments: &[PassiveFilament]) -> Result<DataFrame> {
    let circuit = |f: &PassiveFilament| f.circuit.unwrap_or_default();
    Ok(df!(
        "name" => filaments.iter().map(|f| f.name()).collect::<Vec<_>>(),
        "nturn" => filaments.iter().map(|f| f.turns).collect::<Vec<_>>(),
        "r" => filaments.iter().map(|f| f.r).collect::<Vec<_>>(),
        "z" => filaments.iter().map(|f| f.z).collect::<Vec<_>>(),
        "dr" => filaments.iter().map(|f| f.dr).collect::<Vec<_>>(),
        "dz" => filaments.iter().map(|f| f.dz).collect::<Vec<_>>(),
        "rho" => filaments.iter().map(|f| f.resistivity).collect::<Vec<_>>(),
        "length" => filaments.iter().map(|f| circuit(f).length).collect::<Vec<_>>(),
        "area" => filaments.iter().map(|f| circuit(f).area).collect::<Vec<_>>(),
        "resistance" => filaments.iter().map(|f| circuit(f).resistance).collect::<Vec<_>>()
    )?)
}

pub fn wall_frame(points: &[WallPoint]) -> Result<DataFrame> {
    Ok(df!(
        "r" => points.iter().map(|p| p.r).collect::<Vec<_>>(),
        "z" => points.iter().map(|p| p.z).collect::<Vec<_>>()
    )?)
}

pub fn vessel_frame(segments: &[VesselSegment]) -> Result<DataFrame> {
    Ok(df!(
        "r0" => segments.iter().map(|s| s.r0).collect::<Vec<_>>(),
        "z0" => segments.iter().map(|s| s.z0).collect::<Vec<_>>(),
        "r1" => segments.iter().map(|s| s.r1).collect::<Vec<_>>(),
        "z1" => segments.iter().map(|s| s.z1).collect::<Vec<_>>(),
        "label" => segments.iter().map(|s| s.label.as_str()).collect::<Vec<_>>(),
        "part" => segments.iter().map(|s| s.part.as_str()).collect::<Vec<_>>()
    )?)
}

pub fn flux_loops_frame(loops: &[FluxLoop]) -> Result<DataFrame> {
    Ok(df!(
        "name" => (0..loops.len()).map(FluxLoop::name).collect::<Vec<_>>(),
        "r" => loops.iter().map(|l| l.r).collect::<Vec<_>>(),
        "z" => loops.iter().map(|l| l.z).collect::<Vec<_>>(),
        "area" => loops.iter().map(|l| l.area()).collect::<Vec<_>>()
    )?)
}

pub fn probes_frame(probes: &[Probe]) -> Result<DataFrame> {
    Ok(df!(
        "name" => (0..probes.len()).map(Probe::name).collect::<Vec<_>>(),
        "r" => probes.iter().map(|p| p.r).collect::<Vec<_>>(),
        "z" => probes.iter().map(|p| p.z).collect::<Vec<_>>(),
        "theta" => probes.iter().map(|p| p.theta).collect::<Vec<_>>()
    )?)
}

fn read_table(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(GeometryError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path)?;
    Ok(ParquetReader::new(file).finish()?)
}

fn float_column(df: &DataFrame, name: &str, path: &Path) -> Result<Vec<f64>> {
    df.column(name)?
        .as_materialized_series()
        .f64()?
        .into_iter()
        .collect::<Option<Vec<f64>>>()
        .ok_or_else(|| null_column(name, path))
}

fn text_column(df: &DataFrame, name: &str, path: &Path) -> Result<Vec<String>> {
    df.column(name)?
        .as_materialized_series()
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect::<Option<Vec<String>>>()
        .ok_or_else(|| null_column(name, path))
}

fn null_column(name: &str, path: &Path) -> GeometryError {
    GeometryError::ProcessingFailed {
        path: path.to_path_buf(),
        reason: format!("column '{}' contains nulls", name),
    }
}

pub fn load_wall(path: &Path) -> Result<Vec<WallPoint>> {
    let df = read_table(path)?;
    let r = float_column(&df, "r", path)?;
    let z = float_column(&df, "z", path)?;
    Ok(r.into_iter().zip(z).map(|(r, z)| WallPoint { r, z }).collect())
}

pub fn load_flux_loops(path: &Path) -> Result<Vec<FluxLoop>> {
    let df = read_table(path)?;
    let r = float_column(&df, "r", path)?;
    let z = float_column(&df, "z", path)?;
    Ok(r.into_iter().zip(z).map(|(r, z)| FluxLoop { r, z }).collect())
}

pub fn load_probes(path: &Path) -> Result<Vec<Probe>> {
    let df = read_table(path)?;
    let r = float_column(&df, "r", path)?;
    let z = float_column(&df, "z", path)?;
    let theta = float_column(&df, "theta", path)?;
    Ok(r.into_iter()
        .zip(z)
        .zip(theta)
        .map(|((r, z), theta)| Probe { r, z, theta })
        .collect())
}

pub fn load_vessel_contours(path: &Path) -> Result<Vec<VesselSegment>> {
    let df = read_table(path)?;
    let r0 = float_column(&df, "r0", path)?;
    let z0 = float_column(&df, "z0", path)?;
    let r1 = float_column(&df, "r1", path)?;
    let z1 = float_column(&df, "z1", path)?;
    let labels = text_column(&df, "label", path)?;
    let parts = text_column(&df, "part", path)?;

    Ok((0..df.height())
        .map(|i| VesselSegment {
            r0: r0[i],
            z0: z0[i],
            r1: r1[i],
            z1: z1[i],
            label: labels[i].clone(),
            part: parts[i].clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_frame_shape() {
        let df = probes_frame(&[
            Probe {
                r: 1.0,
                z: 0.5,
                theta: 0.0,
            },
            Probe {
                r: 1.5,
                z: 0.5,
                theta: 1.57,
            },
        ])
        .unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 4);
    }

    #[test]
    fn test_empty_frames() {
        assert_eq!(wall_frame(&[]).unwrap().height(), 0);
        assert_eq!(flux_loops_frame(&[]).unwrap().width(), 4);
    }

    #[test]
    fn test_missing_table() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            load_probes(&dir.path().join("probe_data_OP1.parquet")),
            Err(GeometryError::FileNotFound { .. })
        ));
    }
}
