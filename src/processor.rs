//! Batch processing engine.
//!
//! Resolves the configured sources (explicit files or operating-phase
//! files), decodes each one on a blocking task with its own cursor, and
//! optionally exports the decoded tables. Independent files share nothing,
//! so they are decoded concurrently up to the configured limit.

use crate::config::{GeometryConfig, OperatingPhase};
use crate::constants::GEOMETRY_FILE_PREFIX;
use crate::decoder::Decoder;
use crate::error::{GeometryError, Result};
use crate::export::TableExporter;
use crate::models::ParsedFile;

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::{debug, info};

/// A geometry file and the label used to name its exported tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeometrySource {
    pub label: String,
    pub path: PathBuf,
}

impl GeometrySource {
    pub fn for_phase(config: &GeometryConfig, phase: OperatingPhase) -> Self {
        Self {
            label: phase.label().to_string(),
            path: config.phase_path(phase),
        }
    }

    /// Label a file by its stem, dropping the `coil_vv_` prefix
    pub fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "geometry".to_string());
        let label = stem
            .strip_prefix(GEOMETRY_FILE_PREFIX)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .unwrap_or(stem);
        Self {
            label,
            path: path.to_path_buf(),
        }
    }

    pub fn phase(&self) -> Option<OperatingPhase> {
        OperatingPhase::from_label(&self.label)
    }
}

/// Outcome of decoding one source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub label: String,
    pub path: PathBuf,
    /// Reference pulse when the label names an operating phase
    pub pulse: Option<u32>,
    pub coils: usize,
    pub patches: usize,
    pub filaments: usize,
    pub wall_points: usize,
    pub vessel_segments: Option<usize>,
    pub flux_loops: usize,
    pub probes: usize,
    pub lines_decoded: usize,
    pub exported: Vec<PathBuf>,
}

impl FileReport {
    pub fn new(source: &GeometrySource, parsed: &ParsedFile, exported: Vec<PathBuf>) -> Self {
        Self {
            label: source.label.clone(),
            path: source.path.clone(),
            pulse: source.phase().map(|phase| phase.pulse()),
            coils: parsed.coils.len(),
            patches: parsed.layout.coil_rows(),
            filaments: parsed.filaments.len(),
            wall_points: parsed.wall.len(),
            vessel_segments: parsed.vessel.as_ref().map(|vessel| vessel.segments.len()),
            flux_loops: parsed.flux_loops.len(),
            probes: parsed.probes.len(),
            lines_decoded: parsed.layout.end_offset,
            exported,
        }
    }
}

/// Processing statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub tables_exported: usize,
    pub processing_time_ms: u128,
    pub reports: Vec<FileReport>,
}

/// Decode one source and export its tables when an output directory is set
pub fn process_source(config: &GeometryConfig, source: &GeometrySource) -> Result<FileReport> {
    let parsed = Decoder::new(config.parse).parse_file(&source.path)?;

    let exported = match &config.output_dir {
        Some(output_dir) => {
            TableExporter::new(output_dir, config.compression).export(&parsed, &source.label)?
        }
        None => Vec::new(),
    };

    debug!(
        "Processed {} ({} coils, {} tables exported)",
        source.label,
        parsed.coils.len(),
        exported.len()
    );
    Ok(FileReport::new(source, &parsed, exported))
}

/// Main processor for geometry conversion
pub struct GeometryProcessor {
    config: GeometryConfig,
    show_progress: bool,
}

impl GeometryProcessor {
    pub fn new(config: GeometryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            show_progress: false,
        })
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Explicit files when given, otherwise one file per configured phase
    pub fn sources(&self) -> Vec<GeometrySource> {
        if !self.config.files.is_empty() {
            return self
                .config
                .files
                .iter()
                .map(|path| GeometrySource::from_path(path))
                .collect();
        }
        self.config
            .phases
            .iter()
            .map(|&phase| GeometrySource::for_phase(&self.config, phase))
            .collect()
    }

    /// Decode every source; reports come back in source order
    pub async fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        let sources = self.sources();
        info!("Decoding {} geometry files", sources.len());

        let progress = self.create_progress_bar(sources.len() as u64);

        let mut outcomes = stream::iter(sources.into_iter().enumerate())
            .map(|(index, source)| {
                let config = self.config.clone();
                let progress = progress.clone();
                let path = source.path.clone();
                async move {
                    let outcome =
                        task::spawn_blocking(move || process_source(&config, &source)).await;
                    progress.inc(1);
                    (index, path, outcome)
                }
            })
            .buffer_unordered(self.config.max_concurrent_files)
            .collect::<Vec<_>>()
            .await;
        progress.finish_and_clear();

        outcomes.sort_by_key(|(index, _, _)| *index);

        let mut stats = ProcessingStats::default();
        for (_, path, outcome) in outcomes {
            let report = outcome.map_err(|e| GeometryError::ProcessingFailed {
                path,
                reason: format!("Decoding task failed: {}", e),
            })??;
            stats.files_processed += 1;
            stats.tables_exported += report.exported.len();
            stats.reports.push(report);
        }
        stats.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Decoded {} files in {}ms",
            stats.files_processed, stats.processing_time_ms
        );
        Ok(stats)
    }

    fn create_progress_bar(&self, total: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message("geometry files");
        pb
    }
}
