//! Command-line interface components.

use crate::config::{CompressionAlgorithm, GeometryConfig, OperatingPhase};
use crate::processor::ProcessingStats;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "coil_geometry")]
#[command(about = "Decode tokamak coil, vessel, wall and magnetics geometry files")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Geometry files to decode (overrides --phase)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Operating phase whose geometry file to decode (repeatable)
    #[arg(short, long = "phase", value_enum)]
    pub phases: Vec<OperatingPhase>,

    /// Directory holding coil_vv_<PHASE>.dat files
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Export parquet tables to this directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Decode the vessel contour section after the wall
    #[arg(long)]
    pub vessel_contours: bool,

    /// Parquet compression algorithm
    #[arg(long, value_enum)]
    pub compression: Option<CompressionAlgorithm>,

    /// JSON configuration file; flags override its values
    #[arg(short, long = "config", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// List the phase files found in the data directory and exit
    #[arg(long)]
    pub list_phases: bool,

    /// Enable debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Args {
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Build the processing configuration: config file first, then flags
    pub fn to_config(&self) -> Result<GeometryConfig> {
        let mut config = match &self.config_file {
            Some(path) => GeometryConfig::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => GeometryConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config = config.with_data_dir(data_dir);
        }
        if !self.phases.is_empty() {
            config = config.with_phases(self.phases.clone());
        }
        if !self.files.is_empty() {
            config = config.with_files(self.files.clone());
        }
        if let Some(output_dir) = &self.output_dir {
            config = config.with_output_dir(output_dir);
        }
        if let Some(compression) = self.compression {
            config = config.with_compression(compression);
        }
        if self.vessel_contours {
            let parse = config.parse.with_vessel_contours();
            config = config.with_parse_options(parse);
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coil_geometry={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Print the processing report to stdout
pub fn print_report(stats: &ProcessingStats, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(stats).context("Failed to serialize report")?;
            println!("{}", json);
        }
        OutputFormat::Text => print_summary(stats),
    }
    Ok(())
}

fn print_summary(stats: &ProcessingStats) {
    println!("{}", "Geometry decoding complete".bright_green().bold());
    for report in &stats.reports {
        let pulse = report
            .pulse
            .map(|pulse| format!(" (pulse {})", pulse))
            .unwrap_or_default();
        println!(
            "  {}{} {}",
            report.label.bright_cyan().bold(),
            pulse,
            report.path.display().to_string().bright_black()
        );
        println!(
            "    {} coils from {} patches, {} passive filaments",
            report.coils, report.patches, report.filaments
        );
        println!(
            "    {} wall points, {} flux loops, {} probes",
            report.wall_points, report.flux_loops, report.probes
        );
        if let Some(segments) = report.vessel_segments {
            println!("    {} vessel contour segments", segments);
        }
        for path in &report.exported {
            println!("    {} {}", "->".bright_green(), path.display());
        }
    }
    println!(
        "{} files, {} tables in {}ms",
        stats.files_processed.to_string().bright_yellow(),
        stats.tables_exported.to_string().bright_yellow(),
        stats.processing_time_ms
    );
}

/// Phase file discovery in a data directory
pub mod phase_discovery {
    use super::*;
    use crate::constants::{GEOMETRY_FILE_EXTENSION, GEOMETRY_FILE_PREFIX};
    use std::path::Path;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct DiscoveredPhase {
        /// Text after the `coil_vv_` prefix
        pub label: String,
        pub phase: Option<OperatingPhase>,
        pub path: PathBuf,
    }

    /// Geometry files in `data_dir`, sorted by label
    pub fn discover_phases(data_dir: &Path) -> Result<Vec<DiscoveredPhase>> {
        if !data_dir.is_dir() {
            anyhow::bail!("Data directory not found at {}", data_dir.display());
        }

        let pattern = data_dir.join(format!(
            "{}*.{}",
            GEOMETRY_FILE_PREFIX, GEOMETRY_FILE_EXTENSION
        ));
        let pattern = pattern.to_string_lossy();

        let mut phases = Vec::new();
        for entry in glob::glob(&pattern).context("Invalid phase file pattern")? {
            let path = entry.context("Failed to read directory entry")?;
            let Some(label) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.strip_prefix(GEOMETRY_FILE_PREFIX))
                .map(str::to_string)
            else {
                continue;
            };
            phases.push(DiscoveredPhase {
                phase: OperatingPhase::from_label(&label),
                label,
                path,
            });
        }

        phases.sort_by(|a, b| a.label.cmp(&b.label));
        Ok(phases)
    }

    pub fn print_phases(data_dir: &Path, phases: &[DiscoveredPhase]) {
        println!(
            "{} {}",
            "Geometry files in".bright_green().bold(),
            data_dir.display()
        );
        if phases.is_empty() {
            println!("  (none)");
            return;
        }
        for found in phases {
            let note = match found.phase {
                Some(phase) => format!("pulse {}", phase.pulse()),
                None => "unknown phase".to_string(),
            };
            println!(
                "  {} {}",
                found.label.bright_cyan(),
                format!("({})", note).bright_black()
            );
        }
    }
}
