use clap::Parser;
use coil_geometry::cli::{Args, OutputFormat, phase_discovery, print_report, setup_logging};
use coil_geometry::processor::GeometryProcessor;
use std::process;

fn main() {
    let args = Args::parse();
    setup_logging(args.log_level());

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    if let Err(error) = runtime.block_on(run(args)) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = args.to_config()?;

    if args.list_phases {
        let phases = phase_discovery::discover_phases(&config.data_dir)?;
        phase_discovery::print_phases(&config.data_dir, &phases);
        return Ok(());
    }

    let show_progress = !args.quiet && args.format == OutputFormat::Text;
    let processor = GeometryProcessor::new(config)?.with_progress(show_progress);
    let stats = processor.process().await?;

    print_report(&stats, args.format)
}
