#![warn(missing_docs)]
//! HoldBench CLI Library
//!
//! Command-line harness and driver for the holder lifecycle benchmark.
//! Use `holdbench::run()` (or `holdbench_cli::run()`) from a binary's `main`
//! after installing the tracking allocator:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: holdbench::TrackingAllocator = holdbench::TrackingAllocator;
//!
//! fn main() {
//!     holdbench_cli::run().unwrap();
//! }
//! ```

mod config;
mod driver;
mod metadata;

pub use config::*;
pub use driver::*;
pub use metadata::{SCHEMA_VERSION, build_report_meta};

use clap::{Parser, Subcommand};
use holdbench_core::{AllocationTotals, allocation_totals, pin_to_cpu};
use holdbench_report::{ConsoleReporter, OutputFormat, ReportCollector, generate_json_report};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// HoldBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "holdbench")]
#[command(
    author,
    version,
    about = "HoldBench - copy-only versus copy+move holder lifecycle timings"
)]
pub struct Cli {
    /// Optional subcommand; defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format: human, json
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file (default: discover holdbench.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Elements for regular construction and copies (e.g. 67108864, 2^26, 64Mi)
    #[arg(long, value_parser = parse_element_count)]
    pub regular_size: Option<usize>,

    /// Elements for the consuming assignment; must exceed the regular size
    #[arg(long, value_parser = parse_element_count)]
    pub large_size: Option<usize>,

    /// Elements for the addressable-value demonstrations
    #[arg(long, value_parser = parse_element_count)]
    pub demo_size: Option<usize>,

    /// Pin the benchmark thread to this CPU (Linux only)
    #[arg(long)]
    pub pin_cpu: Option<usize>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the benchmark (default)
    Run,
    /// Print the default holdbench.toml
    DefaultConfig,
}

/// Effective settings after merging holdbench.toml and CLI flags
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Element counts
    pub sizes: Sizes,
    /// Report format
    pub format: OutputFormat,
    /// Report destination (stdout if `None`)
    pub output: Option<PathBuf>,
    /// CPU to pin the benchmark thread to
    pub pin_cpu: Option<usize>,
}

impl RunSettings {
    /// Merge configuration and CLI flags; CLI flags win
    pub fn resolve(cli: &Cli, config: &HoldConfig) -> anyhow::Result<Self> {
        let defaults = config.sizes();
        let sizes = Sizes {
            regular: cli.regular_size.unwrap_or(defaults.regular),
            large: cli.large_size.unwrap_or(defaults.large),
            demo: cli.demo_size.unwrap_or(defaults.demo),
        };
        validate_sizes(&sizes)?;

        let format: OutputFormat = cli
            .format
            .as_deref()
            .unwrap_or(&config.output.format)
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;

        let output = cli
            .output
            .clone()
            .or_else(|| config.output.path.as_ref().map(PathBuf::from));

        Ok(Self {
            sizes,
            format,
            output,
            pin_cpu: cli.pin_cpu.or(config.runner.pin_cpu),
        })
    }
}

/// Run the HoldBench CLI with the process arguments.
/// This is the main entry point for the `holdbench` binary.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli)
}

/// Run the HoldBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    if cli.command == Some(Commands::DefaultConfig) {
        print!("{}", HoldConfig::default_toml());
        return Ok(());
    }

    init_logging(cli.verbose);

    // Explicit --config wins over discovery; flags override the file
    let config = match cli.config.clone().or_else(HoldConfig::discover) {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            HoldConfig::load(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load configuration {}: {}", path.display(), e)
            })?
        }
        None => HoldConfig::default(),
    };

    let settings = RunSettings::resolve(&cli, &config)?;
    run_benchmarks(&settings)
}

/// Initialize logging on stderr, keeping stdout for the report
fn init_logging(verbose: bool) {
    let directive = if verbose {
        "holdbench=debug"
    } else {
        "holdbench=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    // A subscriber may already be installed by an embedding program
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the suite with resolved settings and write the report
pub fn run_benchmarks(settings: &RunSettings) -> anyhow::Result<()> {
    if let Some(cpu) = settings.pin_cpu {
        match pin_to_cpu(cpu) {
            Ok(()) => tracing::info!(cpu, "pinned benchmark thread"),
            Err(e) => tracing::warn!(cpu, error = %e, "failed to pin benchmark thread"),
        }
    }

    tracing::info!(
        regular = settings.sizes.regular,
        large = settings.sizes.large,
        demo = settings.sizes.demo,
        "starting holder benchmarks"
    );

    let start_time = Instant::now();
    let allocations_before = allocation_totals();

    match settings.format {
        OutputFormat::Human => {
            let mut reporter = ConsoleReporter::new(open_output(settings.output.as_deref())?);
            run_suite(&settings.sizes, &mut reporter)?;
            reporter.finish()?;
            check_allocation_tracking(allocations_before);
        }
        OutputFormat::Json => {
            let mut collector = ReportCollector::new();
            run_suite(&settings.sizes, &mut collector)?;
            let tracked = check_allocation_tracking(allocations_before);

            let total_duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
            let report = collector.into_report(build_report_meta(settings, tracked), total_duration_ms);
            let json = generate_json_report(&report)?;

            let mut out = open_output(settings.output.as_deref())?;
            writeln!(out, "{}", json)?;
            out.flush()?;
        }
    }

    tracing::info!(
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "holder benchmarks complete"
    );
    Ok(())
}

/// Whether any allocation was recorded since `before`; warns when none was
fn check_allocation_tracking(before: AllocationTotals) -> bool {
    let tracked = allocation_totals().since(before).count > 0;
    if !tracked {
        tracing::warn!(
            "No allocations recorded. Install holdbench::TrackingAllocator as the global allocator \
             to report allocation totals."
        );
    }
    tracked
}

fn open_output(path: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            Ok(Box::new(BufWriter::new(File::create(path)?)))
        }
        None => Ok(Box::new(std::io::stdout().lock())),
    }
}
