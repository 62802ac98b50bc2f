#![warn(missing_docs)]
//! # HoldBench
//!
//! Measures what ownership transfer saves over duplication for a heap-backed
//! resource holder.
//!
//! Two holder variants run the same five lifecycle operations, one timed trial
//! each:
//! - **Regular construction**: allocate a buffer
//! - **Duplicating construction**: allocate and copy from a named holder
//! - **Consuming construction**: materialize an opaque factory result
//! - **Duplicating assignment**: replace contents with a copy
//! - **Consuming assignment**: replace contents with a factory result
//!
//! [`CopyHolder`] can only duplicate, so the consuming paths copy too.
//! [`MoveHolder`] adopts the source buffer in O(1) and leaves the source
//! vacant.
//!
//! ## Quick Start
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: holdbench::TrackingAllocator = holdbench::TrackingAllocator;
//!
//! fn main() {
//!     if let Err(e) = holdbench::run() {
//!         eprintln!("Error: {e}");
//!         std::process::exit(1);
//!     }
//! }
//! ```
//!
//! ## Driving a custom holder
//!
//! ```no_run
//! use holdbench::{ConsoleReporter, MoveHolder, Sizes, run_variant};
//!
//! let mut reporter = ConsoleReporter::new(std::io::stdout());
//! run_variant::<MoveHolder, _>(&Sizes::default(), &mut reporter).unwrap();
//! ```

// Re-export core types
pub use holdbench_core::{
    AllocationTotals, CopyHolder, Element, HAS_CYCLE_COUNTER, Holder, HolderError, Instant,
    Measurement, MoveHolder, Timer, TimingError, TimingStack, TrackingAllocator, Transfer,
    allocation_totals, pin_to_cpu, produce,
};

// Re-export reporting
pub use holdbench_report::{
    ComparisonEntry, ConsoleReporter, MeasurementEntry, OutputFormat, Report, ReportCollector,
    ReportError, Reporter, SectionKind, SectionResult, format_measurement, generate_json_report,
};

// Re-export the driver
pub use holdbench_cli::{
    Cli, DriverError, HoldConfig, RunSettings, Sizes, move_addressable, process, run_suite,
    run_variant,
};

/// Operation labels used in reports
pub mod labels {
    pub use holdbench_cli::{
        COPY_ASSIGNMENT, COPY_CONSTRUCTOR, DEMO_COPY, DEMO_MOVE, DEMO_TITLE, MOVE_ASSIGNMENT,
        MOVE_CONSTRUCTOR, REGULAR_CONSTRUCTOR, TOTAL_COMPUTATION,
    };
}

/// Run the HoldBench CLI harness.
///
/// Call this from the benchmark binary's `main()`:
/// ```ignore
/// fn main() {
///     holdbench::run().unwrap();
/// }
/// ```
pub use holdbench_cli::{run, run_with_cli};
