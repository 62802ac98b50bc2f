//! Benchmark Driver
//!
//! Times the five lifecycle operations against each holder variant, one
//! trial each, then contrasts copying and transferring out of a named holder.
//!
//! ## Sequence per variant
//!
//! ```text
//! ┌ Total computation ───────────────────────────────────────────────┐
//! │ 1. h1 = with_size(regular)            regular constructor        │
//! │ 2. h2 = h1.duplicate()                copy constructor           │
//! │ 3. h3 = produce(regular)              move constructor           │
//! │ 4. h2.assign(&h3)                     assignment operator        │
//! │ 5. h2.assign_value(produce(large))    move assignment operator   │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every region is bracketed by a `TimingStack` start/stop pair. Holders are
//! dropped after the total is recorded, so destruction is not measured.

use holdbench_core::{
    CopyHolder, Holder, HolderError, Measurement, MoveHolder, TimingError, TimingStack, Transfer,
    produce,
};
use holdbench_report::{ReportError, Reporter, SectionKind};
use std::hint::black_box;
use thiserror::Error;

/// Direct construction
pub const REGULAR_CONSTRUCTOR: &str = "regular constructor";
/// Duplicating construction from an addressable holder
pub const COPY_CONSTRUCTOR: &str = "copy constructor (lvalue in input)";
/// Construction through the opaque-result factory
pub const MOVE_CONSTRUCTOR: &str = "move constructor (rvalue in input)";
/// Duplicating assignment between addressable holders
pub const COPY_ASSIGNMENT: &str = "assignment operator (lvalue in input)";
/// Assignment from a fresh factory result
pub const MOVE_ASSIGNMENT: &str = "move assignment operator (rvalue in input)";
/// The whole five-step sequence
pub const TOTAL_COMPUTATION: &str = "Total computation";
/// Copy out of a named holder
pub const DEMO_COPY: &str = "copy-constructor";
/// Transfer out of a named holder after giving it up
pub const DEMO_MOVE: &str = "move-constructor";
/// Banner of the addressable-value demonstrations
pub const DEMO_TITLE: &str = "How to move an addressable value";

/// Errors that abort a benchmark run
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Holder(#[from] HolderError),

    #[error(transparent)]
    Timing(#[from] TimingError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

/// Element counts used by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizes {
    /// Regular construction, copies, and the first factory call
    pub regular: usize,
    /// Consuming assignment
    pub large: usize,
    /// Addressable-value demonstrations
    pub demo: usize,
}

impl Default for Sizes {
    fn default() -> Self {
        Self {
            regular: 1 << 26,
            large: 1 << 27,
            demo: 1 << 28,
        }
    }
}

fn record<R: Reporter>(
    reporter: &mut R,
    label: &str,
    measurement: Measurement,
) -> Result<(), DriverError> {
    tracing::debug!(
        label,
        elapsed_ns = measurement.nanos(),
        cycles = measurement.cycles,
        alloc_bytes = measurement.alloc_bytes,
        alloc_count = measurement.alloc_count,
        "measured"
    );
    reporter.record(label, &measurement)?;
    Ok(())
}

/// Run the five timed operations against one holder variant.
///
/// Reports each operation, then the total, to `reporter`.
pub fn process<H: Holder, R: Reporter>(sizes: &Sizes, reporter: &mut R) -> Result<(), DriverError> {
    let mut stack = TimingStack::new();
    stack.start();

    stack.start();
    let h1 = black_box(H::with_size(sizes.regular)?);
    record(reporter, REGULAR_CONSTRUCTOR, stack.stop()?)?;

    stack.start();
    let mut h2 = black_box(h1.duplicate()?);
    record(reporter, COPY_CONSTRUCTOR, stack.stop()?)?;

    stack.start();
    let h3 = black_box(produce::<H>(sizes.regular)?);
    record(reporter, MOVE_CONSTRUCTOR, stack.stop()?)?;

    stack.start();
    h2.assign(&h3)?;
    black_box(&h2);
    record(reporter, COPY_ASSIGNMENT, stack.stop()?)?;

    stack.start();
    h2.assign_value(produce::<H>(sizes.large)?)?;
    black_box(&h2);
    record(reporter, MOVE_ASSIGNMENT, stack.stop()?)?;

    record(reporter, TOTAL_COMPUTATION, stack.stop()?)?;

    tracing::debug!(
        h1 = h1.len(),
        h2 = h2.len(),
        h3 = h3.len(),
        "releasing holders"
    );
    Ok(())
}

/// Copy versus transfer out of the same kind of input: a named holder.
///
/// Both measurements include dropping the two holders involved.
pub fn move_addressable<H: Transfer, R: Reporter>(
    sizes: &Sizes,
    reporter: &mut R,
) -> Result<(), DriverError> {
    let mut stack = TimingStack::new();

    stack.start();
    {
        let h1 = black_box(H::with_size(sizes.demo)?);
        let h2 = black_box(h1.duplicate()?);
        drop((h1, h2));
    }
    record(reporter, DEMO_COPY, stack.stop()?)?;

    stack.start();
    {
        let mut h1 = black_box(H::with_size(sizes.demo)?);
        let h2 = black_box(H::transfer(h1.give_up()));
        // h1 is vacant now; dropping it releases nothing
        drop((h1, h2));
    }
    record(reporter, DEMO_MOVE, stack.stop()?)?;

    Ok(())
}

/// Open a variant section and run [`process`] for it
pub fn run_variant<H: Holder, R: Reporter>(
    sizes: &Sizes,
    reporter: &mut R,
) -> Result<(), DriverError> {
    tracing::info!(variant = H::NAME, "running variant");
    reporter.section(SectionKind::Variant, H::NAME)?;
    process::<H, R>(sizes, reporter)
}

/// Run the full suite: copy-only, copy+move, then the demonstrations
pub fn run_suite<R: Reporter>(sizes: &Sizes, reporter: &mut R) -> Result<(), DriverError> {
    run_variant::<CopyHolder, R>(sizes, reporter)?;
    run_variant::<MoveHolder, R>(sizes, reporter)?;

    tracing::info!("running addressable-value demonstrations");
    reporter.section(SectionKind::Demonstration, DEMO_TITLE)?;
    move_addressable::<MoveHolder, R>(sizes, reporter)
}
