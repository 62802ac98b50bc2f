#![warn(missing_docs)]
//! HoldBench Core - Holders and Timing
//!
//! This crate provides the pieces a lifecycle benchmark is built from:
//! - `CopyHolder` / `MoveHolder` heap-backed resource holders
//! - `Holder` and `Transfer` capability traits
//! - `produce`, the opaque-result factory
//! - High-precision timing (`Timer`, `TimingStack`) with RDTSC cycle counts
//! - Global allocator interceptor for per-measurement allocation totals

mod allocator;
mod error;
mod factory;
mod holder;
mod measure;

pub use allocator::{AllocationTotals, TrackingAllocator, allocation_totals};
pub use error::{HolderError, TimingError};
pub use factory::produce;
pub use holder::{CopyHolder, Element, Holder, MoveHolder, Transfer};
/// Whether this platform provides hardware cycle counters (x86_64 RDTSCP or AArch64 CNTVCT_EL0).
/// When `false`, cycle counts are reported as 0 and only wall-clock nanoseconds are available.
pub use measure::HAS_CYCLE_COUNTER;
pub use measure::{Instant, Measurement, Timer, TimingStack, pin_to_cpu};
