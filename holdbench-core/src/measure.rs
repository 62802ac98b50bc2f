//! High-Precision Timing
//!
//! Wall-clock timing paired with RDTSCP on x86_64 and CNTVCT_EL0 on AArch64.
//! A `Timer` is a scope object: `Timer::start()` opens it and `Timer::stop()`
//! consumes it. `TimingStack` keeps nested timers in LIFO order for drivers
//! that bracket regions with start/stop pairs.

use crate::allocator::{AllocationTotals, allocation_totals};
use crate::error::TimingError;
use std::time::Duration;

// ─── Inline cycle counter helpers ────────────────────────────────────────────

/// Read the CPU cycle/tick counter (platform-specific).
#[cfg(target_arch = "x86_64")]
#[inline(always)]
fn read_cycles() -> u64 {
    // SAFETY: RDTSCP is available on all x86_64 CPUs since ~2006.
    // It waits for all prior instructions to complete before reading the counter.
    unsafe {
        let mut _aux: u32 = 0;
        std::arch::x86_64::__rdtscp(&mut _aux)
    }
}

/// Read the virtual counter timer on AArch64 (comparable to x86 TSC).
#[cfg(target_arch = "aarch64")]
#[inline(always)]
fn read_cycles() -> u64 {
    let cnt: u64;
    // SAFETY: CNTVCT_EL0 is readable from EL0 on all AArch64 implementations.
    unsafe {
        std::arch::asm!("mrs {}, cntvct_el0", out(reg) cnt, options(nostack, nomem));
    }
    cnt
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
#[inline(always)]
fn read_cycles() -> u64 {
    0
}

/// Whether this platform provides real cycle counters.
pub const HAS_CYCLE_COUNTER: bool = cfg!(target_arch = "x86_64") || cfg!(target_arch = "aarch64");

// ─── Instant ─────────────────────────────────────────────────────────────────

/// High-precision instant
#[derive(Debug, Clone, Copy)]
pub struct Instant {
    instant: std::time::Instant,
    tsc: u64,
}

impl Instant {
    /// Capture current instant
    #[inline(always)]
    pub fn now() -> Self {
        let tsc = read_cycles();
        Self {
            instant: std::time::Instant::now(),
            tsc,
        }
    }

    /// Compute elapsed time since this instant
    #[inline(always)]
    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }

    /// Raw cycle/tick count (non-zero on x86_64 and aarch64)
    #[inline(always)]
    pub fn cycles(&self) -> u64 {
        self.tsc
    }
}

// ─── Measurement ─────────────────────────────────────────────────────────────

/// Outcome of one timed region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    /// Wall-clock duration
    pub elapsed: Duration,
    /// CPU cycles (0 without a cycle counter)
    pub cycles: u64,
    /// Bytes allocated on this thread inside the region
    pub alloc_bytes: u64,
    /// Allocation calls made on this thread inside the region
    pub alloc_count: u64,
}

impl Measurement {
    /// Elapsed time in seconds
    #[inline]
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Elapsed time in nanoseconds, saturating at `u64::MAX`
    #[inline]
    pub fn nanos(&self) -> u64 {
        u64::try_from(self.elapsed.as_nanos()).unwrap_or(u64::MAX)
    }
}

// ─── Timer ───────────────────────────────────────────────────────────────────

/// Timer for one measured region
#[derive(Debug)]
#[must_use = "a timer measures nothing until it is stopped"]
pub struct Timer {
    start: Instant,
    allocations: AllocationTotals,
}

impl Timer {
    /// Start a new timer
    #[inline(always)]
    pub fn start() -> Self {
        let allocations = allocation_totals();
        Self {
            start: Instant::now(),
            allocations,
        }
    }

    /// Stop the timer
    #[inline(always)]
    pub fn stop(self) -> Measurement {
        let elapsed = self.start.elapsed();
        let cycles = read_cycles().saturating_sub(self.start.cycles());
        let allocations = allocation_totals().since(self.allocations);
        Measurement {
            elapsed,
            cycles,
            alloc_bytes: allocations.bytes,
            alloc_count: allocations.count,
        }
    }
}

// ─── TimingStack ─────────────────────────────────────────────────────────────

/// LIFO stack of open timers.
///
/// Each `start` pushes a timer; each `stop` pops the most recent one. Stopping
/// with nothing open is reported as [`TimingError::EmptyStackPop`].
#[derive(Debug)]
pub struct TimingStack {
    open: Vec<Timer>,
}

/// Nesting depth reserved up front so `start` does not allocate inside an open region
const RESERVED_DEPTH: usize = 8;

impl TimingStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self {
            open: Vec::with_capacity(RESERVED_DEPTH),
        }
    }

    /// Open a new timed region
    #[inline(always)]
    pub fn start(&mut self) {
        self.open.push(Timer::start());
    }

    /// Close the most recently opened region
    #[inline(always)]
    pub fn stop(&mut self) -> Result<Measurement, TimingError> {
        self.open
            .pop()
            .map(Timer::stop)
            .ok_or(TimingError::EmptyStackPop)
    }

    /// Number of open regions
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Whether no region is open
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

impl Default for TimingStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Set CPU affinity to pin the current thread to a specific core
///
/// Keeps the cycle counter stable by avoiding core migrations.
#[cfg(target_os = "linux")]
pub fn pin_to_cpu(cpu: usize) -> Result<(), std::io::Error> {
    use std::mem::MaybeUninit;

    unsafe {
        let mut set = MaybeUninit::<libc::cpu_set_t>::zeroed();
        let set_ref = set.assume_init_mut();

        libc::CPU_ZERO(set_ref);
        libc::CPU_SET(cpu, set_ref);

        let result = libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), set_ref);

        if result == 0 {
            Ok(())
        } else {
            Err(std::io::Error::last_os_error())
        }
    }
}

/// CPU pinning is only supported on Linux
#[cfg(not(target_os = "linux"))]
pub fn pin_to_cpu(_cpu: usize) -> Result<(), std::io::Error> {
    Ok(())
}
