//! Allocation Tracking
//!
//! `TrackingAllocator` wraps the system allocator and counts bytes and
//! allocation calls for the calling thread. Install it once per binary:
//!
//! ```ignore
//! #[global_allocator]
//! static GLOBAL: holdbench::TrackingAllocator = holdbench::TrackingAllocator;
//! ```
//!
//! Counters are thread-local: a measurement only sees allocations made by the
//! thread that runs it.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

thread_local! {
    static ALLOCATED_BYTES: Cell<u64> = const { Cell::new(0) };
    static ALLOCATION_COUNT: Cell<u64> = const { Cell::new(0) };
}

/// Global allocator that records per-thread allocation totals
pub struct TrackingAllocator;

#[inline]
fn record(bytes: usize) {
    // Counters are unavailable during thread teardown; those allocations go unrecorded.
    let _ = ALLOCATED_BYTES.try_with(|total| total.set(total.get().wrapping_add(bytes as u64)));
    let _ = ALLOCATION_COUNT.try_with(|count| count.set(count.get().wrapping_add(1)));
}

// SAFETY: every method forwards to `System` with the caller's arguments
// unchanged; bookkeeping touches only const-initialized thread-locals and
// never allocates.
unsafe impl GlobalAlloc for TrackingAllocator {
    #[inline]
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record(layout.size());
        }
        ptr
    }

    #[inline]
    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record(layout.size());
        }
        ptr
    }

    #[inline]
    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }

    #[inline]
    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            // Only growth counts as newly allocated memory
            record(new_size.saturating_sub(layout.size()));
        }
        new_ptr
    }
}

/// Running allocation totals for the current thread
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationTotals {
    /// Bytes handed out by the allocator
    pub bytes: u64,
    /// Number of allocation calls
    pub count: u64,
}

impl AllocationTotals {
    /// Difference between `self` and an earlier snapshot
    #[inline]
    pub fn since(self, earlier: AllocationTotals) -> AllocationTotals {
        AllocationTotals {
            bytes: self.bytes.wrapping_sub(earlier.bytes),
            count: self.count.wrapping_sub(earlier.count),
        }
    }
}

/// Snapshot the calling thread's allocation totals.
///
/// Always zero when `TrackingAllocator` is not the global allocator.
#[inline]
pub fn allocation_totals() -> AllocationTotals {
    AllocationTotals {
        bytes: ALLOCATED_BYTES.try_with(Cell::get).unwrap_or(0),
        count: ALLOCATION_COUNT.try_with(Cell::get).unwrap_or(0),
    }
}

#[cfg(test)]
#[global_allocator]
static TEST_ALLOCATOR: TrackingAllocator = TrackingAllocator;
