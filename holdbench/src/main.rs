//! `holdbench` binary: copy-only versus copy+move holder lifecycle timings
//!
//! Run with: cargo run --release -p holdbench

use holdbench::TrackingAllocator;

// Install the tracking allocator for the entire process.
#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator;

fn main() {
    if let Err(e) = holdbench::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
