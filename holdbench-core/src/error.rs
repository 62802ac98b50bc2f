//! Error types for holders and timing

use thiserror::Error;

/// Errors raised while constructing or duplicating a holder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HolderError {
    /// The allocator could not provide a buffer of the requested length
    #[error("Allocation failed: could not obtain a buffer of {elements} elements")]
    Allocation {
        /// Requested element count
        elements: usize,
    },
}

/// Errors raised by the timing stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimingError {
    /// `stop` was called with no matching `start`
    #[error("Timing stack is empty: stop requested without a matching start")]
    EmptyStackPop,
}
