//! Opaque-Result Factory
//!
//! Returning a freshly built local straight to the caller lets the compiler
//! construct it in place, so the consuming construction being measured never
//! runs. `produce` builds two candidates and picks one through
//! [`std::hint::black_box`], which the optimizer must treat as unknown, then
//! materializes the result with [`Holder::from_value`]. It is never inlined,
//! so the selection cannot be specialized at the call site either.

use crate::error::HolderError;
use crate::holder::Holder;
use std::hint::black_box;

/// Build a holder of `size` elements whose identity the caller cannot predict.
///
/// Both candidates are allocated; the one not returned is dropped before the
/// function exits. The returned holder always passes through
/// `H::from_value`: a transfer for [`MoveHolder`](crate::MoveHolder), a
/// duplication for [`CopyHolder`](crate::CopyHolder).
#[inline(never)]
pub fn produce<H: Holder>(size: usize) -> Result<H, HolderError> {
    let h01 = H::with_size(size)?;
    let h02 = H::with_size(size)?;

    let chosen = if black_box(true) { h01 } else { h02 };
    H::from_value(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::allocation_totals;
    use crate::holder::{CopyHolder, MoveHolder};

    #[test]
    fn test_produce_move_holder() {
        let holder: MoveHolder = produce(64).unwrap();
        assert_eq!(holder.len(), 64);
        assert!(!holder.is_vacant());
    }

    #[test]
    fn test_produce_copy_holder() {
        let holder: CopyHolder = produce(64).unwrap();
        assert_eq!(holder.len(), 64);
        assert!(holder.as_slice().iter().all(|&e| e == 0));
    }

    #[test]
    fn test_produce_zero_size() {
        let holder: MoveHolder = produce(0).unwrap();
        assert!(holder.is_vacant());
    }

    #[test]
    fn test_produce_propagates_allocation_failure() {
        let err = produce::<CopyHolder>(usize::MAX).unwrap_err();
        assert!(matches!(err, HolderError::Allocation { .. }));
    }

    #[test]
    fn test_copy_variant_allocates_a_third_buffer() {
        let size = 1024;
        let bytes = (size * std::mem::size_of::<crate::Element>()) as u64;

        let before = allocation_totals();
        let moved: MoveHolder = produce(size).unwrap();
        let move_delta = allocation_totals().since(before);

        let before = allocation_totals();
        let copied: CopyHolder = produce(size).unwrap();
        let copy_delta = allocation_totals().since(before);

        assert_eq!(move_delta.bytes, 2 * bytes);
        assert_eq!(copy_delta.bytes, 3 * bytes);
        drop((moved, copied));
    }
}
