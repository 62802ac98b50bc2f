//! Resource Holders
//!
//! A holder exclusively owns a heap buffer of `len()` elements. Two variants
//! share the [`Holder`] capability set:
//!
//! - [`CopyHolder`] only knows how to duplicate. Consuming a value still goes
//!   through a full allocate-and-copy.
//! - [`MoveHolder`] also implements [`Transfer`]: consuming a value adopts its
//!   buffer in O(1) and leaves the source vacant.
//!
//! Duplication borrows its source (`&Self`), transfer takes it by value. A
//! caller that wants to transfer out of a named holder says so explicitly with
//! [`Transfer::give_up`].

mod buffer;
mod copy_move;
mod copy_only;

pub use copy_move::MoveHolder;
pub use copy_only::CopyHolder;

use crate::error::HolderError;

/// Element stored in a holder buffer
pub type Element = i32;

/// Lifecycle operations every holder variant supports.
///
/// Duplicate-assignment takes `&mut self` and `&Self`, so assigning a holder
/// to itself is rejected at compile time:
///
/// ```compile_fail
/// use holdbench_core::{CopyHolder, Holder};
///
/// let mut h = CopyHolder::with_size(4).unwrap();
/// h.assign(&h).unwrap();
/// ```
pub trait Holder: Sized {
    /// Variant name, used as the section banner
    const NAME: &'static str;

    /// Allocate a holder of `size` elements.
    ///
    /// Contents are unspecified (currently zero). `size == 0` yields a holder
    /// without a buffer.
    fn with_size(size: usize) -> Result<Self, HolderError>;

    /// Allocate a new buffer and copy every element of `self` into it
    fn duplicate(&self) -> Result<Self, HolderError>;

    /// Replace `self` with a duplicate of `source`.
    ///
    /// On error `self` is left unchanged.
    fn assign(&mut self, source: &Self) -> Result<(), HolderError>;

    /// Build a holder from a value the caller has given up.
    ///
    /// Variants without an ownership-transfer path duplicate `source` and then
    /// drop it.
    fn from_value(source: Self) -> Result<Self, HolderError> {
        source.duplicate()
    }

    /// Assign from a value the caller has given up.
    ///
    /// Variants without an ownership-transfer path duplicate `source` into
    /// `self` and then drop it.
    fn assign_value(&mut self, source: Self) -> Result<(), HolderError> {
        self.assign(&source)
    }

    /// Number of owned elements (0 when vacant)
    fn len(&self) -> usize;

    /// Owned elements (empty when vacant)
    fn as_slice(&self) -> &[Element];

    /// Owned elements, mutably
    fn as_mut_slice(&mut self) -> &mut [Element];

    /// Whether the holder owns no buffer
    fn is_vacant(&self) -> bool;

    /// Whether the holder owns zero elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Ownership transfer, for variants that support it.
///
/// Transfers never allocate and never fail.
pub trait Transfer: Holder {
    /// Give up ownership of this holder's buffer.
    ///
    /// Returns a holder owning the previous contents and leaves `self` vacant
    /// (no buffer, length 0). `self` stays valid and may be assigned again.
    fn give_up(&mut self) -> Self;

    /// Adopt `source`'s buffer without copying
    fn transfer(source: Self) -> Self;

    /// Release `self`'s buffer and adopt `source`'s.
    ///
    /// `source` is owned, so it can never alias `self`. Handing a holder its
    /// own contents back restores it unchanged:
    ///
    /// ```
    /// use holdbench_core::{Holder, MoveHolder, Transfer};
    ///
    /// let mut h = MoveHolder::with_size(4).unwrap();
    /// let ptr = h.as_slice().as_ptr();
    /// let own = h.give_up();
    /// h.transfer_assign(own);
    /// assert_eq!(h.as_slice().as_ptr(), ptr);
    /// assert_eq!(h.len(), 4);
    /// ```
    fn transfer_assign(&mut self, source: Self);
}
