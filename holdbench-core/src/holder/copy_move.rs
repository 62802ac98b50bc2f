//! Copy+move holder: duplication plus O(1) ownership transfer

use super::buffer::{self, Buffer};
use super::{Element, Holder, Transfer};
use crate::error::HolderError;

/// Holder supporting both duplication and ownership transfer.
///
/// `Default` is the vacant state: no buffer, length 0. A holder only becomes
/// vacant by being the source of a transfer (or by default construction).
#[derive(Debug, Default)]
pub struct MoveHolder {
    data: Buffer,
    size: usize,
}

impl Holder for MoveHolder {
    const NAME: &'static str = "Copy+move holder (duplication and ownership transfer)";

    fn with_size(size: usize) -> Result<Self, HolderError> {
        Ok(Self {
            data: buffer::allocate(size)?,
            size,
        })
    }

    fn duplicate(&self) -> Result<Self, HolderError> {
        Ok(Self {
            data: buffer::duplicate(self.as_slice())?,
            size: self.size,
        })
    }

    fn assign(&mut self, source: &Self) -> Result<(), HolderError> {
        self.data = buffer::duplicate(source.as_slice())?;
        self.size = source.size;
        Ok(())
    }

    #[inline]
    fn from_value(source: Self) -> Result<Self, HolderError> {
        Ok(Self::transfer(source))
    }

    #[inline]
    fn assign_value(&mut self, source: Self) -> Result<(), HolderError> {
        self.transfer_assign(source);
        Ok(())
    }

    fn len(&self) -> usize {
        self.size
    }

    fn as_slice(&self) -> &[Element] {
        self.data.as_deref().unwrap_or(&[])
    }

    fn as_mut_slice(&mut self) -> &mut [Element] {
        self.data.as_deref_mut().unwrap_or(&mut [])
    }

    fn is_vacant(&self) -> bool {
        self.data.is_none()
    }
}

impl Transfer for MoveHolder {
    #[inline]
    fn give_up(&mut self) -> Self {
        std::mem::take(self)
    }

    #[inline]
    fn transfer(mut source: Self) -> Self {
        Self {
            data: source.data.take(),
            size: std::mem::take(&mut source.size),
        }
    }

    #[inline]
    fn transfer_assign(&mut self, mut source: Self) {
        // Dropping the previous buffer here is the only release
        self.data = source.data.take();
        self.size = std::mem::take(&mut source.size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(values: &[Element]) -> MoveHolder {
        let mut holder = MoveHolder::with_size(values.len()).unwrap();
        holder.as_mut_slice().copy_from_slice(values);
        holder
    }

    #[test]
    fn test_with_size() {
        let holder = MoveHolder::with_size(32).unwrap();
        assert_eq!(holder.len(), 32);
        assert!(!holder.is_vacant());
    }

    #[test]
    fn test_default_is_vacant() {
        let holder = MoveHolder::default();
        assert!(holder.is_vacant());
        assert_eq!(holder.len(), 0);
        assert!(holder.as_slice().is_empty());
    }

    #[test]
    fn test_duplicate_then_transfer_scenario() {
        let original = filled(&[1, 2, 3, 4]);
        let copy = original.duplicate().unwrap();
        assert_eq!(copy.len(), 4);
        assert_eq!(copy.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(original.as_slice(), &[1, 2, 3, 4]);

        let mut source = filled(&[1, 2, 3, 4]);
        let moved = MoveHolder::transfer(source.give_up());
        assert_eq!(moved.len(), 4);
        assert_eq!(moved.as_slice(), &[1, 2, 3, 4]);
        assert_eq!(source.len(), 0);
        assert!(source.is_vacant());
    }

    #[test]
    fn test_transfer_keeps_buffer_identity() {
        let mut source = filled(&[5, 6, 7]);
        let ptr = source.as_slice().as_ptr();

        let moved = MoveHolder::transfer(source.give_up());

        assert_eq!(moved.as_slice().as_ptr(), ptr);
        assert!(source.is_vacant());
    }

    #[test]
    fn test_transfer_assign_releases_target_and_vacates_source() {
        let mut target = filled(&[0; 16]);
        let mut source = filled(&[1, 2]);
        let ptr = source.as_slice().as_ptr();

        target.transfer_assign(source.give_up());

        assert_eq!(target.len(), 2);
        assert_eq!(target.as_slice(), &[1, 2]);
        assert_eq!(target.as_slice().as_ptr(), ptr);
        assert!(source.is_vacant());
        assert_eq!(source.len(), 0);
    }

    #[test]
    fn test_self_transfer_is_a_no_op() {
        let mut holder = filled(&[4, 3, 2, 1]);
        let ptr = holder.as_slice().as_ptr();

        let own = holder.give_up();
        holder.transfer_assign(own);

        assert_eq!(holder.len(), 4);
        assert_eq!(holder.as_slice(), &[4, 3, 2, 1]);
        assert_eq!(holder.as_slice().as_ptr(), ptr);
    }

    #[test]
    fn test_vacant_holder_can_be_reassigned() {
        let mut holder = filled(&[1]);
        let _taken = holder.give_up();

        holder.assign(&filled(&[8, 9])).unwrap();

        assert_eq!(holder.as_slice(), &[8, 9]);
        assert!(!holder.is_vacant());
    }

    #[test]
    fn test_dropping_vacant_holders() {
        let mut holder = filled(&[1, 2, 3]);
        let taken = holder.give_up();
        drop(holder);
        drop(taken);

        let mut twice = MoveHolder::default();
        let nothing = twice.give_up();
        assert!(nothing.is_vacant());
        drop(nothing);
        drop(twice);
    }

    #[test]
    fn test_from_value_transfers() {
        let source = filled(&[1, 2, 3, 4]);
        let ptr = source.as_slice().as_ptr();

        let holder = MoveHolder::from_value(source).unwrap();

        assert_eq!(holder.as_slice().as_ptr(), ptr);
        assert_eq!(holder.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_assign_value_transfers() {
        let mut target = filled(&[0; 4]);
        let source = filled(&[6, 7]);
        let ptr = source.as_slice().as_ptr();

        target.assign_value(source).unwrap();

        assert_eq!(target.as_slice().as_ptr(), ptr);
        assert_eq!(target.len(), 2);
    }

    #[test]
    fn test_duplicate_of_vacant_is_vacant() {
        let holder = MoveHolder::default();
        let copy = holder.duplicate().unwrap();
        assert!(copy.is_vacant());
        assert_eq!(copy.len(), 0);
    }
}
