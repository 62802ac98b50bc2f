//! Copy-only holder: the duplication baseline

use super::buffer::{self, Buffer};
use super::{Element, Holder};
use crate::error::HolderError;

/// Holder that can only be duplicated.
///
/// A `CopyHolder` is never left vacant: from construction to drop it owns a
/// populated buffer of `len()` elements (none when built with size 0).
/// Consuming constructions and assignments fall back to a full copy.
#[derive(Debug)]
pub struct CopyHolder {
    data: Buffer,
    size: usize,
}

impl Holder for CopyHolder {
    const NAME: &'static str = "Copy-only holder (duplication only)";

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
        // Old buffer is released by the assignment, after the copy succeeded
        self.data = buffer::duplicate(source.as_slice())?;
        self.size = source.size;
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
