//! Owned element buffers shared by both holder variants

use super::Element;
use crate::error::HolderError;
use std::alloc::{self, Layout};

/// Uniquely owned buffer; `None` means no buffer is held
pub(crate) type Buffer = Option<Box<[Element]>>;

/// Allocate a zero-filled buffer of `size` elements.
///
/// Zeroed pages are mapped lazily by the OS, so this stays cheap for large
/// sizes until the contents are touched.
pub(crate) fn allocate(size: usize) -> Result<Buffer, HolderError> {
    if size == 0 {
        return Ok(None);
    }

    let layout =
        Layout::array::<Element>(size).map_err(|_| HolderError::Allocation { elements: size })?;

    // SAFETY: `layout` has a non-zero size because `size > 0` and `Element`
    // is not zero-sized.
    let ptr = unsafe { alloc::alloc_zeroed(layout) }.cast::<Element>();
    if ptr.is_null() {
        return Err(HolderError::Allocation { elements: size });
    }

    // SAFETY: `ptr` comes from the global allocator with the layout of
    // `[Element; size]`, which is the layout `Box<[Element]>` frees with, and
    // all-zero bytes are a valid `Element`.
    let slice = unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, size)) };
    Ok(Some(slice))
}

/// Allocate a new buffer holding a copy of `source`
pub(crate) fn duplicate(source: &[Element]) -> Result<Buffer, HolderError> {
    let mut buffer = allocate(source.len())?;
    if let Some(target) = buffer.as_deref_mut() {
        target.copy_from_slice(source);
    }
    Ok(buffer)
}
